use crate::editing::Selection;

/// Result of running a transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub selection: Selection,
    /// Net change in model length, in characters
    pub length_delta: isize,
    pub version: u64,
}
