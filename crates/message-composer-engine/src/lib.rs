pub mod editing;
pub mod formatting;

// Re-export key types for easier usage
pub use editing::{model::*, part::*, part_creator::*, patch::*, position::*, range::*};
pub use formatting::{FormatMarkers, Formatting, FormattingParseError, format_range, format_range_with};
