use crate::editing::{Part, PartCreator, PartError, Patch, Position, Range, SerializedPart};

/// The selection a transform leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Caret(Position),
    Range { start: Position, end: Position },
}

impl Selection {
    pub fn range(start: Position, end: Position) -> Self {
        if start == end {
            Selection::Caret(start)
        } else {
            Selection::Range {
                start: start.min(end),
                end: start.max(end),
            }
        }
    }

    /// Engine range for the next edit. A caret becomes an initialized-empty range.
    pub fn to_range(&self) -> Range {
        match *self {
            Selection::Caret(pos) => Range::caret(pos),
            Selection::Range { start, end } => Range::new(start, end),
        }
    }

    pub fn start(&self) -> Position {
        match *self {
            Selection::Caret(pos) => pos,
            Selection::Range { start, .. } => start,
        }
    }

    pub fn end(&self) -> Position {
        match *self {
            Selection::Caret(pos) => pos,
            Selection::Range { end, .. } => end,
        }
    }
}

impl From<Position> for Selection {
    fn from(pos: Position) -> Self {
        Selection::Caret(pos)
    }
}

impl From<&Range> for Selection {
    fn from(range: &Range) -> Self {
        Selection::range(range.start(), range.end())
    }
}

/// Owner of the part sequence of one message being composed.
///
/// Parts only change inside [`Model::transform`]; the callback mutates through
/// [`Range::replace`] and returns the selection to install afterwards.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) parts: Vec<Part>,
    pub(crate) part_creator: PartCreator,
    /// Selection installed by the last transform (caret at the end initially)
    pub(crate) selection: Selection,
    /// Incremented on each transform
    pub(crate) version: u64,
    pub(crate) in_transform: bool,
}

impl Model {
    pub fn new(parts: Vec<Part>, part_creator: PartCreator) -> Self {
        let mut model = Self {
            parts,
            part_creator,
            selection: Selection::Caret(Position::default()),
            version: 0,
            in_transform: false,
        };
        model.selection = Selection::Caret(model.position_at_end());
        model
    }

    /// Model holding `text` split into plain and newline parts
    pub fn from_text(text: &str) -> Self {
        let part_creator = PartCreator::new();
        let parts = part_creator.parse_plain_text(text);
        Self::new(parts, part_creator)
    }

    pub fn from_serialized(
        records: impl IntoIterator<Item = SerializedPart>,
        part_creator: PartCreator,
    ) -> Result<Self, PartError> {
        let parts = part_creator.deserialize_parts(records)?;
        Ok(Self::new(parts, part_creator))
    }

    pub fn serialize_parts(&self) -> Vec<SerializedPart> {
        self.parts.iter().map(Part::serialize).collect()
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part_creator(&self) -> &PartCreator {
        &self.part_creator
    }

    pub fn text(&self) -> String {
        self.parts.iter().map(Part::text).collect()
    }

    /// Total length in characters
    pub fn len(&self) -> usize {
        self.parts.iter().map(Part::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(Part::is_empty)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Absolute character offsets of the current selection
    pub fn selection_offsets(&self) -> std::ops::Range<usize> {
        let start = self.selection.start().as_offset(self).offset;
        let end = self.selection.end().as_offset(self).offset;
        start..end
    }

    /// Range between two positions, given in either order
    pub fn start_range(&self, a: Position, b: Position) -> Range {
        Range::new(a, b)
    }

    pub fn position_at_end(&self) -> Position {
        match self.parts.last() {
            Some(last) => Position::new(self.parts.len() - 1, last.len()),
            None => Position::new(0, 0),
        }
    }

    /// Position of an absolute offset. On a part boundary `at_part_end` picks the
    /// end of the earlier part over the start of the later one.
    ///
    /// Panics if `total_offset` is beyond the end of the model.
    pub fn position_for_offset(&self, total_offset: usize, at_part_end: bool) -> Position {
        let len = self.len();
        assert!(
            total_offset <= len,
            "offset {total_offset} is beyond the end of a model of length {len}"
        );

        let mut current = 0;
        for (index, part) in self.parts.iter().enumerate() {
            let part_len = part.len();
            let contains = if at_part_end {
                current + part_len >= total_offset
            } else {
                current + part_len > total_offset
            };
            if contains {
                return Position::new(index, total_offset - current);
            }
            current += part_len;
        }
        self.position_at_end()
    }

    /// Run a mutation and install the selection it returns.
    ///
    /// This is the only place parts change. Transforms do not nest.
    pub fn transform<F>(&mut self, callback: F) -> Patch
    where
        F: FnOnce(&mut Model) -> Selection,
    {
        debug_assert!(!self.in_transform, "nested Model::transform");
        self.in_transform = true;
        let old_len = self.len();

        let selection = callback(self);

        self.in_transform = false;
        self.selection = selection;
        self.version += 1;
        let length_delta = self.len() as isize - old_len as isize;

        log::debug!(
            "transform v{}: {} parts, length {:+}, selection {:?}",
            self.version,
            self.parts.len(),
            length_delta,
            selection
        );

        Patch {
            selection,
            length_delta,
            version: self.version,
        }
    }

    /// Replace everything between two positions with `parts`.
    ///
    /// Parts straddling either boundary are split first; both halves keep their
    /// kind. Adjacent parts are not merged afterwards.
    pub(crate) fn replace_range(&mut self, start: Position, end: Position, parts: Vec<Part>) {
        // The end is carried as an offset because splitting at the start shifts part indices
        let end_offset = end.as_offset(self);
        let first = self.split_at(start);
        let end = end_offset.as_position(self);
        let last = self.split_at(end);

        log::trace!(
            "replace parts {first}..{last} with {} new parts",
            parts.len()
        );
        self.parts.splice(first..last, parts);
    }

    /// Split the part under `pos` so that `pos` falls on a part boundary, and
    /// return the index of the part starting there
    fn split_at(&mut self, pos: Position) -> usize {
        if self.parts.is_empty() || pos.offset == 0 {
            return pos.index;
        }
        let part = &mut self.parts[pos.index];
        if pos.offset >= part.len() {
            return pos.index + 1;
        }
        let tail = part.split_off(pos.offset);
        self.parts.insert(pos.index + 1, tail);
        pos.index + 1
    }
}
