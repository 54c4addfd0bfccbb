use crate::editing::{Model, Part};

/// A `(part index, character offset within that part)` coordinate.
///
/// Only meaningful against the model snapshot it was computed for: part
/// boundaries move on every transform. Ordering is lexicographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub index: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(index: usize, offset: usize) -> Self {
        Self { index, offset }
    }

    /// Absolute offset of this position.
    ///
    /// Panics if the position lies outside the model.
    pub fn as_offset(&self, model: &Model) -> Offset {
        let parts = model.parts();
        assert!(
            self.index <= parts.len(),
            "position {self:?} is outside a model of {} parts",
            parts.len()
        );
        let preceding: usize = parts[..self.index].iter().map(Part::len).sum();
        match parts.get(self.index) {
            Some(part) => {
                let len = part.len();
                assert!(
                    self.offset <= len,
                    "position {self:?} is past the end of a part of length {len}"
                );
                Offset::new(preceding + self.offset, self.offset == len)
            }
            None => {
                assert!(
                    self.offset == 0,
                    "position {self:?} is past the end of the model"
                );
                Offset::new(preceding, true)
            }
        }
    }

    /// Walk forwards one character at a time while `predicate(index, offset, part)`
    /// holds for the character at the walk position. Stops at the end of the model.
    pub fn forwards_while<P>(&self, model: &Model, mut predicate: P) -> Position
    where
        P: FnMut(usize, usize, &Part) -> bool,
    {
        let parts = model.parts();
        let Position { mut index, mut offset } = *self;
        while index < parts.len() {
            let part = &parts[index];
            let len = part.len();
            while offset < len {
                if !predicate(index, offset, part) {
                    return Position::new(index, offset);
                }
                offset += 1;
            }
            if index == parts.len() - 1 {
                return Position::new(index, offset);
            }
            index += 1;
            offset = 0;
        }
        *self
    }

    /// Walk backwards one character at a time while `predicate(index, offset, part)`
    /// holds for the character just before the walk position. Stops at the start
    /// of the model.
    pub fn backwards_while<P>(&self, model: &Model, mut predicate: P) -> Position
    where
        P: FnMut(usize, usize, &Part) -> bool,
    {
        let parts = model.parts();
        if parts.is_empty() {
            return *self;
        }
        let Position { mut index, mut offset } = *self;
        if index >= parts.len() {
            index = parts.len() - 1;
            offset = parts[index].len();
        }
        loop {
            let part = &parts[index];
            while offset > 0 {
                if !predicate(index, offset - 1, part) {
                    return Position::new(index, offset);
                }
                offset -= 1;
            }
            if index == 0 {
                return Position::new(index, offset);
            }
            index -= 1;
            offset = parts[index].len();
        }
    }

    /// The parts between this position and `other` (in either order) as
    /// `(index, part, start, end)`, with `start..end` the covered character range
    /// of that part
    pub fn parts_between<'m>(
        &self,
        other: &Position,
        model: &'m Model,
    ) -> Vec<(usize, &'m Part, usize, usize)> {
        let parts = model.parts();
        if parts.is_empty() {
            return Vec::new();
        }
        let (start, end) = if self <= other {
            (*self, *other)
        } else {
            (*other, *self)
        };
        if start.index == end.index {
            return match parts.get(start.index) {
                Some(part) => vec![(start.index, part, start.offset, end.offset)],
                None => Vec::new(),
            };
        }

        let mut covered = Vec::with_capacity(end.index - start.index + 1);
        let first = &parts[start.index];
        covered.push((start.index, first, start.offset, first.len()));
        for (i, part) in parts.iter().enumerate().take(end.index).skip(start.index + 1) {
            covered.push((i, part, 0, part.len()));
        }
        if let Some(last) = parts.get(end.index) {
            covered.push((end.index, last, 0, end.offset));
        }
        covered
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0 && self.offset == 0
    }

    pub fn is_at_end(&self, model: &Model) -> bool {
        *self == model.position_at_end()
    }
}

/// An absolute character offset into a model.
///
/// `at_node_end` decides which position an offset on a part boundary maps to:
/// the end of the earlier part (`true`) or the start of the later one (`false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub offset: usize,
    pub at_node_end: bool,
}

impl Offset {
    pub fn new(offset: usize, at_node_end: bool) -> Self {
        Self {
            offset,
            at_node_end,
        }
    }

    /// Move by `delta` characters.
    ///
    /// Panics if the result would fall before the start of the model.
    pub fn add(&self, delta: isize, at_node_end: bool) -> Offset {
        let offset = self.offset.checked_add_signed(delta).unwrap_or_else(|| {
            panic!(
                "offset {} moved by {delta} falls before the start of the model",
                self.offset
            )
        });
        Offset::new(offset, at_node_end)
    }

    pub fn as_position(&self, model: &Model) -> Position {
        model.position_for_offset(self.offset, self.at_node_end)
    }
}
