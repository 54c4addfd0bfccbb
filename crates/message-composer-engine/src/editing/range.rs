use crate::editing::{Model, Part, Position};

/// A `[start, end)` selection over a model, or a caret when both ends meet.
///
/// Ranges are plain values computed against one model snapshot; every method
/// that reads or writes parts takes the model explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    start: Position,
    end: Position,
    /// Where the caret sat before any expansion; restored after caret-only toggles
    last_start: Position,
    initialized_empty: bool,
}

impl Range {
    /// Range between two positions, given in either order
    pub fn new(a: Position, b: Position) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self {
            start,
            end,
            last_start: start,
            initialized_empty: start == end,
        }
    }

    pub fn caret(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// True if the range was a bare caret when created
    pub fn was_initialized_empty(&self) -> bool {
        self.initialized_empty
    }

    pub fn set_was_empty(&mut self, value: bool) {
        self.initialized_empty = value;
    }

    pub fn last_starting_position(&self) -> Position {
        self.last_start
    }

    pub fn set_last_starting_position(&mut self, pos: Position) {
        self.last_start = pos;
    }

    /// Length in characters
    pub fn length(&self, model: &Model) -> usize {
        self.end.as_offset(model).offset - self.start.as_offset(model).offset
    }

    pub fn text(&self, model: &Model) -> String {
        self.start
            .parts_between(&self.end, model)
            .into_iter()
            .map(|(_, part, start, end)| part.slice(start, end))
            .collect()
    }

    /// Copies of the covered parts, partial parts cut down to the covered text.
    /// Parts with no covered text are left out.
    pub fn parts(&self, model: &Model) -> Vec<Part> {
        let creator = model.part_creator();
        self.start
            .parts_between(&self.end, model)
            .into_iter()
            .filter(|(_, _, start, end)| start < end)
            .map(|(_, part, start, end)| {
                if start == 0 && end == part.len() {
                    part.clone()
                } else {
                    creator.with_text(part, part.slice(start, end))
                }
            })
            .collect()
    }

    /// Shrink both ends past whitespace and newline parts. A range holding only
    /// whitespace collapses onto its end.
    pub fn trim(&mut self, model: &Model) {
        if self.text(model).trim().is_empty() {
            self.start = self.end;
            return;
        }
        self.start = self.start.forwards_while(model, is_whitespace_at);
        self.end = self.end.backwards_while(model, is_whitespace_at);
    }

    pub fn expand_forwards_while<P>(&mut self, model: &Model, predicate: P)
    where
        P: FnMut(usize, usize, &Part) -> bool,
    {
        self.end = self.end.forwards_while(model, predicate);
    }

    pub fn expand_backwards_while<P>(&mut self, model: &Model, predicate: P)
    where
        P: FnMut(usize, usize, &Part) -> bool,
    {
        self.start = self.start.backwards_while(model, predicate);
    }

    /// Move the start forwards by `delta` characters
    pub fn move_start_forwards(&mut self, model: &Model, mut delta: usize) {
        self.start = self.start.forwards_while(model, |_, _, _| {
            if delta == 0 {
                return false;
            }
            delta -= 1;
            true
        });
        if self.start > self.end {
            self.end = self.start;
        }
    }

    /// Move the end backwards by `delta` characters
    pub fn move_end_backwards(&mut self, model: &Model, mut delta: usize) {
        self.end = self.end.backwards_while(model, |_, _, _| {
            if delta == 0 {
                return false;
            }
            delta -= 1;
            true
        });
        if self.end < self.start {
            self.start = self.end;
        }
    }

    /// Replace the covered parts with `parts` and return the net number of
    /// characters added (negative when the range shrank).
    ///
    /// Run this inside [`Model::transform`].
    pub fn replace(&self, model: &mut Model, parts: Vec<Part>) -> isize {
        let new_len: usize = parts.iter().map(Part::len).sum();
        let old_len = self.length(model);
        model.replace_range(self.start, self.end, parts);
        new_len as isize - old_len as isize
    }
}

fn is_whitespace_at(_index: usize, offset: usize, part: &Part) -> bool {
    part.char_at(offset).is_some_and(char::is_whitespace)
}
