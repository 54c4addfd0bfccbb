//! Replace a range's parts and choose the selection that follows the edit.

use crate::editing::{Model, Offset, Part, Patch, Range, Selection};

/// Replace the range and select exactly the new content
pub fn replace_range_and_expand_selection(
    model: &mut Model,
    range: &Range,
    parts: Vec<Part>,
) -> Patch {
    model.transform(|model| {
        let first = range.start().as_offset(model);
        let old_len = range.length(model) as isize;
        let added = range.replace(model, parts);
        let last = first.add(old_len + added, false);
        Selection::range(first.as_position(model), last.as_position(model))
    })
}

/// Replace the range and leave a caret after the new content, moved by `offset`
/// characters. `at_node_end` settles which part the caret belongs to when it
/// lands on a part boundary.
pub fn replace_range_and_move_caret(
    model: &mut Model,
    range: &Range,
    parts: Vec<Part>,
    offset: isize,
    at_node_end: bool,
) -> Patch {
    model.transform(|model| {
        let first = range.start().as_offset(model);
        let old_len = range.length(model) as isize;
        let added = range.replace(model, parts);
        let caret = first.add(old_len + added + offset, at_node_end);
        Selection::Caret(caret.as_position(model))
    })
}

/// Replace the range and put the caret back where it sat before the range was
/// widened, shifted by the `inserted_before` characters the new parts add in
/// front of it
pub fn replace_range_and_restore_caret(
    model: &mut Model,
    range: &Range,
    parts: Vec<Part>,
    inserted_before: usize,
) -> Patch {
    let last_start = range.last_starting_position().as_offset(model).offset;
    let at_range_end = last_start == range.end().as_offset(model).offset;
    model.transform(|model| {
        range.replace(model, parts);
        let caret = Offset::new(last_start, false).add(inserted_before as isize, at_range_end);
        Selection::Caret(caret.as_position(model))
    })
}

/// Replace a word that was formatted from a bare caret, keeping the caret on the
/// same character of the word.
///
/// The markers added or removed in front of the caret shift it by half the net
/// length change. A caret that sat inside a marker being removed snaps to the
/// matching edge of the unwrapped word.
pub fn replace_range_and_auto_adjust_caret(
    model: &mut Model,
    range: &Range,
    parts: Vec<Part>,
    range_has_formatting: bool,
    format_len: usize,
) -> Patch {
    let start = range.start().as_offset(model).offset;
    let last_start = range.last_starting_position().as_offset(model).offset;
    let length = range.length(model);
    let relative_offset = last_start as isize - start as isize;
    let distance_from_end = length as isize - relative_offset;
    let format_len = format_len as isize;

    if range_has_formatting {
        if relative_offset < format_len {
            // Caret was on the opening marker
            return replace_range_and_move_caret(
                model,
                range,
                parts,
                -(length as isize - 2 * format_len),
                false,
            );
        }
        if distance_from_end < format_len {
            // Caret was on the closing marker
            return replace_range_and_move_caret(model, range, parts, 0, true);
        }
    }

    model.transform(|model| {
        let added = range.replace(model, parts);
        let caret = Offset::new(last_start, false)
            .add(added / 2, distance_from_end == 0);
        Selection::Caret(caret.as_position(model))
    })
}
