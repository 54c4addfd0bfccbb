use crate::editing::{Model, Part, PartCreator, Patch, Range};
use crate::formatting::FormatMarkers;
use crate::formatting::inline::toggle_inline_format;
use crate::formatting::replace::{
    replace_range_and_expand_selection, replace_range_and_restore_caret,
};

/// True when the range starts at a part start that follows a newline part or
/// the start of the model
pub fn range_starts_at_beginning_of_line(model: &Model, range: &Range) -> bool {
    let start = range.start();
    if start.offset != 0 {
        return false;
    }
    start.index == 0 || model.parts()[start.index - 1].is_newline()
}

/// True when the range ends at a part end that precedes a newline part or the
/// end of the model
pub fn range_ends_at_end_of_line(model: &Model, range: &Range) -> bool {
    let parts = model.parts();
    let end = range.end();
    let Some(last) = parts.get(end.index) else {
        return true;
    };
    if end.offset != last.len() {
        return false;
    }
    end.index == parts.len() - 1 || parts[end.index + 1].is_newline()
}

/// Turn the range into a block quote: the quote marker goes in front of the
/// first line and after every newline, and the block is set off from the text
/// around it by newlines.
pub fn format_range_as_quote(model: &mut Model, range: &Range, markers: &FormatMarkers) -> Patch {
    let creator = model.part_creator().clone();
    let starts_at_line = range_starts_at_beginning_of_line(model, range);
    let ends_at_line = range_ends_at_end_of_line(model, range);

    let mut parts = Vec::new();
    if !starts_at_line {
        parts.push(creator.newline());
    }
    parts.push(creator.plain(markers.quote.as_str()));
    for part in range.parts(model) {
        let is_newline = part.is_newline();
        parts.push(part);
        if is_newline {
            parts.push(creator.plain(markers.quote.as_str()));
        }
    }
    if !ends_at_line {
        parts.push(creator.newline());
    }
    parts.push(creator.newline());

    if range.was_initialized_empty() {
        // A word selected from a caret holds no newline, so only the leading
        // newline and the first quote marker land before the caret
        let inserted_before = usize::from(!starts_at_line) + markers.quote.chars().count();
        replace_range_and_restore_caret(model, range, parts, inserted_before)
    } else {
        replace_range_and_expand_selection(model, range, parts)
    }
}

/// Toggle code formatting.
///
/// Text already fenced as a code block is unfenced, multi-line text is fenced,
/// and anything else gets inline code markers toggled.
pub fn format_range_as_code(model: &mut Model, range: &Range, markers: &FormatMarkers) -> Patch {
    let creator = model.part_creator().clone();
    let fence = markers.code_fence.as_str();
    let parts = range.parts(model);
    let text = range.text(model);

    let has_block_formatting = text.contains('\n')
        && text.len() >= 2 * fence.len()
        && text.starts_with(fence)
        && text.ends_with(fence);
    let needs_block_formatting = parts.iter().any(Part::is_newline);

    let new_parts = if has_block_formatting {
        log::trace!("removing code fence");
        remove_fence(&creator, parts, fence)
    } else if needs_block_formatting {
        log::trace!("adding code fence");
        let mut fenced = Vec::with_capacity(parts.len() + 6);
        if !range_starts_at_beginning_of_line(model, range) {
            fenced.push(creator.newline());
        }
        fenced.push(creator.plain(fence));
        fenced.push(creator.newline());
        fenced.extend(parts);
        fenced.push(creator.newline());
        fenced.push(creator.plain(fence));
        if !range_ends_at_end_of_line(model, range) {
            fenced.push(creator.newline());
        }
        fenced
    } else {
        let marker = markers.inline_code.as_str();
        return toggle_inline_format(model, range, marker, marker);
    };

    replace_range_and_expand_selection(model, range, new_parts)
}

/// Strip the fence from both ends, then one newline layer on each side if both
/// are present
fn remove_fence(creator: &PartCreator, parts: Vec<Part>, fence: &str) -> Vec<Part> {
    let fence_len = fence.chars().count();
    let mut parts = strip_leading_chars(creator, parts, fence_len);
    parts = strip_trailing_chars(creator, parts, fence_len);

    let wrapped_in_newlines = parts.len() >= 2
        && parts.first().is_some_and(Part::is_newline)
        && parts.last().is_some_and(Part::is_newline);
    if wrapped_in_newlines {
        parts.remove(0);
        parts.pop();
    }
    parts
}

/// Drop `count` characters from the front of the sequence, across part
/// boundaries. Parts left empty are removed.
fn strip_leading_chars(creator: &PartCreator, parts: Vec<Part>, mut count: usize) -> Vec<Part> {
    let mut stripped = Vec::with_capacity(parts.len());
    for part in parts {
        if count == 0 {
            stripped.push(part);
            continue;
        }
        let len = part.len();
        if len <= count {
            count -= len;
            continue;
        }
        stripped.push(creator.with_text(&part, part.slice(count, len)));
        count = 0;
    }
    stripped
}

fn strip_trailing_chars(creator: &PartCreator, mut parts: Vec<Part>, count: usize) -> Vec<Part> {
    parts.reverse();
    let mut remaining = count;
    let mut stripped = Vec::with_capacity(parts.len());
    for part in parts {
        if remaining == 0 {
            stripped.push(part);
            continue;
        }
        let len = part.len();
        if len <= remaining {
            remaining -= len;
            continue;
        }
        stripped.push(creator.with_text(&part, part.slice(0, len - remaining)));
        remaining = 0;
    }
    stripped.reverse();
    stripped
}
