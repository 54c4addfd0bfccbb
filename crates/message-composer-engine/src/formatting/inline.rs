use std::ops;

use crate::editing::{Model, Part, PartCreator, Patch, Range};
use crate::formatting::replace::{
    replace_range_and_auto_adjust_caret, replace_range_and_expand_selection,
};

/// Toggle `prefix`/`suffix` around every paragraph of the range.
///
/// A paragraph already starting with `prefix` and ending with `suffix` is
/// unwrapped, any other paragraph is wrapped, so a multi-paragraph selection is
/// formatted per paragraph rather than across the blank lines between them.
pub fn toggle_inline_format(model: &mut Model, range: &Range, prefix: &str, suffix: &str) -> Patch {
    let parts = range.parts(model);
    let spans = paragraph_spans(&parts);
    log::trace!("toggling {prefix:?}..{suffix:?} over paragraphs {spans:?}");

    let creator = model.part_creator().clone();
    let mut new_parts = Vec::with_capacity(parts.len() + 2 * spans.len());
    let mut has_formatting = false;
    let mut cursor = 0;
    for span in spans {
        let (toggled, unwrapped) = toggle_paragraph(&creator, &parts[span.clone()], prefix, suffix);
        has_formatting |= unwrapped;
        new_parts.extend_from_slice(&parts[cursor..span.start]);
        new_parts.extend(toggled);
        cursor = span.end;
    }
    new_parts.extend_from_slice(&parts[cursor..]);

    if range.was_initialized_empty() && prefix == suffix {
        // Caret-only toggle: keep the caret in the word instead of selecting it
        replace_range_and_auto_adjust_caret(
            model,
            range,
            new_parts,
            has_formatting,
            prefix.chars().count(),
        )
    } else {
        replace_range_and_expand_selection(model, range, new_parts)
    }
}

/// Index ranges of the paragraph bodies in `parts`.
///
/// Paragraphs are separated by two newline parts in a row, or by a newline, a
/// blank part and another newline. Leading and trailing blank parts are not part
/// of a body, and a run of only blank parts yields no paragraph.
pub fn paragraph_spans(parts: &[Part]) -> Vec<ops::Range<usize>> {
    let mut spans = Vec::new();
    let mut segment_start = 0;
    for i in 0..parts.len() {
        if is_paragraph_break(parts, i) {
            push_body(parts, segment_start..i + 1, &mut spans);
            segment_start = i + 1;
        }
    }
    push_body(parts, segment_start..parts.len(), &mut spans);
    spans
}

/// Whether the newline at `i` closes a paragraph break
fn is_paragraph_break(parts: &[Part], i: usize) -> bool {
    if i == 0 || !parts[i].is_newline() {
        return false;
    }
    let previous = &parts[i - 1];
    previous.is_newline() || (i >= 2 && previous.is_blank() && parts[i - 2].is_newline())
}

fn push_body(parts: &[Part], segment: ops::Range<usize>, spans: &mut Vec<ops::Range<usize>>) {
    let segment_parts = &parts[segment.clone()];
    let first = segment_parts.iter().position(|part| !part.is_blank());
    let last = segment_parts.iter().rposition(|part| !part.is_blank());
    if let (Some(first), Some(last)) = (first, last) {
        spans.push(segment.start + first..segment.start + last + 1);
    }
}

/// The toggled paragraph, and whether the toggle removed existing markers
fn toggle_paragraph(
    creator: &PartCreator,
    body: &[Part],
    prefix: &str,
    suffix: &str,
) -> (Vec<Part>, bool) {
    if is_formatted(body, prefix, suffix) {
        return (unwrap_paragraph(creator, body, prefix, suffix), true);
    }
    let mut wrapped = Vec::with_capacity(body.len() + 2);
    wrapped.push(creator.plain(prefix));
    wrapped.extend_from_slice(body);
    wrapped.push(creator.plain(suffix));
    (wrapped, false)
}

fn is_formatted(body: &[Part], prefix: &str, suffix: &str) -> bool {
    let (Some(first), Some(last)) = (body.first(), body.last()) else {
        return false;
    };
    if !first.text().starts_with(prefix) || !last.text().ends_with(suffix) {
        return false;
    }
    // A lone part must hold both markers without them overlapping
    body.len() > 1 || first.text().len() >= prefix.len() + suffix.len()
}

fn unwrap_paragraph(creator: &PartCreator, body: &[Part], prefix: &str, suffix: &str) -> Vec<Part> {
    let mut unwrapped = body.to_vec();
    let last_index = unwrapped.len() - 1;

    let first = &unwrapped[0];
    let first = creator.with_text(first, first.text()[prefix.len()..].to_string());
    unwrapped[0] = first;

    // Same part as the first one when the paragraph is a single part
    let last = &unwrapped[last_index];
    let last = creator.with_text(last, last.text()[..last.text().len() - suffix.len()].to_string());
    unwrapped[last_index] = last;

    unwrapped.retain(|part| !part.is_empty());
    unwrapped
}
