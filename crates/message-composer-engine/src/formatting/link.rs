use std::sync::OnceLock;

use regex::Regex;

use crate::editing::{Model, Patch, Range};
use crate::formatting::replace::replace_range_and_move_caret;

fn link_regex() -> &'static Regex {
    // Whole-text Markdown link: [description](target)
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| Regex::new(r"^\[([^\]\n]*)\]\(([^)\n]*)\)$").expect("Invalid link regex"))
}

/// Wrap the range as `[text]()` with the caret between the parentheses, ready
/// for the target to be typed. A range that already is a whole Markdown link is
/// turned back into its description.
pub fn format_range_as_link(model: &mut Model, range: &Range) -> Patch {
    let creator = model.part_creator().clone();
    let text = range.text(model);

    if let Some(captures) = link_regex().captures(&text) {
        let description = &captures[1];
        log::trace!("unlinking {description:?} from {:?}", &captures[2]);
        let parts = if description.is_empty() {
            Vec::new()
        } else {
            vec![creator.plain(description)]
        };
        return replace_range_and_move_caret(model, range, parts, 0, true);
    }

    let mut parts = Vec::with_capacity(3);
    parts.push(creator.plain("["));
    parts.extend(range.parts(model));
    parts.push(creator.plain("]()"));
    replace_range_and_move_caret(model, range, parts, -1, false)
}
