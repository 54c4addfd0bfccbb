//! Range formatting: Markdown-style inline and block toggles over a [`Range`].
//!
//! [`format_range`] is the single entry point a host UI calls. It widens a caret
//! to the word under it (or trims a real selection), then applies or removes the
//! requested formatting in one [`Model::transform`] and leaves a caret or
//! selection that follows the edited text.

mod block;
mod inline;
mod link;
mod replace;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::editing::{Model, Part, Patch, Range};

pub use block::{
    format_range_as_code, format_range_as_quote, range_ends_at_end_of_line,
    range_starts_at_beginning_of_line,
};
pub use inline::{paragraph_spans, toggle_inline_format};
pub use link::format_range_as_link;
pub use replace::{
    replace_range_and_auto_adjust_caret, replace_range_and_expand_selection,
    replace_range_and_move_caret, replace_range_and_restore_caret,
};

/// Formatting actions offered by the composer toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Formatting {
    Bold,
    Italics,
    Strikethrough,
    Code,
    Quote,
    InsertLink,
}

impl Formatting {
    pub const ALL: [Formatting; 6] = [
        Formatting::Bold,
        Formatting::Italics,
        Formatting::Strikethrough,
        Formatting::Code,
        Formatting::Quote,
        Formatting::InsertLink,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Formatting::Bold => "bold",
            Formatting::Italics => "italics",
            Formatting::Strikethrough => "strikethrough",
            Formatting::Code => "code",
            Formatting::Quote => "quote",
            Formatting::InsertLink => "insert-link",
        }
    }
}

impl std::fmt::Display for Formatting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown formatting action: {0}")]
pub struct FormattingParseError(pub String);

impl FromStr for Formatting {
    type Err = FormattingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formatting::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FormattingParseError(s.to_string()))
    }
}

/// Marker strings written around formatted text, and the characters that end a
/// word when a caret is widened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatMarkers {
    pub bold: String,
    pub italics: String,
    pub strikethrough_open: String,
    pub strikethrough_close: String,
    pub inline_code: String,
    pub code_fence: String,
    pub quote: String,
    pub word_punctuation: Vec<char>,
}

impl Default for FormatMarkers {
    fn default() -> Self {
        Self {
            bold: "**".to_string(),
            italics: "_".to_string(),
            strikethrough_open: "<del>".to_string(),
            strikethrough_close: "</del>".to_string(),
            inline_code: "`".to_string(),
            code_fence: "```".to_string(),
            quote: "> ".to_string(),
            word_punctuation: vec!['.', ',', '?', '!'],
        }
    }
}

/// Apply `action` to `range` using the default markers.
///
/// Returns `None` without touching the model when there is nothing to format:
/// the selection held only whitespace, or the caret was not inside a word.
pub fn format_range(model: &mut Model, range: Range, action: Formatting) -> Option<Patch> {
    format_range_with(model, range, action, &FormatMarkers::default())
}

pub fn format_range_with(
    model: &mut Model,
    mut range: Range,
    action: Formatting,
    markers: &FormatMarkers,
) -> Option<Patch> {
    if range.was_initialized_empty() {
        select_range_of_word_at_caret(model, &mut range, &markers.word_punctuation);
    } else {
        range.trim(model);
    }

    if range.length(model) == 0 {
        log::debug!("{action}: nothing but whitespace selected, skipping");
        return None;
    }
    log::trace!("{action}: formatting {:?}", range.text(model));

    let patch = match action {
        Formatting::Bold => toggle_inline_format(model, &range, &markers.bold, &markers.bold),
        Formatting::Italics => {
            toggle_inline_format(model, &range, &markers.italics, &markers.italics)
        }
        Formatting::Strikethrough => toggle_inline_format(
            model,
            &range,
            &markers.strikethrough_open,
            &markers.strikethrough_close,
        ),
        Formatting::Code => format_range_as_code(model, &range, markers),
        Formatting::Quote => format_range_as_quote(model, &range, markers),
        Formatting::InsertLink => format_range_as_link(model, &range),
    };
    Some(patch)
}

/// Widen a caret to the word around it: the run of plain-part characters that
/// are neither whitespace nor one of `punctuation`
pub fn select_range_of_word_at_caret(model: &Model, range: &mut Range, punctuation: &[char]) {
    let is_word_char = |_index: usize, offset: usize, part: &Part| {
        part.is_plain()
            && part
                .char_at(offset)
                .is_some_and(|c| !c.is_whitespace() && !punctuation.contains(&c))
    };
    range.expand_forwards_while(model, is_word_char);
    range.expand_backwards_while(model, is_word_char);
    range.trim(model);
}

#[cfg(test)]
mod tests;
