//! Behaviour tests for `format_range`.
//!
//! Inputs and results are written as text with the selection marked inline:
//! `|` is a caret, `«` and `»` enclose a selection.

use super::*;
use crate::editing::{Part, PartCreator, Position, Selection};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Model for marked-up text, with its selection set from the markers
fn setup(marked: &str) -> Model {
    let mut text = String::new();
    let mut start = None;
    let mut end = None;
    for c in marked.chars() {
        let offset = text.chars().count();
        match c {
            '|' => {
                start = Some(offset);
                end = Some(offset);
            }
            '«' => start = Some(offset),
            '»' => end = Some(offset),
            _ => text.push(c),
        }
    }
    let mut model = Model::from_text(&text);
    let start = start.expect("marked text needs a caret or selection");
    let end = end.expect("selection is missing its end marker");
    let selection = Selection::range(
        model.position_for_offset(start, false),
        model.position_for_offset(end, start != end),
    );
    model.set_selection(selection);
    model
}

/// Text with the current selection marked the same way as `setup` input
fn render(model: &Model) -> String {
    let selection = model.selection_offsets();
    let chars: Vec<char> = model.text().chars().collect();
    let mut out = String::new();
    for i in 0..=chars.len() {
        if selection.is_empty() {
            if i == selection.start {
                out.push('|');
            }
        } else {
            if i == selection.start {
                out.push('«');
            }
            if i == selection.end {
                out.push('»');
            }
        }
        if let Some(c) = chars.get(i) {
            out.push(*c);
        }
    }
    out
}

fn apply(model: &mut Model, action: Formatting) -> Option<Patch> {
    let range = model.selection().to_range();
    format_range(model, range, action)
}

fn texts(model: &Model) -> Vec<&str> {
    model.parts().iter().map(Part::text).collect()
}

#[rstest]
#[case::bold_word("hello wo|rld.", Formatting::Bold, "hello **wo|rld**.")]
#[case::bold_caret_at_word_start("hello |world.", Formatting::Bold, "hello **|world**.")]
#[case::bold_caret_before_punctuation("hello world|.", Formatting::Bold, "hello **world|**.")]
#[case::bold_selection("say «something» now", Formatting::Bold, "say «**something**» now")]
#[case::bold_trims_selection("say« something »now", Formatting::Bold, "say «**something**» now")]
#[case::italics_word("x wo|rd y", Formatting::Italics, "x _wo|rd_ y")]
#[case::strikethrough_word("a wo|rd", Formatting::Strikethrough, "a «<del>word</del>»")]
#[case::code_word("use fo|o here", Formatting::Code, "use `fo|o` here")]
#[case::unbold_word("hello **wo|rld**.", Formatting::Bold, "hello wo|rld.")]
#[case::unbold_caret_on_opening_marker("hello *|*world**.", Formatting::Bold, "hello |world.")]
#[case::unbold_caret_on_closing_marker("hello **world*|*.", Formatting::Bold, "hello world|.")]
#[case::unbold_selection("«**bold**»", Formatting::Bold, "«bold»")]
#[case::unstrike_selection("«<del>gone</del>»", Formatting::Strikethrough, "«gone»")]
#[case::bold_word_of_marker_chars("*|*", Formatting::Bold, "***|***")]
#[case::italics_word_of_marker_char("a |_ b", Formatting::Italics, "a _|__ b")]
#[case::link_word("see wo|rld", Formatting::InsertLink, "see [world](|)")]
#[case::link_selection("«two words»", Formatting::InsertLink, "[two words](|)")]
#[case::unlink_selection("«[docs](https://example.org)»", Formatting::InsertLink, "docs|")]
fn test_format_range(#[case] input: &str, #[case] action: Formatting, #[case] expected: &str) {
    let mut model = setup(input);
    let patch = apply(&mut model, action);

    assert!(patch.is_some(), "{action} should have changed {input:?}");
    assert_eq!(render(&model), expected);
}

#[rstest]
#[case::whitespace_selection("a«  »b")]
#[case::newline_selection("a«\n\n»b")]
#[case::caret_between_spaces("hello | world")]
#[case::caret_on_punctuation_run("end.|.")]
#[case::empty_model("|")]
fn test_nothing_to_format_is_a_no_op(#[case] input: &str) {
    for action in Formatting::ALL {
        let mut model = setup(input);
        let before = model.parts().to_vec();

        assert_eq!(apply(&mut model, action), None, "{action} on {input:?}");
        assert_eq!(model.parts(), before.as_slice());
        assert_eq!(model.version(), 0);
    }
}

#[rstest]
#[case::bold_caret(Formatting::Bold, "hello wo|rld.")]
#[case::italics_caret(Formatting::Italics, "x wo|rd y")]
#[case::code_caret(Formatting::Code, "use fo|o here")]
#[case::bold_selection(Formatting::Bold, "say «something» now")]
#[case::italics_selection(Formatting::Italics, "«some words»")]
#[case::strikethrough_selection(Formatting::Strikethrough, "say «something» now")]
#[case::strikethrough_caret(Formatting::Strikethrough, "a wo|rd")]
#[case::code_inline_selection(Formatting::Code, "run «cargo test» now")]
#[case::code_block_selection(Formatting::Code, "«a\nb»")]
#[case::bold_paragraphs(Formatting::Bold, "«one\n\ntwo»")]
fn test_toggling_twice_restores_text(#[case] action: Formatting, #[case] input: &str) {
    let mut model = setup(input);
    let original = model.text();

    apply(&mut model, action).unwrap();
    assert_ne!(model.text(), original);
    apply(&mut model, action).unwrap();

    assert_eq!(model.text(), original);
}

#[test]
fn test_caret_round_trip_restores_caret() {
    let mut model = setup("hello wo|rld.");
    apply(&mut model, Formatting::Bold);
    apply(&mut model, Formatting::Bold);
    assert_eq!(render(&model), "hello wo|rld.");
}

#[test]
fn test_word_expansion_excludes_punctuation() {
    let mut model = setup("hello wor|ld.");
    apply(&mut model, Formatting::Bold);

    insta::assert_snapshot!(model.text(), @"hello **world**.");
}

#[test]
fn test_paragraphs_are_wrapped_independently() {
    let mut model = setup("«one\n\ntwo»");
    apply(&mut model, Formatting::Bold);

    assert_eq!(render(&model), "«**one**\n\n**two**»");
    assert_eq!(
        texts(&model),
        vec!["**", "one", "**", "\n", "\n", "**", "two", "**"]
    );
}

#[test]
fn test_paragraphs_separated_by_blank_line_with_spaces() {
    let mut model = setup("«one\n  \ntwo\nthree»");
    apply(&mut model, Formatting::Italics);

    assert_eq!(model.text(), "_one_\n  \n_two\nthree_");
}

#[test]
fn test_mixed_paragraphs_toggle_individually() {
    let mut model = setup("«**one**\n\ntwo»");
    apply(&mut model, Formatting::Bold);

    assert_eq!(model.text(), "one\n\n**two**");
}

#[test]
fn test_quote_whole_line() {
    let mut model = setup("«hi»");
    apply(&mut model, Formatting::Quote);

    assert_eq!(texts(&model), vec!["> ", "hi", "\n"]);
    assert_eq!(render(&model), "«> hi\n»");
}

#[test]
fn test_quote_inside_line() {
    let mut model = setup("say «hi» now");
    apply(&mut model, Formatting::Quote);

    assert_eq!(render(&model), "say «\n> hi\n\n» now");
}

#[test]
fn test_quote_every_line() {
    let mut model = setup("«a\nb»");
    apply(&mut model, Formatting::Quote);

    assert_eq!(render(&model), "«> a\n> b\n»");
}

#[test]
fn test_quote_from_caret_restores_caret() {
    let mut model = setup("hel|lo");
    apply(&mut model, Formatting::Quote);

    assert_eq!(render(&model), "> hel|lo\n");
    assert_eq!(model.selection(), Selection::Caret(Position::new(1, 3)));
}

#[rstest]
#[case::word_start("|hello", "> |hello\n")]
#[case::word_end("hello|", "> hello|\n")]
#[case::inside_line("say wo|rd now", "say \n> wo|rd\n\n now")]
fn test_quote_from_caret_positions(#[case] input: &str, #[case] expected: &str) {
    let mut model = setup(input);
    apply(&mut model, Formatting::Quote);

    assert_eq!(render(&model), expected);
}

#[test]
fn test_code_fence_removed() {
    let mut model = setup("«```\nfoo\n```»");
    apply(&mut model, Formatting::Code);

    assert_eq!(texts(&model), vec!["foo"]);
    assert_eq!(render(&model), "«foo»");
}

#[test]
fn test_code_block_added_on_own_lines() {
    let mut model = setup("«a\nb»");
    apply(&mut model, Formatting::Code);

    assert_eq!(render(&model), "«```\na\nb\n```»");
}

#[test]
fn test_code_block_inside_line_is_set_apart() {
    let mut model = setup("x «a\nb» y");
    apply(&mut model, Formatting::Code);

    assert_eq!(render(&model), "x «\n```\na\nb\n```\n» y");
}

#[test]
fn test_link_parts_and_caret() {
    let mut model = setup("see wo|rld");
    apply(&mut model, Formatting::InsertLink);

    assert_eq!(texts(&model), vec!["see ", "[", "world", "]()"]);
    assert_eq!(model.selection(), Selection::Caret(Position::new(3, 2)));
}

#[test]
fn test_pill_survives_toggle() {
    let creator = PartCreator::new();
    let mut model = Model::new(
        vec![
            creator.plain("hi "),
            creator.user_pill("Alice", "@alice:example.org"),
        ],
        creator.clone(),
    );
    let end = model.position_at_end();
    model.set_selection(Selection::range(Position::new(0, 0), end));

    apply(&mut model, Formatting::Bold);
    assert_eq!(texts(&model), vec!["**", "hi ", "Alice", "**"]);

    apply(&mut model, Formatting::Bold);
    assert_eq!(
        model.parts(),
        &[
            creator.plain("hi "),
            creator.user_pill("Alice", "@alice:example.org")
        ]
    );
}

#[test]
fn test_caret_on_pill_is_not_a_word() {
    let creator = PartCreator::new();
    let mut model = Model::new(
        vec![creator.user_pill("Alice", "@alice:example.org")],
        creator,
    );
    model.set_selection(Selection::Caret(Position::new(0, 2)));

    assert_eq!(apply(&mut model, Formatting::Bold), None);
}

#[test]
fn test_custom_markers() {
    let markers = FormatMarkers {
        bold: "__".to_string(),
        quote: ">".to_string(),
        ..FormatMarkers::default()
    };
    let mut model = setup("hello wo|rld");
    let range = model.selection().to_range();
    format_range_with(&mut model, range, Formatting::Bold, &markers);
    assert_eq!(render(&model), "hello __wo|rld__");

    let mut model = setup("«hi»");
    let range = model.selection().to_range();
    format_range_with(&mut model, range, Formatting::Quote, &markers);
    assert_eq!(model.text(), ">hi\n");
}

#[test]
fn test_custom_word_punctuation() {
    let markers = FormatMarkers {
        word_punctuation: vec![':'],
        ..FormatMarkers::default()
    };
    let mut model = setup("key:va|l.ue");
    let range = model.selection().to_range();
    format_range_with(&mut model, range, Formatting::Italics, &markers);

    assert_eq!(model.text(), "key:_val.ue_");
}

#[rstest]
#[case::bold(Formatting::Bold, "«one\n\ntwo»")]
#[case::strikethrough(Formatting::Strikethrough, "x «a b» y")]
#[case::code_block(Formatting::Code, "x «a\nb» y")]
#[case::quote(Formatting::Quote, "say «hi» now")]
fn test_selection_covers_replaced_content(#[case] action: Formatting, #[case] input: &str) {
    let mut model = setup(input);
    let mut range = model.selection().to_range();
    range.trim(&model);
    let old_len = range.length(&model) as isize;
    let old_model_len = model.len() as isize;

    let patch = apply(&mut model, action).unwrap();

    assert_eq!(patch.length_delta, model.len() as isize - old_model_len);
    assert_eq!(
        model.selection_offsets().len() as isize,
        old_len + patch.length_delta
    );
}

#[test]
fn test_each_format_is_one_transform() {
    let mut model = setup("hello wo|rld.");
    let patch = apply(&mut model, Formatting::Italics).unwrap();
    assert_eq!(patch.version, 1);
    assert_eq!(model.version(), 1);
    assert_eq!(patch.selection, model.selection());
}

#[rstest]
#[case("bold", Formatting::Bold)]
#[case("Italics", Formatting::Italics)]
#[case("STRIKETHROUGH", Formatting::Strikethrough)]
#[case("insert-link", Formatting::InsertLink)]
fn test_parse_formatting(#[case] input: &str, #[case] expected: Formatting) {
    assert_eq!(input.parse::<Formatting>(), Ok(expected));
}

#[test]
fn test_parse_unknown_formatting() {
    let err = "underline".parse::<Formatting>().unwrap_err();
    assert_eq!(err.to_string(), "unknown formatting action: underline");
}
