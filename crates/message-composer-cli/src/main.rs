use anyhow::{Context, Result, bail};
use clap::Parser;
use message_composer_config::{Config, MarkerConfig};
use message_composer_engine::{
    FormatMarkers, Formatting, Model, PartCreator, Range, SerializedPart, format_range_with,
};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

/// Apply composer formatting actions to a message
#[derive(Parser, Debug)]
#[command(name = "message-composer", version)]
struct Args {
    /// Config file to use instead of ~/.config/message-composer/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Read and write serialized parts as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Formatting action: bold, italics, strikethrough, code, quote or insert-link
    #[arg(short, long = "action", value_name = "ACTION", required = true, value_delimiter = ',')]
    actions: Vec<Formatting>,

    /// Selection start as a character offset (default: 0)
    #[arg(long, value_name = "N")]
    start: Option<usize>,

    /// Selection end as a character offset (default: end of the message)
    #[arg(long, value_name = "N")]
    end: Option<usize>,

    /// Message file; reads stdin when omitted
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Output {
    parts: Vec<SerializedPart>,
    selection: SelectionOffsets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct SelectionOffsets {
    start: usize,
    end: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let markers = markers_from_config(&config.markers);

    let input = read_input(args.input.as_ref())?;
    let mut model = load_model(&input, args.json)?;
    let range = initial_range(&model, args.start, args.end)?;

    let selection = apply_actions(&mut model, range, &args.actions, &markers);

    if args.json {
        let output = Output {
            parts: model.serialize_parts(),
            selection,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print!("{}", model.text());
        eprintln!("selection: {}..{}", selection.start, selection.end);
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
            Config::load_from_path(&path)?
        }
        None => Config::load()?,
    };
    log::debug!("loaded config: {config:?}");
    Ok(config)
}

/// Built-in markers with the configured overrides applied
fn markers_from_config(config: &MarkerConfig) -> FormatMarkers {
    let defaults = FormatMarkers::default();
    let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);
    FormatMarkers {
        bold: pick(&config.bold, defaults.bold),
        italics: pick(&config.italics, defaults.italics),
        strikethrough_open: pick(&config.strikethrough_open, defaults.strikethrough_open),
        strikethrough_close: pick(&config.strikethrough_close, defaults.strikethrough_close),
        inline_code: pick(&config.inline_code, defaults.inline_code),
        code_fence: pick(&config.code_fence, defaults.code_fence),
        quote: pick(&config.quote, defaults.quote),
        word_punctuation: match &config.word_punctuation {
            Some(chars) => chars.chars().collect(),
            None => defaults.word_punctuation,
        },
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn load_model(input: &str, json: bool) -> Result<Model> {
    let creator = PartCreator::new();
    if json {
        let records: Vec<SerializedPart> =
            serde_json::from_str(input).context("Failed to parse serialized parts")?;
        Ok(Model::from_serialized(records, creator).context("Invalid serialized part")?)
    } else {
        let parts = creator.parse_plain_text(input);
        Ok(Model::new(parts, creator))
    }
}

/// Selection from character offsets, checked against the message length
fn initial_range(model: &Model, start: Option<usize>, end: Option<usize>) -> Result<Range> {
    let len = model.len();
    let start = start.unwrap_or(0);
    let end = end.unwrap_or(len);
    if end > len {
        bail!("Selection end {end} is beyond the end of the message (length {len})");
    }
    if start > end {
        bail!("Selection start {start} is after selection end {end}");
    }

    let start_pos = model.position_for_offset(start, false);
    let end_pos = model.position_for_offset(end, start != end);
    Ok(model.start_range(start_pos, end_pos))
}

/// Apply each action to the selection left by the previous one. An action with
/// nothing to format keeps the selection as it was.
fn apply_actions(
    model: &mut Model,
    mut range: Range,
    actions: &[Formatting],
    markers: &FormatMarkers,
) -> SelectionOffsets {
    for &action in actions {
        match format_range_with(model, range, action, markers) {
            Some(patch) => range = patch.selection.to_range(),
            None => log::info!("{action}: nothing to format"),
        }
    }
    SelectionOffsets {
        start: range.start().as_offset(model).offset,
        end: range.end().as_offset(model).offset,
    }
}
