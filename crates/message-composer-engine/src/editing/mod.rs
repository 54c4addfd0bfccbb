/*!
 * # Editing Core Module
 *
 * This module implements the part-based message model that the formatting
 * engine operates on.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: the Part sequence
 * - A message is an ordered sequence of typed **Parts** (plain text, newline,
 *   pills and other inline entities)
 * - The **`Model`** owns that sequence and is the only place it is stored
 * - Parts are the unit of replacement: edits swap whole parts in and out,
 *   splitting a part at a range boundary first when needed
 *
 * ### 2. Coordinates
 * - A **`Position`** is a `(part index, offset within part)` pair
 * - An **`Offset`** is an absolute character count from the start of the model,
 *   plus an "at node end" flag resolving the tie at a part boundary
 * - All offsets count `char`s, never bytes
 *
 * ### 3. Ranges
 * - A **`Range`** is an ordered `[start, end)` pair of positions plus a flag
 *   recording whether it began as a bare caret
 * - Ranges provide text extraction, trimming, expansion by predicate and the
 *   structural `replace` used by every formatter
 *
 * ### 4. Transactional Mutation
 * - Part mutation only happens inside **`Model::transform`**, whose callback
 *   returns the new **`Selection`** (a caret or a range)
 * - Each transform bumps the model version and yields a **`Patch`** describing
 *   the installed selection
 *
 * ## Module Structure
 *
 * - **`part`**: `Part`, `PartKind` and the serialized `SerializedPart` record
 * - **`part_creator`**: factory for every part kind and for deserialization
 * - **`model`**: `Model`, `Selection` and the transform scope
 * - **`position`**: `Position` and `Offset` with their conversions
 * - **`range`**: the `Range` selection abstraction
 * - **`patch`**: result of a transform
 *
 * ## Usage Pattern
 *
 * ```rust
 * use message_composer_engine::editing::*;
 *
 * let mut model = Model::from_text("hello world");
 * let range = model.start_range(Position::new(0, 6), Position::new(0, 11));
 *
 * let patch = model.transform(|model| {
 *     let parts = vec![model.part_creator().plain("there")];
 *     range.replace(model, parts);
 *     Selection::Caret(Position::new(1, 5))
 * });
 *
 * assert_eq!(model.text(), "hello there");
 * assert_eq!(patch.version, 1);
 * ```
 */

pub mod model;
pub mod part;
pub mod part_creator;
pub mod patch;
pub mod position;
pub mod range;

// Public API re-exports
pub use model::{Model, Selection};
pub use part::{Part, PartKind, SerializedPart};
pub use part_creator::{PartCreator, PartError};
pub use patch::Patch;
pub use position::{Offset, Position};
pub use range::Range;
