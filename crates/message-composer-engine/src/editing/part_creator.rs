use crate::editing::{Part, PartKind, SerializedPart};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartError {
    #[error("{kind} part contains a line break: {text:?}")]
    EmbeddedNewline { kind: &'static str, text: String },
    #[error("{kind} part has an empty resource id")]
    EmptyResourceId { kind: &'static str },
}

/// Factory for parts of every kind.
///
/// All parts, including copies made while formatting, are created here so the
/// newline invariant holds for the whole model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartCreator;

impl PartCreator {
    pub fn new() -> Self {
        Self
    }

    /// Plain text part. The text must not contain a line break; use
    /// [`PartCreator::parse_plain_text`] for multi-line text.
    pub fn plain(&self, text: impl Into<String>) -> Part {
        self.build(PartKind::Plain, text.into())
    }

    pub fn newline(&self) -> Part {
        Part {
            kind: PartKind::Newline,
            text: "\n".to_string(),
        }
    }

    pub fn command(&self, text: impl Into<String>) -> Part {
        self.build(PartKind::Command, text.into())
    }

    pub fn pill_candidate(&self, text: impl Into<String>) -> Part {
        self.build(PartKind::PillCandidate, text.into())
    }

    pub fn user_pill(&self, display_name: impl Into<String>, user_id: impl Into<String>) -> Part {
        self.build(
            PartKind::UserPill {
                resource_id: user_id.into(),
            },
            display_name.into(),
        )
    }

    pub fn room_pill(&self, alias: impl Into<String>, room_id: impl Into<String>) -> Part {
        self.build(
            PartKind::RoomPill {
                resource_id: room_id.into(),
            },
            alias.into(),
        )
    }

    pub fn at_room_pill(&self) -> Part {
        self.build(PartKind::AtRoomPill, "@room".to_string())
    }

    pub fn emoji(&self, text: impl Into<String>) -> Part {
        self.build(PartKind::Emoji, text.into())
    }

    /// Split text into plain and newline parts, one newline part per line break.
    /// Empty lines produce no plain part.
    pub fn parse_plain_text(&self, text: &str) -> Vec<Part> {
        let mut parts = Vec::new();
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                parts.push(self.newline());
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            if !line.is_empty() {
                parts.push(self.plain(line));
            }
        }
        parts
    }

    /// Re-create a part from its serialized record, validating text supplied
    /// from outside the engine
    pub fn deserialize_part(&self, record: SerializedPart) -> Result<Part, PartError> {
        validate(&record)?;
        Ok(self.rebuild(record))
    }

    pub fn deserialize_parts(
        &self,
        records: impl IntoIterator<Item = SerializedPart>,
    ) -> Result<Vec<Part>, PartError> {
        records
            .into_iter()
            .map(|record| self.deserialize_part(record))
            .collect()
    }

    /// Copy of `part` with different text, going through the serialized form
    /// so entity metadata survives the edit
    pub(crate) fn with_text(&self, part: &Part, text: String) -> Part {
        let mut record = part.serialize();
        record.set_text(text);
        self.rebuild(record)
    }

    fn rebuild(&self, record: SerializedPart) -> Part {
        match record {
            SerializedPart::Plain { text } => self.build(PartKind::Plain, text),
            SerializedPart::Newline => self.newline(),
            SerializedPart::Command { text } => self.build(PartKind::Command, text),
            SerializedPart::PillCandidate { text } => self.build(PartKind::PillCandidate, text),
            SerializedPart::UserPill { text, resource_id } => {
                self.build(PartKind::UserPill { resource_id }, text)
            }
            SerializedPart::RoomPill { text, resource_id } => {
                self.build(PartKind::RoomPill { resource_id }, text)
            }
            SerializedPart::AtRoomPill { text } => self.build(PartKind::AtRoomPill, text),
            SerializedPart::Emoji { text } => self.build(PartKind::Emoji, text),
        }
    }

    fn build(&self, kind: PartKind, text: String) -> Part {
        debug_assert!(
            !text.contains('\n'),
            "{} part must not contain a line break",
            kind.name()
        );
        Part { kind, text }
    }
}

fn validate(record: &SerializedPart) -> Result<(), PartError> {
    let kind = match record {
        SerializedPart::Newline => return Ok(()),
        SerializedPart::Plain { .. } => "plain",
        SerializedPart::Command { .. } => "command",
        SerializedPart::PillCandidate { .. } => "pill-candidate",
        SerializedPart::UserPill { resource_id, .. } if resource_id.is_empty() => {
            return Err(PartError::EmptyResourceId { kind: "user-pill" });
        }
        SerializedPart::RoomPill { resource_id, .. } if resource_id.is_empty() => {
            return Err(PartError::EmptyResourceId { kind: "room-pill" });
        }
        SerializedPart::UserPill { .. } => "user-pill",
        SerializedPart::RoomPill { .. } => "room-pill",
        SerializedPart::AtRoomPill { .. } => "at-room-pill",
        SerializedPart::Emoji { .. } => "emoji",
    };
    if record.text().contains('\n') {
        return Err(PartError::EmbeddedNewline {
            kind,
            text: record.text().to_string(),
        });
    }
    Ok(())
}
