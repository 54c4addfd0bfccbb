use serde::{Deserialize, Serialize};

/// The kind of a part, with any entity metadata the kind carries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartKind {
    Plain,
    Newline,
    /// Slash command such as `/me`
    Command,
    /// Text being typed that may still become a pill (`@ali`)
    PillCandidate,
    UserPill {
        resource_id: String,
    },
    RoomPill {
        resource_id: String,
    },
    AtRoomPill,
    Emoji,
}

impl PartKind {
    /// Name used in serialized records and log output
    pub fn name(&self) -> &'static str {
        match self {
            PartKind::Plain => "plain",
            PartKind::Newline => "newline",
            PartKind::Command => "command",
            PartKind::PillCandidate => "pill-candidate",
            PartKind::UserPill { .. } => "user-pill",
            PartKind::RoomPill { .. } => "room-pill",
            PartKind::AtRoomPill => "at-room-pill",
            PartKind::Emoji => "emoji",
        }
    }
}

/// A typed text fragment of a message.
///
/// Newline parts always hold exactly `"\n"`; every other kind holds zero or
/// more characters without a line break. Parts are only built through
/// [`crate::editing::PartCreator`], which enforces that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub(crate) kind: PartKind,
    pub(crate) text: String,
}

impl Part {
    pub fn kind(&self) -> &PartKind {
        &self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_newline(&self) -> bool {
        self.kind == PartKind::Newline
    }

    pub fn is_plain(&self) -> bool {
        self.kind == PartKind::Plain
    }

    /// True when the text has no non-whitespace character. Newline parts are blank.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Character at a character offset within this part
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    /// Text between two character offsets
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    /// Split off the text after `offset`, keeping the kind for both halves
    pub(crate) fn split_off(&mut self, offset: usize) -> Part {
        let byte_offset = self
            .text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(i, _)| i);
        let tail = self.text.split_off(byte_offset);
        Part {
            kind: self.kind.clone(),
            text: tail,
        }
    }

    /// Convert into the plain record used for storage and re-creation
    pub fn serialize(&self) -> SerializedPart {
        let text = self.text.clone();
        match &self.kind {
            PartKind::Plain => SerializedPart::Plain { text },
            PartKind::Newline => SerializedPart::Newline,
            PartKind::Command => SerializedPart::Command { text },
            PartKind::PillCandidate => SerializedPart::PillCandidate { text },
            PartKind::UserPill { resource_id } => SerializedPart::UserPill {
                text,
                resource_id: resource_id.clone(),
            },
            PartKind::RoomPill { resource_id } => SerializedPart::RoomPill {
                text,
                resource_id: resource_id.clone(),
            },
            PartKind::AtRoomPill => SerializedPart::AtRoomPill { text },
            PartKind::Emoji => SerializedPart::Emoji { text },
        }
    }
}

/// Serialized form of a [`Part`].
///
/// ```json
/// [{"type": "plain", "text": "hi "}, {"type": "user-pill", "text": "Alice", "resource_id": "@alice:example.org"}, {"type": "newline"}]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SerializedPart {
    Plain { text: String },
    Newline,
    Command { text: String },
    PillCandidate { text: String },
    UserPill { text: String, resource_id: String },
    RoomPill { text: String, resource_id: String },
    AtRoomPill { text: String },
    Emoji { text: String },
}

impl SerializedPart {
    /// The record's text; newline records always yield `"\n"`
    pub fn text(&self) -> &str {
        match self {
            SerializedPart::Newline => "\n",
            SerializedPart::Plain { text }
            | SerializedPart::Command { text }
            | SerializedPart::PillCandidate { text }
            | SerializedPart::UserPill { text, .. }
            | SerializedPart::RoomPill { text, .. }
            | SerializedPart::AtRoomPill { text }
            | SerializedPart::Emoji { text } => text,
        }
    }

    /// Replace the record's text. Newline records have no editable text.
    pub fn set_text(&mut self, new_text: String) {
        match self {
            SerializedPart::Newline => {}
            SerializedPart::Plain { text }
            | SerializedPart::Command { text }
            | SerializedPart::PillCandidate { text }
            | SerializedPart::UserPill { text, .. }
            | SerializedPart::RoomPill { text, .. }
            | SerializedPart::AtRoomPill { text }
            | SerializedPart::Emoji { text } => *text = new_text,
        }
    }
}
