//! Structured reply produced by the command dispatcher and rendered by the chat adapter.

use std::path::PathBuf;

/// Single field of an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field heading.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Rendered side by side with neighbouring inline fields.
    pub inline: bool,
}

/// Rich message with a title, a colour and ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    /// Embed heading.
    pub title: String,
    /// RGB colour, e.g. `0x00FF00`.
    pub colour: u32,
    /// Fields in display order.
    pub fields: Vec<EmbedField>,
    /// Stamp the embed with the time it is sent.
    pub timestamp: bool,
}

impl Embed {
    /// Embed without fields.
    pub fn new(title: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            colour,
            fields: Vec::new(),
            timestamp: false,
        }
    }

    /// Append a non-inline field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }

    /// Stamp the embed with the send time.
    pub fn timestamped(mut self) -> Self {
        self.timestamp = true;
        self
    }

    /// Look up a field value by name.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

/// Primary content of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    /// Plain message content.
    Text(String),
    /// Rich embed.
    Embed(Embed),
}

/// Reply to a command, optionally followed by a media attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Primary content.
    pub body: ReplyBody,
    /// Only visible to the user who issued the command.
    pub ephemeral: bool,
    /// File sent as a follow-up message.
    pub attachment: Option<PathBuf>,
}

impl Reply {
    /// Public embed reply.
    pub fn embed(embed: Embed) -> Self {
        Self {
            body: ReplyBody::Embed(embed),
            ephemeral: false,
            attachment: None,
        }
    }

    /// Private text reply.
    pub fn private_text(text: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Text(text.into()),
            ephemeral: true,
            attachment: None,
        }
    }

    /// Attach a media file, if one was picked.
    pub fn with_attachment(mut self, attachment: Option<PathBuf>) -> Self {
        self.attachment = attachment;
        self
    }

    /// Borrow the embed body, if any.
    pub fn as_embed(&self) -> Option<&Embed> {
        match &self.body {
            ReplyBody::Embed(embed) => Some(embed),
            ReplyBody::Text(_) => None,
        }
    }

    /// Borrow the text body, if any.
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Text(text) => Some(text.as_str()),
            ReplyBody::Embed(_) => None,
        }
    }
}
