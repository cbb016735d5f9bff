// WHY: Shared value types for every extraction strategy
// Ranges are UTF-8 byte offsets into the text the caller renders

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::normalization::collapse_whitespace;

/// Half-open span `[location, location + length)` in UTF-8 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}

impl TextRange {
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// Build a range from start/end offsets; an inverted pair yields an empty range at `start`
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self::new(start, end.saturating_sub(start))
    }

    /// Range covering the whole text
    pub fn full(text: &str) -> Self {
        Self::new(0, text.len())
    }

    /// Exclusive end offset; saturates so `usize::MAX` lengths mean "to the end"
    pub fn end(&self) -> usize {
        self.location.saturating_add(self.length)
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.location..self.end()
    }

    /// Substring addressed by this range, `None` when out of bounds or off a char boundary
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.as_range())
    }

    /// Clamp to the text and widen to the nearest char boundaries
    pub fn clamp_to(&self, text: &str) -> Self {
        let mut start = self.location.min(text.len());
        let mut end = self.end().min(text.len());
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        while !text.is_char_boundary(end) {
            end += 1;
        }
        Self::from_bounds(start, end)
    }

    /// Number of Unicode scalar values covered by the range
    pub fn char_len(&self, text: &str) -> usize {
        self.clamp_to(text)
            .slice(text)
            .map_or(0, |s| s.chars().count())
    }

    /// Same span expressed in UTF-16 code units, for hosts that store text as UTF-16
    pub fn to_utf16(&self, text: &str) -> Self {
        let bounded = self.clamp_to(text);
        let location = text[..bounded.location].encode_utf16().count();
        let length = text[bounded.as_range()].encode_utf16().count();
        Self::new(location, length)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.location, self.end())
    }
}

/// Kind of entity a recognizer rule produces
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EntityType {
    Mention,
    Hashtag,
    Url,
    Custom(String),
}

impl EntityType {
    /// Types enabled when nothing else is configured
    pub fn defaults() -> Vec<EntityType> {
        vec![EntityType::Mention, EntityType::Hashtag, EntityType::Url]
    }

    pub fn custom(id: impl Into<String>) -> Self {
        EntityType::Custom(id.into())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Mention => f.write_str("mention"),
            EntityType::Hashtag => f.write_str("hashtag"),
            EntityType::Url => f.write_str("url"),
            EntityType::Custom(id) => write!(f, "custom:{id}"),
        }
    }
}

impl FromStr for EntityType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "mention" => Ok(EntityType::Mention),
            "hashtag" => Ok(EntityType::Hashtag),
            "url" => Ok(EntityType::Url),
            other => match other.strip_prefix("custom:") {
                Some(id) if !id.is_empty() => Ok(EntityType::Custom(id.to_string())),
                _ => bail!(
                    "unknown entity type `{other}` (expected mention, hashtag, url or custom:<id>)"
                ),
            },
        }
    }
}

impl TryFrom<String> for EntityType {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<EntityType> for String {
    fn from(value: EntityType) -> Self {
        value.to_string()
    }
}

/// Recognized value carried by an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Mention(String),
    Hashtag(String),
    Url {
        original: String,
        alter: String,
        link: String,
    },
    Custom(String),
}

impl Entity {
    /// Build the payload for `entity_type` from an already normalized word
    pub fn create(entity_type: &EntityType, word: &str) -> Self {
        match entity_type {
            EntityType::Mention => Entity::Mention(word.to_string()),
            EntityType::Hashtag => Entity::Hashtag(word.to_string()),
            EntityType::Url => Entity::Url {
                original: word.to_string(),
                alter: word.to_string(),
                link: word.to_string(),
            },
            EntityType::Custom(_) => Entity::Custom(word.to_string()),
        }
    }

    /// Text shown for the entity; the display alias for URLs
    pub fn text(&self) -> &str {
        match self {
            Entity::Mention(text) | Entity::Hashtag(text) | Entity::Custom(text) => text,
            Entity::Url { alter, .. } => alter,
        }
    }

    /// Destination for URL entities
    pub fn link(&self) -> Option<&str> {
        match self {
            Entity::Url { link, .. } => Some(link),
            _ => None,
        }
    }
}

/// One recognized entity and where it sits in the rendered text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementResult {
    pub range: TextRange,
    pub entity: Entity,
    pub entity_type: EntityType,
}

impl ElementResult {
    pub fn new(range: TextRange, entity: Entity, entity_type: EntityType) -> Self {
        Self {
            range,
            entity,
            entity_type,
        }
    }

    /// Tab separated output line: index, type, location, length, text and link for URLs
    pub fn format_tsv(&self, index: usize) -> String {
        let mut line = format!(
            "{}\t{}\t{}\t{}\t{}",
            index,
            self.entity_type,
            self.range.location,
            self.range.length,
            collapse_whitespace(self.entity.text())
        );
        if let Some(link) = self.entity.link() {
            line.push('\t');
            line.push_str(&collapse_whitespace(link));
        }
        line
    }
}
