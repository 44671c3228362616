//! Core types for the tarot reading service
//!
//! Everything here is created server-side and only ever read by the client.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of keywords shown on a revealed card face
pub const HEADLINE_KEYWORDS: usize = 3;

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(
    /// Server-assigned deck identifier
    DeckId
);
id_newtype!(
    /// Server-assigned spread identifier
    SpreadId
);
id_newtype!(
    /// Server-assigned reading identifier
    ReadingId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcana {
    Major,
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suit::Wands => write!(f, "Wands"),
            Suit::Cups => write!(f, "Cups"),
            Suit::Swords => write!(f, "Swords"),
            Suit::Pentacles => write!(f, "Pentacles"),
        }
    }
}

/// Which way up a card was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn from_reversed(is_reversed: bool) -> Self {
        if is_reversed {
            Orientation::Reversed
        } else {
            Orientation::Upright
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Upright => write!(f, "upright"),
            Orientation::Reversed => write!(f, "reversed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub number: i32,
    pub arcana: Arcana,
    /// Present only for minor arcana
    pub suit: Option<Suit>,
    pub keywords_upright: Vec<String>,
    pub keywords_reversed: Vec<String>,
    pub meaning_upright: String,
    pub meaning_reversed: String,
    #[serde(default)]
    pub image_filename: String,
}

impl Card {
    /// Keyword list for the given orientation
    pub fn keywords(&self, reversed: bool) -> &[String] {
        if reversed {
            &self.keywords_reversed
        } else {
            &self.keywords_upright
        }
    }

    /// Human label such as "Major Arcana" or "Minor Arcana · Cups"
    pub fn arcana_label(&self) -> String {
        match (self.arcana, self.suit) {
            (Arcana::Major, _) => "Major Arcana".to_string(),
            (Arcana::Minor, Some(suit)) => format!("Minor Arcana · {}", suit),
            (Arcana::Minor, None) => "Minor Arcana".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadPosition {
    pub id: i64,
    pub position_number: i32,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub thematic_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub id: SpreadId,
    pub name: String,
    pub description: String,
    pub num_cards: u32,
    pub positions: Vec<SpreadPosition>,
}

/// One drawn card placed into one spread position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingCard {
    pub id: i64,
    pub card: Card,
    pub position: SpreadPosition,
    pub is_reversed: bool,
    /// Server-generated text combining card, position and orientation
    pub interpretation: String,
}

impl ReadingCard {
    pub fn orientation(&self) -> Orientation {
        Orientation::from_reversed(self.is_reversed)
    }

    /// Keywords for the orientation this card was drawn in
    pub fn keywords(&self) -> &[String] {
        self.card.keywords(self.is_reversed)
    }

    /// The first few active keywords, as shown on the card face
    pub fn headline_keywords(&self) -> &[String] {
        let keywords = self.keywords();
        &keywords[..keywords.len().min(HEADLINE_KEYWORDS)]
    }

    pub fn position_number(&self) -> i32 {
        self.position.position_number
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: ReadingId,
    pub deck: Deck,
    pub spread: Spread,
    pub question: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub cards: Vec<ReadingCard>,
}

impl Reading {
    /// Cards ordered by position number, ignoring the order the server sent
    pub fn sorted_cards(&self) -> Vec<&ReadingCard> {
        let mut cards: Vec<&ReadingCard> = self.cards.iter().collect();
        cards.sort_by_key(|c| c.position_number());
        cards
    }

    /// Reorder `cards` in place by position number
    pub fn sort_cards_by_position(&mut self) {
        self.cards.sort_by_key(|c| c.position_number());
    }

    /// Every position ordinal occupied in this reading
    pub fn position_numbers(&self) -> BTreeSet<i32> {
        self.cards.iter().map(|c| c.position_number()).collect()
    }

    /// True when no two cards share a position
    pub fn has_unique_positions(&self) -> bool {
        self.position_numbers().len() == self.cards.len()
    }

    pub fn card_at(&self, position_number: i32) -> Option<&ReadingCard> {
        self.cards
            .iter()
            .find(|c| c.position_number() == position_number)
    }
}

/// Server timestamps: RFC 3339, or a naive datetime taken as UTC
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }
}

/// Body of `POST /readings/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReadingRequest {
    pub deck_id: DeckId,
    pub spread_id: SpreadId,
    pub question: String,
}
