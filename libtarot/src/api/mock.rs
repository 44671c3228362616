//! Mock API implementation for testing
//!
//! This module provides a configurable stand-in for the reading service that
//! can simulate successes, failures and latency. It's designed for use in
//! integration tests of the frontends without a running backend.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::api::TarotApi;
use crate::error::{ApiError, Result};
use crate::types::{CreateReadingRequest, Deck, DeckId, Reading, ReadingId, Spread, SpreadId};

/// Per-endpoint call counters, shared so tests can inspect them after the
/// mock has been moved into the code under test
#[derive(Debug, Clone, Default)]
pub struct CallCounts {
    pub list_decks: Arc<Mutex<usize>>,
    pub list_spreads: Arc<Mutex<usize>>,
    pub create_reading: Arc<Mutex<usize>>,
    pub get_reading: Arc<Mutex<usize>>,
}

impl CallCounts {
    fn bump(counter: &Arc<Mutex<usize>>) {
        if let Ok(mut count) = counter.lock() {
            *count += 1;
        }
    }

    fn read(counter: &Arc<Mutex<usize>>) -> usize {
        counter.lock().map(|c| *c).unwrap_or(0)
    }
}

/// Configuration for mock API behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub decks: std::result::Result<Vec<Deck>, ApiError>,
    pub spreads: std::result::Result<Vec<Spread>, ApiError>,

    /// Result of `create_reading`; `Ok` readings get the requested question
    pub created: std::result::Result<Reading, ApiError>,

    /// Result of `get_reading`; `Ok` readings get the requested id
    pub fetched: std::result::Result<Reading, ApiError>,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,

    pub calls: CallCounts,

    /// Bodies received by `create_reading` (for verification)
    pub create_requests: Arc<Mutex<Vec<CreateReadingRequest>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            decks: Ok(vec![fixtures::deck(1, "Rider-Waite")]),
            spreads: Ok(vec![fixtures::three_card_spread(5)]),
            created: Ok(fixtures::reading(42)),
            fetched: Ok(fixtures::reading(42)),
            delay: Duration::from_millis(0),
            calls: CallCounts::default(),
            create_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock reading service for testing
#[derive(Debug, Clone)]
pub struct MockApi {
    config: MockConfig,
}

impl MockApi {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Create a mock where every endpoint succeeds with fixture data
    pub fn success() -> Self {
        Self::new(MockConfig::default())
    }

    /// Create a mock where every endpoint fails with the given status
    pub fn failure(status: u16, body: &str) -> Self {
        let error = ApiError::Request {
            status,
            body: body.to_string(),
        };
        Self::new(MockConfig {
            decks: Err(error.clone()),
            spreads: Err(error.clone()),
            created: Err(error.clone()),
            fetched: Err(error),
            ..Default::default()
        })
    }

    /// Create a mock whose endpoints all fail as if the server were down
    pub fn unreachable() -> Self {
        let error = ApiError::Transport("connection refused".to_string());
        Self::new(MockConfig {
            decks: Err(error.clone()),
            spreads: Err(error.clone()),
            created: Err(error.clone()),
            fetched: Err(error),
            ..Default::default()
        })
    }

    /// Create a mock with a delay on every call
    pub fn with_delay(delay: Duration) -> Self {
        Self::new(MockConfig {
            delay,
            ..Default::default()
        })
    }

    pub fn list_decks_calls(&self) -> usize {
        CallCounts::read(&self.config.calls.list_decks)
    }

    pub fn list_spreads_calls(&self) -> usize {
        CallCounts::read(&self.config.calls.list_spreads)
    }

    pub fn create_reading_calls(&self) -> usize {
        CallCounts::read(&self.config.calls.create_reading)
    }

    pub fn get_reading_calls(&self) -> usize {
        CallCounts::read(&self.config.calls.get_reading)
    }

    /// Bodies of every `create_reading` call so far
    pub fn create_requests(&self) -> Vec<CreateReadingRequest> {
        self.config
            .create_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    async fn simulate_latency(&self) {
        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }
    }
}

#[async_trait]
impl TarotApi for MockApi {
    async fn list_decks(&self) -> Result<Vec<Deck>> {
        CallCounts::bump(&self.config.calls.list_decks);
        self.simulate_latency().await;
        Ok(self.config.decks.clone()?)
    }

    async fn list_spreads(&self) -> Result<Vec<Spread>> {
        CallCounts::bump(&self.config.calls.list_spreads);
        self.simulate_latency().await;
        Ok(self.config.spreads.clone()?)
    }

    async fn create_reading(
        &self,
        deck_id: DeckId,
        spread_id: SpreadId,
        question: &str,
    ) -> Result<Reading> {
        CallCounts::bump(&self.config.calls.create_reading);
        if let Ok(mut requests) = self.config.create_requests.lock() {
            requests.push(CreateReadingRequest {
                deck_id,
                spread_id,
                question: question.to_string(),
            });
        }
        self.simulate_latency().await;

        let mut reading = self.config.created.clone()?;
        reading.question = question.to_string();
        Ok(reading)
    }

    async fn get_reading(&self, id: ReadingId) -> Result<Reading> {
        CallCounts::bump(&self.config.calls.get_reading);
        self.simulate_latency().await;

        let mut reading = self.config.fetched.clone()?;
        reading.id = id;
        Ok(reading)
    }
}

/// Sample service data for tests and demos
pub mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::types::{
        Arcana, Card, Deck, DeckId, Reading, ReadingCard, ReadingId, Spread, SpreadId,
        SpreadPosition, Suit,
    };

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0)
            .single()
            .unwrap_or_default()
    }

    pub fn deck(id: i64, name: &str) -> Deck {
        Deck {
            id: DeckId(id),
            name: name.to_string(),
            description: format!("The {} deck", name),
            created_at: timestamp(),
        }
    }

    pub fn position(id: i64, number: i32, name: &str, description: &str) -> SpreadPosition {
        SpreadPosition {
            id,
            position_number: number,
            name: name.to_string(),
            description: description.to_string(),
            thematic_note: String::new(),
        }
    }

    pub fn three_card_spread(id: i64) -> Spread {
        Spread {
            id: SpreadId(id),
            name: "Three Card".to_string(),
            description: "Past, present and future".to_string(),
            num_cards: 3,
            positions: vec![
                position(id * 10 + 1, 1, "Past", "What led here."),
                position(id * 10 + 2, 2, "Present", "Where you stand."),
                position(id * 10 + 3, 3, "Future", "Where this is heading."),
            ],
        }
    }

    pub fn major_card(id: i64, name: &str, number: i32) -> Card {
        Card {
            id,
            name: name.to_string(),
            number,
            arcana: Arcana::Major,
            suit: None,
            keywords_upright: vec![
                "beginnings".to_string(),
                "spontaneity".to_string(),
                "faith".to_string(),
                "freedom".to_string(),
            ],
            keywords_reversed: vec!["recklessness".to_string(), "hesitation".to_string()],
            meaning_upright: format!("{} upright.", name),
            meaning_reversed: format!("{} reversed.", name),
            image_filename: format!("major_{:02}.jpg", number),
        }
    }

    pub fn minor_card(id: i64, name: &str, number: i32, suit: Suit) -> Card {
        Card {
            id,
            name: name.to_string(),
            number,
            arcana: Arcana::Minor,
            suit: Some(suit),
            keywords_upright: vec!["harmony".to_string(), "union".to_string()],
            keywords_reversed: vec!["imbalance".to_string()],
            meaning_upright: format!("{} upright.", name),
            meaning_reversed: format!("{} reversed.", name),
            image_filename: format!("{:?}_{:02}.jpg", suit, number).to_lowercase(),
        }
    }

    /// A three-card reading whose cards arrive out of position order
    pub fn reading(id: i64) -> Reading {
        let spread = three_card_spread(5);
        let positions = spread.positions.clone();
        let cards = vec![
            ReadingCard {
                id: id * 10 + 3,
                card: major_card(1, "The Fool", 0),
                position: positions[2].clone(),
                is_reversed: false,
                interpretation: "The Fool appears upright in the Future position.".to_string(),
            },
            ReadingCard {
                id: id * 10 + 1,
                card: minor_card(36, "Two of Cups", 2, Suit::Cups),
                position: positions[0].clone(),
                is_reversed: true,
                interpretation: "Two of Cups appears reversed in the Past position.".to_string(),
            },
            ReadingCard {
                id: id * 10 + 2,
                card: major_card(18, "The Star", 17),
                position: positions[1].clone(),
                is_reversed: false,
                interpretation: "The Star appears upright in the Present position.".to_string(),
            },
        ];

        Reading {
            id: ReadingId(id),
            deck: deck(1, "Rider-Waite"),
            spread,
            question: "Will it rain?".to_string(),
            created_at: timestamp(),
            cards,
        }
    }
}
