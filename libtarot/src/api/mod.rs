//! Reading service API
//!
//! The service exposes four JSON endpoints rooted at a fixed base path:
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/decks/` | array of [`Deck`] |
//! | GET | `/spreads/` | array of [`Spread`] |
//! | POST | `/readings/` | the created [`Reading`] |
//! | GET | `/readings/{id}/` | [`Reading`] |
//!
//! # Examples
//!
//! ```no_run
//! use libtarot::api::{HttpApi, TarotApi};
//!
//! # async fn example() -> libtarot::error::Result<()> {
//! let api = HttpApi::new("http://localhost:8000/api")?;
//!
//! let decks = api.list_decks().await?;
//! let spreads = api.list_spreads().await?;
//!
//! if let (Some(deck), Some(spread)) = (decks.first(), spreads.first()) {
//!     let reading = api.create_reading(deck.id, spread.id, "Will it rain?").await?;
//!     println!("Reading {} has {} cards", reading.id, reading.cards.len());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Deck, DeckId, Reading, ReadingId, Spread, SpreadId};

pub mod http;

// Mock API is available for all builds (not just tests) to support integration tests
pub mod mock;

pub use http::HttpApi;
pub use mock::MockApi;

/// Operations offered by the reading service
///
/// Each call is fire-once: no retries, no caching. Any failure (non-success
/// status, transport error, undecodable body) is returned as
/// [`crate::error::ApiError`] wrapped in [`crate::error::TarotError::Api`].
#[async_trait]
pub trait TarotApi: Send + Sync {
    /// List every deck the service knows about
    async fn list_decks(&self) -> Result<Vec<Deck>>;

    /// List every spread, each with its nested positions
    async fn list_spreads(&self) -> Result<Vec<Spread>>;

    /// Ask the service to shuffle, draw and persist a new reading
    async fn create_reading(
        &self,
        deck_id: DeckId,
        spread_id: SpreadId,
        question: &str,
    ) -> Result<Reading>;

    /// Fetch a previously created reading
    async fn get_reading(&self, id: ReadingId) -> Result<Reading>;
}
