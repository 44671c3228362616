//! libtarot - client library for the tarot reading service
//!
//! Provides the data model returned by the service, an async API client
//! (with an HTTP implementation and a configurable mock), plus the shared
//! configuration and logging setup used by the frontends.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use api::{HttpApi, TarotApi};
pub use config::Config;
pub use error::{ApiError, Result, TarotError};
pub use types::{
    Arcana, Card, CreateReadingRequest, Deck, DeckId, Orientation, Reading, ReadingCard,
    ReadingId, Spread, SpreadId, SpreadPosition, Suit,
};
