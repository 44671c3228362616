//! Shuffle screen state
//!
//! A three-phase machine: `Shuffling -> Ready -> Loading`, with `Loading`
//! falling back to `Ready` when the reading cannot be created. The
//! shuffling phase is pure pacing; the only business action is the cut.

use std::time::Duration;

use libtarot::{CreateReadingRequest, DeckId, SpreadId};

/// How long the shuffle animation runs before the deck can be cut
pub const SHUFFLE_DURATION: Duration = Duration::from_millis(2800);

pub const CREATE_READING_ERROR: &str = "Something went wrong. Please try again.";

/// Hand-off from the home screen, consumed when the shuffle screen is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleParams {
    pub deck_id: DeckId,
    pub spread_id: SpreadId,
    /// Already trimmed
    pub question: String,
}

impl ShuffleParams {
    pub fn to_request(&self) -> CreateReadingRequest {
        CreateReadingRequest {
            deck_id: self.deck_id,
            spread_id: self.spread_id,
            question: self.question.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShufflePhase {
    Shuffling,
    Ready,
    Loading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShuffleState {
    pub params: ShuffleParams,
    pub phase: ShufflePhase,
    pub error: Option<String>,
    /// Animation frame, advanced on ticks while shuffling
    pub frame: u64,
}

impl ShuffleState {
    pub fn new(params: ShuffleParams) -> Self {
        Self {
            params,
            phase: ShufflePhase::Shuffling,
            error: None,
            frame: 0,
        }
    }

    /// The shuffle timer fired. Only moves `Shuffling -> Ready`.
    pub fn timer_elapsed(&mut self) -> bool {
        if self.phase == ShufflePhase::Shuffling {
            self.phase = ShufflePhase::Ready;
            true
        } else {
            false
        }
    }

    pub fn can_cut(&self) -> bool {
        self.phase == ShufflePhase::Ready
    }

    /// Cut the deck: `Ready -> Loading`, clearing any previous error.
    ///
    /// Returns the create request to send, exactly once per cut. In any other
    /// phase this is a no-op and returns `None`.
    pub fn cut(&mut self) -> Option<CreateReadingRequest> {
        if !self.can_cut() {
            return None;
        }
        self.phase = ShufflePhase::Loading;
        self.error = None;
        Some(self.params.to_request())
    }

    /// The create call failed: back to `Ready` with a message
    pub fn create_failed(&mut self) {
        if self.phase == ShufflePhase::Loading {
            self.phase = ShufflePhase::Ready;
            self.error = Some(CREATE_READING_ERROR.to_string());
        }
    }

    pub fn advance_frame(&mut self) {
        if self.phase == ShufflePhase::Shuffling {
            self.frame = self.frame.wrapping_add(1);
        }
    }
}
