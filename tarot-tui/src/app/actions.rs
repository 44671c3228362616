//! Actions and commands for the reducer pattern
//!
//! Actions describe what happened (a key press, a response arriving).
//! Commands describe side effects the reducer wants performed; the runner
//! drains them from the state and hands them to the service layer.

use crossterm::event::KeyEvent;
use libtarot::{CreateReadingRequest, Deck, Reading, ReadingId, Spread};

use super::route::Route;
use super::shuffle::ShuffleParams;

/// Navigation counter. Bumped on every route change so that results
/// addressed to a screen the user already left can be recognized and dropped.
pub type Epoch = u64;

/// Actions that trigger state transitions
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick for animations
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Go to a route; `handoff` is only consumed by the shuffle screen
    NavigateTo {
        route: Route,
        handoff: Option<ShuffleParams>,
    },

    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    // === Home ===
    /// Decks and spreads both arrived
    CatalogLoaded {
        epoch: Epoch,
        decks: Vec<Deck>,
        spreads: Vec<Spread>,
    },

    /// Either list failed to load
    CatalogFailed { epoch: Epoch, error: String },

    /// Question text edited
    QuestionChanged(String),

    /// Move focus to the next form field
    FocusNext,

    /// Move focus to the previous form field
    FocusPrevious,

    /// Advance the focused deck/spread selection
    SelectNext,

    /// Step back the focused deck/spread selection
    SelectPrevious,

    /// Begin the reading with the current selection
    Submit,

    // === Shuffle ===
    /// The shuffle animation finished
    ShuffleTimerElapsed { epoch: Epoch },

    /// User cut the deck
    CutDeck,

    /// The service created the reading
    ReadingCreated { epoch: Epoch, id: ReadingId },

    /// Creating the reading failed
    ReadingCreateFailed { epoch: Epoch, error: String },

    // === Reading ===
    /// The reading arrived
    ReadingLoaded { epoch: Epoch, reading: Box<Reading> },

    /// The reading could not be fetched
    ReadingLoadFailed { epoch: Epoch, error: String },

    /// Reveal the card at a position number
    FlipCard(i32),

    /// Reveal the card at a display index (0-based)
    FlipNth(usize),

    /// Reveal the highlighted card
    FlipSelected,

    /// Reveal every card
    RevealAll,

    /// Highlight the next card
    CursorNext,

    /// Highlight the previous card
    CursorPrevious,
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch decks and spreads concurrently
    LoadCatalog { epoch: Epoch },

    /// Start the shuffle timer for the screen at `epoch`
    StartShuffleTimer { epoch: Epoch },

    /// Abort the running shuffle timer, if any
    CancelShuffleTimer,

    /// Create a reading (exactly one per cut)
    CreateReading {
        epoch: Epoch,
        request: CreateReadingRequest,
    },

    /// Fetch a reading by id
    LoadReading { epoch: Epoch, id: ReadingId },
}
