//! Application state
//!
//! Each screen owns its state; only the active screen exists at any time.
//! All state transitions happen through the reducer (see `reducer.rs`).

use super::actions::{Command, Epoch};
use super::home::{HomeField, HomeState};
use super::reading::ReadingState;
use super::route::Route;
use super::shuffle::ShuffleState;

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Route of the active screen
    pub route: Route,

    /// State of the active screen
    pub screen: Screen,

    /// Bumped on every navigation
    pub epoch: Epoch,

    /// Help overlay visible?
    pub help_visible: bool,

    /// UI configuration
    pub config: UiConfig,

    /// Side effects queued by the reducer, drained by the runner
    pub(crate) commands: Vec<Command>,
}

/// The active screen and its local state
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Home(HomeState),
    Shuffle(ShuffleState),
    Reading(ReadingState),
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from(&libtarot::config::UiConfig::default())
    }
}

impl From<&libtarot::config::UiConfig> for UiConfig {
    fn from(config: &libtarot::config::UiConfig) -> Self {
        Self {
            colors_enabled: config.colors,
            tick_rate_ms: config.tick_rate_ms,
        }
    }
}

impl AppState {
    /// State before any screen has been entered
    pub(crate) fn blank(config: UiConfig) -> Self {
        Self {
            should_quit: false,
            route: Route::Home,
            screen: Screen::Home(HomeState::new()),
            epoch: 0,
            help_visible: false,
            config,
            commands: Vec::new(),
        }
    }

    /// Start on the home screen, with its catalog fetch queued
    pub fn new() -> Self {
        Self::open(Route::Home, UiConfig::default())
    }

    /// Start on any route. `/shuffle` has no hand-off here, so it lands on home.
    pub fn open(route: Route, config: UiConfig) -> Self {
        super::reducer::reduce(
            Self::blank(config),
            super::actions::Action::NavigateTo {
                route,
                handoff: None,
            },
        )
    }

    /// Take the queued side effects, leaving the queue empty
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Queued side effects, without draining them
    pub fn pending_commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn home(&self) -> Option<&HomeState> {
        match &self.screen {
            Screen::Home(home) => Some(home),
            _ => None,
        }
    }

    pub fn shuffle(&self) -> Option<&ShuffleState> {
        match &self.screen {
            Screen::Shuffle(shuffle) => Some(shuffle),
            _ => None,
        }
    }

    pub fn reading(&self) -> Option<&ReadingState> {
        match &self.screen {
            Screen::Reading(reading) => Some(reading),
            _ => None,
        }
    }

    /// Should plain key presses go into the question editor?
    pub fn accepts_text_input(&self) -> bool {
        !self.help_visible
            && self
                .home()
                .map(|home| home.is_ready() && home.focus == HomeField::Question)
                .unwrap_or(false)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
