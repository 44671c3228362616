//! Application module
//!
//! Contains the core application architecture:
//! - Actions: What can happen, and commands for what the runner must do
//! - State: What is true right now, one state type per screen
//! - Reducer: Pure function (State, Action) -> State
//!
//! Screens never call the service directly. The reducer queues commands and
//! the runner hands them to [`crate::services::ServiceHandle`].

pub mod actions;
pub mod event;
pub mod home;
pub mod load;
pub mod reading;
pub mod reducer;
pub mod route;
pub mod shuffle;
pub mod state;

// Re-export commonly used types
pub use actions::{Action, Command, Epoch};
pub use home::{HomeField, HomeState};
pub use load::Load;
pub use reading::ReadingState;
pub use reducer::{is_editor_key, keymap, reduce};
pub use route::Route;
pub use shuffle::{ShuffleParams, ShufflePhase, ShuffleState};
pub use state::{AppState, Screen, UiConfig};
