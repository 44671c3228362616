//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State`. The reducer performs no I/O; side effects are
//! queued as [`Command`]s on the returned state and executed by the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::actions::{Action, Command};
use super::home::{HomeField, HomeState};
use super::load::Load;
use super::reading::ReadingState;
use super::route::Route;
use super::shuffle::{ShuffleParams, ShuffleState};
use super::state::{AppState, Screen};

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
///
/// Results carrying an epoch other than the current one belong to a screen
/// the user already left and are ignored.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => with_shuffle(state, ShuffleState::advance_frame),
        Action::Resize(_, _) => state, // Terminal auto-handles resize

        // === Navigation ===
        Action::NavigateTo { route, handoff } => navigate(state, route, handoff),

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Home ===
        Action::CatalogLoaded {
            epoch,
            decks,
            spreads,
        } if epoch == state.epoch => with_home(state, |home| home.catalog_loaded(decks, spreads)),

        Action::CatalogFailed { epoch, .. } if epoch == state.epoch => {
            with_home(state, HomeState::catalog_failed)
        }

        Action::QuestionChanged(question) => with_home(state, |home| home.set_question(question)),
        Action::FocusNext => with_home(state, HomeState::focus_next),
        Action::FocusPrevious => with_home(state, HomeState::focus_previous),
        Action::SelectNext => with_home(state, HomeState::select_next),
        Action::SelectPrevious => with_home(state, HomeState::select_previous),

        Action::Submit => {
            let handoff = state.home().and_then(HomeState::submission);
            match handoff {
                Some(params) => navigate(state, Route::Shuffle, Some(params)),
                None => state,
            }
        }

        // === Shuffle ===
        Action::ShuffleTimerElapsed { epoch } if epoch == state.epoch => {
            with_shuffle(state, |shuffle| {
                shuffle.timer_elapsed();
            })
        }

        Action::CutDeck => {
            let epoch = state.epoch;
            let mut state = state;
            if let Screen::Shuffle(shuffle) = &mut state.screen {
                if let Some(request) = shuffle.cut() {
                    state.commands.push(Command::CreateReading { epoch, request });
                }
            }
            state
        }

        Action::ReadingCreated { epoch, id } if epoch == state.epoch => {
            if state.shuffle().is_some() {
                navigate(state, Route::Reading(id), None)
            } else {
                state
            }
        }

        Action::ReadingCreateFailed { epoch, .. } if epoch == state.epoch => {
            with_shuffle(state, ShuffleState::create_failed)
        }

        // === Reading ===
        Action::ReadingLoaded { epoch, reading } if epoch == state.epoch => {
            with_reading(state, |r| r.loaded(*reading))
        }

        Action::ReadingLoadFailed { epoch, .. } if epoch == state.epoch => {
            with_reading(state, ReadingState::failed)
        }

        Action::FlipCard(position_number) => with_reading(state, |r| {
            r.flip(position_number);
        }),
        Action::FlipNth(index) => with_reading(state, |r| {
            r.flip_nth(index);
        }),
        Action::FlipSelected => with_reading(state, |r| {
            r.flip_selected();
        }),
        Action::RevealAll => with_reading(state, ReadingState::reveal_all),
        Action::CursorNext => with_reading(state, ReadingState::cursor_next),
        Action::CursorPrevious => with_reading(state, ReadingState::cursor_previous),

        // Stale results from a screen that no longer exists
        Action::CatalogLoaded { .. }
        | Action::CatalogFailed { .. }
        | Action::ShuffleTimerElapsed { .. }
        | Action::ReadingCreated { .. }
        | Action::ReadingCreateFailed { .. }
        | Action::ReadingLoaded { .. }
        | Action::ReadingLoadFailed { .. } => state,
    }
}

/// Replace the active screen, queueing its entry effect
///
/// The shuffle route without a hand-off redirects to home before any
/// shuffle state exists.
fn navigate(mut state: AppState, route: Route, handoff: Option<ShuffleParams>) -> AppState {
    if matches!(state.screen, Screen::Shuffle(_)) {
        state.commands.push(Command::CancelShuffleTimer);
    }

    let epoch = state.epoch + 1;
    let (route, screen, command) = match (route, handoff) {
        (Route::Shuffle, Some(params)) => (
            Route::Shuffle,
            Screen::Shuffle(ShuffleState::new(params)),
            Command::StartShuffleTimer { epoch },
        ),
        (Route::Reading(id), _) => (
            Route::Reading(id),
            Screen::Reading(ReadingState::new(id)),
            Command::LoadReading { epoch, id },
        ),
        (Route::Home, _) | (Route::Shuffle, None) => (
            Route::Home,
            Screen::Home(HomeState::new()),
            Command::LoadCatalog { epoch },
        ),
    };

    state.epoch = epoch;
    state.route = route;
    state.screen = screen;
    state.help_visible = false;
    state.commands.push(command);
    state
}

fn go_home() -> Action {
    Action::NavigateTo {
        route: Route::Home,
        handoff: None,
    }
}

fn with_home(mut state: AppState, f: impl FnOnce(&mut HomeState)) -> AppState {
    if let Screen::Home(home) = &mut state.screen {
        f(home);
    }
    state
}

fn with_shuffle(mut state: AppState, f: impl FnOnce(&mut ShuffleState)) -> AppState {
    if let Screen::Shuffle(shuffle) = &mut state.screen {
        f(shuffle);
    }
    state
}

fn with_reading(mut state: AppState, f: impl FnOnce(&mut ReadingState)) -> AppState {
    if let Screen::Reading(reading) = &mut state.screen {
        f(reading);
    }
    state
}

/// Handle keyboard input
fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    match keymap(&state, key) {
        Some(action) => reduce(state, action),
        None => state,
    }
}

/// Map a key press to an action for the current screen
///
/// This is where keybindings are defined. Keys the question editor consumes
/// are routed to it by the runner before they reach here.
pub fn keymap(state: &AppState, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Action::Quit),
        (KeyCode::F(1), _) => {
            return Some(if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            });
        }
        (KeyCode::Esc, _) if state.help_visible => return Some(Action::HideHelp),
        _ => {}
    }

    // The help overlay swallows everything else
    if state.help_visible {
        return None;
    }

    match &state.screen {
        Screen::Home(home) => home_key(home, key),
        Screen::Shuffle(shuffle) => shuffle_key(shuffle, key),
        Screen::Reading(reading) => reading_key(reading, key),
    }
}

/// Should this key be typed into the question editor rather than mapped?
///
/// Navigation keys and global shortcuts always reach the keymap.
pub fn is_editor_key(state: &AppState, key: KeyEvent) -> bool {
    if !state.accepts_text_input() || key.kind == KeyEventKind::Release {
        return false;
    }
    !matches!(
        (key.code, key.modifiers),
        (KeyCode::Tab, _)
            | (KeyCode::BackTab, _)
            | (KeyCode::Esc, _)
            | (KeyCode::F(_), _)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('s'), KeyModifiers::CONTROL)
    )
}

fn home_key(home: &HomeState, key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => return Some(Action::Quit),
        (KeyCode::Tab, _) => return Some(Action::FocusNext),
        (KeyCode::BackTab, _) => return Some(Action::FocusPrevious),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => return Some(Action::Submit),
        _ => {}
    }

    match &home.catalog {
        Load::Loading => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Load::Failed(_) => match key.code {
            KeyCode::Char('r') => Some(go_home()),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        // Typing goes to the question editor
        Load::Loaded(_) if home.focus == HomeField::Question => None,
        Load::Loaded(_) => match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                Some(Action::SelectPrevious)
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                Some(Action::SelectNext)
            }
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
    }
}

fn shuffle_key(shuffle: &ShuffleState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c') if shuffle.can_cut() => {
            Some(Action::CutDeck)
        }
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(go_home()),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn reading_key(reading: &ReadingState, key: KeyEvent) -> Option<Action> {
    match &reading.reading {
        Load::Loaded(_) => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::CursorPrevious),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Some(Action::CursorNext),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::FlipSelected),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).map(|d| d as usize - 1)?;
                Some(Action::FlipNth(index))
            }
            KeyCode::Char('a') if reading.can_reveal_all() => Some(Action::RevealAll),
            KeyCode::Char('n') | KeyCode::Esc => Some(go_home()),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Load::Failed(_) => match key.code {
            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Esc => Some(go_home()),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Load::Loading => match key.code {
            KeyCode::Esc => Some(go_home()),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
    }
}
