//! Service layer adapter for TUI
//!
//! Bridges the async [`TarotApi`] and the synchronous TUI event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle`: owns the API client and a tokio runtime
//! - Commands queued by the reducer are executed here as spawned tasks
//! - Each task finishes by sending one [`Action`] through a crossbeam channel,
//!   tagged with the epoch of the screen that asked for it
//! - The shuffle timer is the only cancellable task; its abort handle is
//!   held in a guard that aborts on drop
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use libtarot::api::MockApi;
//! use tarot_tui::app::Command;
//! use tarot_tui::services::ServiceHandle;
//!
//! # fn example() -> tarot_tui::error::Result<()> {
//! let mut services = ServiceHandle::new(Arc::new(MockApi::success()))?;
//! services.execute(Command::LoadCatalog { epoch: 1 });
//!
//! // In event loop, check for results
//! while let Ok(_action) = services.events().try_recv() {
//!     // Feed to the reducer
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use libtarot::api::{HttpApi, TarotApi};
use libtarot::{Config, CreateReadingRequest, ReadingId};
use tokio::task::AbortHandle;

use crate::app::shuffle::SHUFFLE_DURATION;
use crate::app::{Action, Command, Epoch};
use crate::error::Result;

/// Aborts the wrapped task when dropped
#[derive(Debug)]
struct TimerGuard(AbortHandle);

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Service handle for TUI operations
///
/// Uses a tokio runtime to run service calls without blocking the UI.
pub struct ServiceHandle {
    api: Arc<dyn TarotApi>,
    runtime: tokio::runtime::Runtime,
    tx: Sender<Action>,
    rx: Receiver<Action>,
    shuffle_timer: Option<TimerGuard>,
    shuffle_duration: Duration,
}

impl ServiceHandle {
    /// Create a new service handle around any API implementation
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn new(api: Arc<dyn TarotApi>) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (tx, rx) = unbounded();

        Ok(Self {
            api,
            runtime,
            tx,
            rx,
            shuffle_timer: None,
            shuffle_duration: SHUFFLE_DURATION,
        })
    }

    /// Create a service handle talking HTTP to the configured base URL
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = HttpApi::new(&config.api.base_url)?;
        tracing::info!(base_url = %api.base_url(), "Using reading service");
        Self::new(Arc::new(api))
    }

    /// Override how long the shuffle timer runs
    pub fn with_shuffle_duration(mut self, duration: Duration) -> Self {
        self.shuffle_duration = duration;
        self
    }

    /// Result actions from finished tasks
    pub fn events(&self) -> &Receiver<Action> {
        &self.rx
    }

    /// Is a shuffle timer armed and still pending?
    pub fn timer_active(&self) -> bool {
        self.shuffle_timer
            .as_ref()
            .map(|guard| !guard.0.is_finished())
            .unwrap_or(false)
    }

    /// Perform a side effect requested by the reducer
    pub fn execute(&mut self, command: Command) {
        tracing::debug!(?command, "Executing command");

        match command {
            Command::LoadCatalog { epoch } => {
                let api = Arc::clone(&self.api);
                self.spawn(async move { load_catalog(api.as_ref(), epoch).await });
            }
            Command::StartShuffleTimer { epoch } => {
                let duration = self.shuffle_duration;
                let handle = self.spawn(shuffle_timer(duration, epoch));
                // Replacing the guard aborts any previous timer
                self.shuffle_timer = Some(TimerGuard(handle));
            }
            Command::CancelShuffleTimer => {
                if self.shuffle_timer.take().is_some() {
                    tracing::debug!("Shuffle timer cancelled");
                }
            }
            Command::CreateReading { epoch, request } => {
                let api = Arc::clone(&self.api);
                self.spawn(async move { create_reading(api.as_ref(), epoch, request).await });
            }
            Command::LoadReading { epoch, id } => {
                let api = Arc::clone(&self.api);
                self.spawn(async move { load_reading(api.as_ref(), epoch, id).await });
            }
        }
    }

    fn spawn<F>(&self, task: F) -> AbortHandle
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let tx = self.tx.clone();
        let handle = self.runtime.spawn(async move {
            let action = task.await;
            if tx.send(action).is_err() {
                // Receiver dropped, UI has shut down
                tracing::debug!("Dropping result, event loop is gone");
            }
        });
        handle.abort_handle()
    }
}

/// Fetch decks and spreads concurrently; both must succeed
pub async fn load_catalog(api: &dyn TarotApi, epoch: Epoch) -> Action {
    match tokio::try_join!(api.list_decks(), api.list_spreads()) {
        Ok((decks, spreads)) => {
            tracing::info!(
                decks = decks.len(),
                spreads = spreads.len(),
                "Loaded decks and spreads"
            );
            Action::CatalogLoaded {
                epoch,
                decks,
                spreads,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load decks and spreads");
            Action::CatalogFailed {
                epoch,
                error: e.to_string(),
            }
        }
    }
}

/// Create a reading; exactly one request per call
pub async fn create_reading(
    api: &dyn TarotApi,
    epoch: Epoch,
    request: CreateReadingRequest,
) -> Action {
    match api
        .create_reading(request.deck_id, request.spread_id, &request.question)
        .await
    {
        Ok(reading) => {
            tracing::info!(reading_id = %reading.id, cards = reading.cards.len(), "Reading created");
            Action::ReadingCreated {
                epoch,
                id: reading.id,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create reading");
            Action::ReadingCreateFailed {
                epoch,
                error: e.to_string(),
            }
        }
    }
}

pub async fn load_reading(api: &dyn TarotApi, epoch: Epoch, id: ReadingId) -> Action {
    match api.get_reading(id).await {
        Ok(reading) => Action::ReadingLoaded {
            epoch,
            reading: Box::new(reading),
        },
        Err(e) => {
            tracing::error!(reading_id = %id, error = %e, "Failed to load reading");
            Action::ReadingLoadFailed {
                epoch,
                error: e.to_string(),
            }
        }
    }
}

/// Sleep for the shuffle duration, then report the timer elapsed
pub async fn shuffle_timer(duration: Duration, epoch: Epoch) -> Action {
    tokio::time::sleep(duration).await;
    Action::ShuffleTimerElapsed { epoch }
}
