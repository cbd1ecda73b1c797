//! Per-screen state holders.
//!
//! Each screen owns a [`Screen`] per view it drives. A view publishes
//! [`ScreenState`] snapshots on a `watch` channel: `loading` while its
//! queries run, then either `data` or an `error` message. Input validation
//! and not-found reporting happen here, never in the repository.
//!
//! The HTTP layer creates a screen per request, so concurrent requests never
//! share state; it returns the outcome of `run` rather than observing it.

mod battalion;
mod lookup;
mod soldier;
mod war;
mod weapon;

pub use battalion::*;
pub use lookup::*;
pub use soldier::*;
pub use war::*;
pub use weapon::*;

use std::future::Future;

use serde::Serialize;
use tokio::sync::watch;

use crate::errors::AppError;

/// Observable state of one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenState<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
        }
    }
}

/// Push-based holder for a [`ScreenState`].
pub struct Screen<T> {
    state: watch::Sender<ScreenState<T>>,
}

impl<T> Default for Screen<T> {
    fn default() -> Self {
        let (state, _) = watch::channel(ScreenState::default());
        Self { state }
    }
}

impl<T: Clone> Screen<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive one load: mark loading, await `load`, publish the outcome.
    ///
    /// A failed load keeps the previously shown data.
    pub async fn run<F>(&self, load: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = load.await;

        self.state.send_modify(|state| {
            state.loading = false;
            match &result {
                Ok(data) => state.data = Some(data.clone()),
                Err(e) => state.error = Some(e.message()),
            }
        });

        result
    }
}

// Observation side. HTTP handlers build a screen per request and only
// consume `run` results; long-lived front-ends subscribe instead.
#[allow(dead_code)]
impl<T: Clone> Screen<T> {
    /// Receive every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<T>> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> ScreenState<T> {
        self.state.borrow().clone()
    }

    /// Reset to the initial state.
    pub fn clear(&self) {
        self.state.send_replace(ScreenState::default());
    }
}

/// Trimmed input, or a validation error when blank.
pub fn require_non_blank<'a>(input: &'a str, message: &str) -> Result<&'a str, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(AppError::Validation(message.to_string()))
    } else {
        Ok(trimmed)
    }
}

/// Integer identifier typed by a user.
pub fn parse_id(input: &str, message: &str) -> Result<i64, AppError> {
    require_non_blank(input, message)?
        .parse()
        .map_err(|_| AppError::Validation(message.to_string()))
}
