//! Async driver wiring a [`FormulaInput`] to a host UI.
//!
//! The session owns the widget core. At mount it runs the one-shot
//! suggestion fetch (off the async thread, since sources may block), then
//! routes host events from a channel inbox into the core. Blur events arm
//! a hide timer; when a timer expires its generation is fed back into the
//! core, which ignores it if a selection or refocus landed first.

use crate::input::FormulaInput;
use crate::suggest::{FETCH_ERROR_MESSAGE, SuggestionSource};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

/// A host UI event delivered to the session inbox.
#[derive(Debug)]
pub enum UiEvent {
    /// The host text field changed to this value.
    InputChanged(String),
    /// A key was pressed; the reply says whether the widget consumed it
    /// and the host must suppress its default handling.
    KeyDown {
        key: String,
        consumed: oneshot::Sender<bool>,
    },
    /// The suggestion at this index in the filtered list was clicked.
    SelectSuggestion(usize),
    /// The clear action was triggered.
    Clear,
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,
    /// Stop the session.
    Shutdown,
}

/// Drives a widget core on a tokio runtime.
pub struct Session {
    input: FormulaInput,
    source: Arc<dyn SuggestionSource>,
    inbox: flume::Receiver<UiEvent>,
}

impl Session {
    /// Create a session; the returned sender is the host's event inbox.
    pub fn new(
        input: FormulaInput,
        source: Arc<dyn SuggestionSource>,
    ) -> (Self, flume::Sender<UiEvent>) {
        let (tx, rx) = flume::unbounded();
        (
            Self {
                input,
                source,
                inbox: rx,
            },
            tx,
        )
    }

    /// Run the fetch, then drive the widget until the host sends
    /// [`UiEvent::Shutdown`] or drops its sender. Returns the widget core
    /// for final inspection.
    pub async fn run(mut self) -> FormulaInput {
        self.fetch_data().await;

        // Expired hide timers report their generation here.
        let (timer_tx, timer_rx) = flume::unbounded::<u64>();

        loop {
            tokio::select! {
                biased;

                Ok(generation) = timer_rx.recv_async() => {
                    if self.input.hide_elapsed(generation) {
                        trace!(generation, "suggestion list hidden");
                    }
                }

                event = self.inbox.recv_async() => match event {
                    Ok(event) => {
                        if !self.handle_event(event, &timer_tx) {
                            break;
                        }
                    }
                    Err(_) => break,
                },
            }
        }

        self.input
    }

    async fn fetch_data(&mut self) {
        self.input.data_loading();
        let source = Arc::clone(&self.source);
        match tokio::task::spawn_blocking(move || source.fetch()).await {
            Ok(Ok(suggestions)) => {
                debug!(
                    count = suggestions.len(),
                    source = self.source.name(),
                    "suggestion data fetched"
                );
                self.input.data_loaded(suggestions);
            }
            Ok(Err(error)) => {
                warn!(source = self.source.name(), %error, "suggestion fetch failed");
                self.input.data_failed(FETCH_ERROR_MESSAGE);
            }
            Err(error) => {
                warn!(%error, "suggestion fetch task failed");
                self.input.data_failed(FETCH_ERROR_MESSAGE);
            }
        }
    }

    /// Apply one host event. Returns `false` when the session should stop.
    fn handle_event(&mut self, event: UiEvent, timer_tx: &flume::Sender<u64>) -> bool {
        trace!(?event, "ui event");
        match event {
            UiEvent::InputChanged(value) => self.input.input_changed(&value),
            UiEvent::KeyDown { key, consumed } => {
                let _ = consumed.send(self.input.key_down(&key));
            }
            UiEvent::SelectSuggestion(index) => {
                self.input.select_suggestion(index);
            }
            UiEvent::Clear => self.input.clear(),
            UiEvent::Focus => self.input.focus(),
            UiEvent::Blur => {
                let request = self.input.blur();
                let timer_tx = timer_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(request.delay).await;
                    let _ = timer_tx.send(request.generation);
                });
            }
            UiEvent::Shutdown => return false,
        }
        true
    }
}
