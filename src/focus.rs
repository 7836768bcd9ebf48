//! Focus tracking and deferred hiding of the suggestion list.
//!
//! Losing focus must not hide the list immediately, or a click on a
//! suggestion could never land. Instead of a bare timer, every blur hands
//! out a [`HideRequest`] stamped with a generation number; any event that
//! should keep the list alive (refocus, a selection) bumps the generation
//! and turns in-flight requests stale. A stale timer may still fire once,
//! harmlessly.

use std::time::Duration;

/// A scheduled request to hide the suggestion list after `delay`.
///
/// Pass `generation` back to [`FocusState::hide_elapsed`] once the delay
/// expires; requests that have gone stale in the meantime are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HideRequest {
    pub generation: u64,
    pub delay: Duration,
}

/// Tracks input focus and suggestion-list visibility.
#[derive(Clone, Debug)]
pub struct FocusState {
    focused: bool,
    visible: bool,
    generation: u64,
}

impl Default for FocusState {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusState {
    /// Starts unfocused with the suggestion list hidden.
    pub fn new() -> Self {
        Self {
            focused: false,
            visible: false,
            generation: 0,
        }
    }

    /// The input gained focus; the list becomes visible and any pending
    /// hide request goes stale.
    pub fn focus(&mut self) {
        self.focused = true;
        self.visible = true;
        self.generation += 1;
    }

    /// The input lost focus. Returns the hide request the caller must
    /// schedule; the list stays visible until the request fires.
    pub fn blur(&mut self, delay: Duration) -> HideRequest {
        self.focused = false;
        self.generation += 1;
        HideRequest {
            generation: self.generation,
            delay,
        }
    }

    /// A selection landed; any pending hide request goes stale.
    pub fn cancel_hide(&mut self) {
        self.generation += 1;
    }

    /// A scheduled hide request expired. Hides the list and returns `true`
    /// when the request is still current; stale requests are a no-op.
    pub fn hide_elapsed(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn suggestions_visible(&self) -> bool {
        self.visible
    }
}
