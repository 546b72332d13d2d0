// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Render state machine.
//!
//! The widget is always in exactly one of five states:
//!
//! ```text
//!                 submit                 resolved(≥1)
//!   ┌──────┐  ───────────▶  ┌─────────┐ ─────────────▶ Populated
//!   │ Idle │                │ Loading │ ─────────────▶ Empty       (resolved(0))
//!   └──────┘  ◀───────────  └─────────┘ ─────────────▶ Error       (failed)
//!                cleared         ▲
//!                (from any)      └──── submit (from Populated / Empty / Error)
//! ```
//!
//! Container visibility is tracked next to the state rather than inside it.
//! An outside click hides the container but leaves the state alone, and only
//! the next state change shows it again. Focusing the input without typing
//! therefore never resurrects stale results.
//!
//! Events that make no sense in the current state (a resolution arriving in
//! Idle, say) are ignored. The controller discards superseded results before
//! they get here, so in practice those only show up in tests.

mod markup;
mod styles;

pub use markup::{escape_html, render_list};
pub use styles::{stylesheet, STYLE_MARKER};

use crate::types::ResultItem;

/// What the results list is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Loading,
    Populated(Vec<ResultItem>),
    Empty,
    Error,
}

impl RenderState {
    pub fn name(&self) -> &'static str {
        match self {
            RenderState::Idle => "idle",
            RenderState::Loading => "loading",
            RenderState::Populated(_) => "populated",
            RenderState::Empty => "empty",
            RenderState::Error => "error",
        }
    }

    /// Whether the container should be visible right after entering this state.
    pub fn shows_container(&self) -> bool {
        !matches!(self, RenderState::Idle)
    }

    /// Next state for `event`.
    pub fn transition(self, event: RenderEvent) -> RenderState {
        match (self, event) {
            (_, RenderEvent::QueryCleared) => RenderState::Idle,
            (_, RenderEvent::QuerySubmitted) => RenderState::Loading,
            (RenderState::Loading, RenderEvent::Resolved(items)) if items.is_empty() => {
                RenderState::Empty
            }
            (RenderState::Loading, RenderEvent::Resolved(items)) => RenderState::Populated(items),
            (RenderState::Loading, RenderEvent::Failed) => RenderState::Error,
            (state, _) => state,
        }
    }
}

/// Inputs to the state machine, raised by the widget controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// Trimmed query became empty.
    QueryCleared,
    /// A non-empty query was submitted.
    QuerySubmitted,
    /// The current search finished with these items.
    Resolved(Vec<ResultItem>),
    /// The current search failed for a reason other than supersession.
    Failed,
}

/// State plus container visibility.
#[derive(Debug, Clone, Default)]
pub struct RenderMachine {
    state: RenderState,
    visible: bool,
}

impl RenderMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Apply `event`; returns true when the state changed.
    pub fn apply(&mut self, event: RenderEvent) -> bool {
        let previous = std::mem::take(&mut self.state);
        let next = previous.clone().transition(event);
        let changed = next != previous;
        self.visible = next.shows_container();
        self.state = next;
        changed
    }

    /// Hide the container after a click outside the widget.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}
