// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Trailing-edge debouncer.
//!
//! Typing "hello" fires five input events in well under a second. Searching on
//! each one would send five fan-outs, four of them obsolete before they land.
//! The debouncer collapses a burst into one call: every `call()` restarts the
//! quiet-period timer, and only when `delay` passes without another call does
//! the callback run, with the arguments of the *last* call. Intermediate
//! arguments are dropped, not queued.
//!
//! The timer lives in a small tokio task that owns the pending value. `call()`
//! never blocks and never runs the callback inline, so effects are always
//! observed asynchronously. The callback itself should be quick (the widget's
//! callback just spawns the search task), because a slow callback delays the
//! next burst's timer.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

enum Signal<T> {
    Call(T),
    Cancel,
}

/// Collapses bursts of calls into one trailing call.
///
/// Must be created inside a tokio runtime. Dropping the debouncer discards any
/// pending call.
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<Signal<T>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, mut callback: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Signal<T>>();

        let task = tokio::spawn(async move {
            let mut pending: Option<(T, Instant)> = None;
            loop {
                match pending.take() {
                    None => match rx.recv().await {
                        Some(Signal::Call(value)) => {
                            pending = Some((value, Instant::now() + delay));
                        }
                        Some(Signal::Cancel) => {}
                        None => break,
                    },
                    Some((value, deadline)) => {
                        tokio::select! {
                            biased;

                            signal = rx.recv() => match signal {
                                // Newer call wins and restarts the quiet period
                                Some(Signal::Call(newer)) => {
                                    pending = Some((newer, Instant::now() + delay));
                                }
                                Some(Signal::Cancel) => {}
                                None => break,
                            },

                            () = sleep_until(deadline) => callback(value),
                        }
                    }
                }
            }
        });

        Self { delay, tx, task }
    }

    /// Schedule `value`, replacing whatever was pending.
    pub fn call(&self, value: T) {
        // The task only exits once every sender is gone, so this cannot fail
        // while `self` is alive.
        let _ = self.tx.send(Signal::Call(value));
    }

    /// Drop the pending call, if any, without running it.
    pub fn cancel(&self) {
        let _ = self.tx.send(Signal::Cancel);
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
