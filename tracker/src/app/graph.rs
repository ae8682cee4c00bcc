//! # Dataflow Graph Primitives
//!
//! Building blocks for the derivation graph in [`super::derivation`].
//!
//! - [`Published`]: a value plus a version counter. Every input and every
//!   stage output is one of these; a stage sees a change as a version bump.
//! - [`EdgePolicy`]: how a stage reacts to input changes, either at once or
//!   after a quiescence window.
//! - [`StageGate`]: per-stage bookkeeping that turns input versions and the
//!   current time into "run now" / "not yet".
//!
//! ```text
//! inputs (Published) --versions--> StageGate --ready--> pure fn --> Published output
//! ```
//!
//! Nothing here knows about coins or portfolios and nothing here spawns or
//! sleeps: time is always passed in, so every decision is reproducible.

use std::time::{Duration, Instant};

/// A published value with a monotonically increasing version.
#[derive(Debug, Clone)]
pub struct Published<T> {
    value: T,
    version: u64,
}

impl<T> Published<T> {
    pub fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the value. Always bumps the version, even for an equal value.
    pub fn publish(&mut self, value: T) {
        self.value = value;
        self.version += 1;
    }
}

impl<T: Default> Default for Published<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Recompute policy for the edge(s) feeding a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Recompute in the same pass the change is observed.
    Immediate,
    /// Recompute once inputs have been quiet for the given window. Each new
    /// change restarts the window.
    Debounce(Duration),
}

/// Tracks which input versions a stage last saw and whether a run is due.
///
/// `N` is the number of declared inputs.
#[derive(Debug, Clone)]
pub struct StageGate<const N: usize> {
    policy: EdgePolicy,
    seen: Option<[u64; N]>,
    changed_at: Option<Instant>,
}

impl<const N: usize> StageGate<N> {
    pub fn new(policy: EdgePolicy) -> Self {
        Self {
            policy,
            seen: None,
            changed_at: None,
        }
    }

    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Record the input versions observed at `now`.
    ///
    /// Returns `true` when they differ from the previous observation, in which
    /// case the quiescence window restarts at `now`.
    pub fn observe(&mut self, versions: [u64; N], now: Instant) -> bool {
        if self.seen == Some(versions) {
            return false;
        }
        self.seen = Some(versions);
        self.changed_at = Some(now);
        true
    }

    /// Mark the stage due without an input change.
    ///
    /// An already pending window is left untouched.
    pub fn force(&mut self, now: Instant) {
        if self.changed_at.is_none() {
            self.changed_at = Some(now);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.changed_at.is_some()
    }

    /// Whether a pending run may happen at `now`.
    pub fn is_ready(&self, now: Instant) -> bool {
        match (self.changed_at, self.policy) {
            (None, _) => false,
            (Some(_), EdgePolicy::Immediate) => true,
            (Some(changed_at), EdgePolicy::Debounce(window)) => {
                now.saturating_duration_since(changed_at) >= window
            }
        }
    }

    /// Observe `versions` and, if the stage is ready, consume the pending run.
    ///
    /// Returns `true` when the caller must recompute and publish now.
    pub fn poll(&mut self, versions: [u64; N], now: Instant) -> bool {
        self.observe(versions, now);
        if self.is_ready(now) {
            self.changed_at = None;
            true
        } else {
            false
        }
    }

    /// Earliest instant at which a pending run becomes ready.
    pub fn deadline(&self) -> Option<Instant> {
        self.changed_at.map(|changed_at| match self.policy {
            EdgePolicy::Immediate => changed_at,
            EdgePolicy::Debounce(window) => changed_at + window,
        })
    }
}
