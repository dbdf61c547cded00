// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-flight lanes guarding the classification and search calls.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Observable state of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneState {
    /// No call in flight; the next request is accepted.
    Idle,
    /// A call is in flight; further requests on this lane are rejected.
    Pending,
}

impl fmt::Display for LaneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneState::Idle => write!(f, "idle"),
            LaneState::Pending => write!(f, "pending"),
        }
    }
}

/// At-most-one in-flight operation, claimed with [`Lane::try_acquire`].
#[derive(Debug)]
pub(crate) struct Lane {
    name: &'static str,
    pending: AtomicBool,
}

impl Lane {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: AtomicBool::new(false),
        }
    }

    pub(crate) fn state(&self) -> LaneState {
        if self.pending.load(Ordering::Acquire) {
            LaneState::Pending
        } else {
            LaneState::Idle
        }
    }

    /// Moves the lane from idle to pending, or returns `None` if already pending.
    ///
    /// The lane returns to idle when the guard is dropped, whatever the outcome
    /// of the call it protected.
    pub(crate) fn try_acquire(&self) -> Option<LaneGuard<'_>> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        debug!(lane = self.name, "lane idle -> pending");
        Some(LaneGuard { lane: self })
    }
}

/// Releases its lane on drop.
#[derive(Debug)]
pub(crate) struct LaneGuard<'a> {
    lane: &'a Lane,
}

impl Drop for LaneGuard<'_> {
    fn drop(&mut self) {
        self.lane.pending.store(false, Ordering::Release);
        debug!(lane = self.lane.name, "lane pending -> idle");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_state_display() {
        assert_eq!(LaneState::Idle.to_string(), "idle");
        assert_eq!(LaneState::Pending.to_string(), "pending");
    }

    #[test]
    fn second_acquire_is_rejected_while_pending() {
        let lane = Lane::new("test");
        let guard = lane.try_acquire().expect("idle lane should be acquired");
        assert_eq!(lane.state(), LaneState::Pending);
        assert!(lane.try_acquire().is_none());
        drop(guard);
        assert_eq!(lane.state(), LaneState::Idle);
        assert!(lane.try_acquire().is_some());
    }

    #[test]
    fn guard_releases_on_panic() {
        let lane = Lane::new("test");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = lane.try_acquire().unwrap();
            panic!("call blew up");
        }));
        assert!(result.is_err());
        assert_eq!(lane.state(), LaneState::Idle);
    }
}
