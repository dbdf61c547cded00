// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A latch that parks mock calls until the test releases them.

use tokio::sync::{Notify, Semaphore};

/// Parks each gated mock call after it starts until [`CallGate::release`] is called.
///
/// A test typically spawns the operation, awaits [`CallGate::entered`] to know
/// the call is in flight, inspects state, then releases it.
#[derive(Debug)]
pub struct CallGate {
    entered: Notify,
    release: Semaphore,
}

impl CallGate {
    pub fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }

    /// Waits until a gated call has started.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one parked call finish.
    pub fn release(&self) {
        self.release.add_permits(1);
    }

    /// Called from inside a mock; returns once the test releases it.
    pub(crate) async fn pass(&self) {
        self.entered.notify_one();
        if let Ok(permit) = self.release.acquire().await {
            permit.forget();
        }
    }
}

impl Default for CallGate {
    fn default() -> Self {
        Self::new()
    }
}
