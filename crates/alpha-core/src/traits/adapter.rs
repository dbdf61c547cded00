// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all remote adapters must implement.

use async_trait::async_trait;

use crate::error::AlphaError;
use crate::types::HealthStatus;

/// The base trait for remote collaborator adapters.
#[async_trait]
pub trait RemoteAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Reports whether the adapter is able to serve requests.
    ///
    /// Implementations must not spend remote quota on this check.
    async fn health_check(&self) -> Result<HealthStatus, AlphaError>;
}
