//! Edit provider trait.

use crate::edit::types::{EditRequest, EditResult};
use crate::error::Result;
use async_trait::async_trait;

/// Trait for image edit providers.
///
/// Each call is independent and stateless; providers hold no memory of
/// prior requests and never retry on their own.
#[async_trait]
pub trait EditProvider: Send + Sync {
    /// Performs exactly one edit request and normalizes the response.
    async fn edit(&self, request: &EditRequest) -> Result<EditResult>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;

    /// Checks if the provider is reachable and authenticated.
    async fn health_check(&self) -> Result<()>;
}
