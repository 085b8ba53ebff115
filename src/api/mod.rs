//! HTTP access to the school API
//!
//! `ApiClient` issues the calls; `ResourceRemover` is the seam the deletion
//! workflow mutates through.

mod client;

pub use client::ApiClient;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::workflow::Target;

/// Removes one remote resource.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait ResourceRemover: Send + Sync {
    async fn remove(&self, target: &Target) -> Result<(), ApiError>;
}
