//! Request executor contract
//!
//! The core never talks HTTP itself. It performs every call through an
//! [`Executor`]: "given a typed request, perform one HTTP call and return a
//! typed response or a transport error". [`crate::http::HttpClient`] is the
//! production implementation; anything else (a recording fake, a cached
//! client) can be plugged in.

use crate::error::Result;
use crate::pagination::Page;
use crate::v2::{ListRequest, SingleRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Performs exactly one remote call per method invocation
#[async_trait]
pub trait Executor: Send + Sync {
    /// Fetch one page (1-based) of a list request
    async fn list<R>(&self, request: &R, page: u32) -> Result<Page<R::Entity>>
    where
        R: ListRequest;

    /// Perform a single non-paginated request
    async fn send<R>(&self, request: &R) -> Result<R::Response>
    where
        R: SingleRequest;
}

#[async_trait]
impl<E: Executor> Executor for Arc<E> {
    async fn list<R>(&self, request: &R, page: u32) -> Result<Page<R::Entity>>
    where
        R: ListRequest,
    {
        self.as_ref().list(request, page).await
    }

    async fn send<R>(&self, request: &R) -> Result<R::Response>
    where
        R: SingleRequest,
    {
        self.as_ref().send(request).await
    }
}
