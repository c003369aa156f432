//! # Messaging Contracts
//!
//! Request/handler traits for the in-process dispatcher.
//!
//! A request type names its result type through an associated `Output`, so a
//! (request, result) pair is fixed at compile time. Handlers are async, take the
//! caller's [`CancellationToken`] and must pass it on to anything that waits.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// A request that changes state.
pub trait Command: Send + 'static {
    type Output: Send + 'static;
}

/// A read-only request.
pub trait Query: Send + 'static {
    type Output: Send + 'static;
}

#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C, cancel: &CancellationToken) -> Result<C::Output>;
}

#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, query: Q, cancel: &CancellationToken) -> Result<Q::Output>;
}
