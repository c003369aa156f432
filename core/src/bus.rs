//! # In-Process Dispatcher
//!
//! Routes a typed request to the single handler registered for its
//! (request, result) type pair.
//!
//! The registry is filled once through [`BusBuilder`], which rejects a second
//! handler for the same pair, and is frozen by [`BusBuilder::build`]. The
//! resulting [`Bus`] is cheap to clone and never changes afterwards, so it is
//! shared without locks. A missing handler is only noticed when a request of
//! that type is first dispatched.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use recipebook_common::error::{RecipeError, Result};
use recipebook_common::messaging::{Command, CommandHandler, Query, QueryHandler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct HandlerKey {
    request: TypeId,
    output: TypeId,
}

impl HandlerKey {
    fn of<R: 'static, O: 'static>() -> Self {
        Self {
            request: TypeId::of::<R>(),
            output: TypeId::of::<O>(),
        }
    }
}

/// Holds an `Arc<dyn CommandHandler<C>>` or `Arc<dyn QueryHandler<Q>>`.
type ErasedHandler = Box<dyn Any + Send + Sync>;

#[derive(Default)]
struct Registry {
    commands: HashMap<HandlerKey, ErasedHandler>,
    queries: HashMap<HandlerKey, ErasedHandler>,
}

/// Collects handlers before the dispatcher is frozen.
#[derive(Default)]
pub struct BusBuilder {
    registry: Registry,
}

impl BusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for command `C`. Fails if `C` already has one.
    pub fn command<C, H>(mut self, handler: H) -> Result<Self>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let handler: Arc<dyn CommandHandler<C>> = Arc::new(handler);
        register::<C, C::Output>(&mut self.registry.commands, "command", Box::new(handler))?;
        Ok(self)
    }

    /// Registers the handler for query `Q`. Fails if `Q` already has one.
    pub fn query<Q, H>(mut self, handler: H) -> Result<Self>
    where
        Q: Query,
        H: QueryHandler<Q> + 'static,
    {
        let handler: Arc<dyn QueryHandler<Q>> = Arc::new(handler);
        register::<Q, Q::Output>(&mut self.registry.queries, "query", Box::new(handler))?;
        Ok(self)
    }

    pub fn build(self) -> Bus {
        debug!(
            commands = self.registry.commands.len(),
            queries = self.registry.queries.len(),
            "dispatcher frozen"
        );
        Bus {
            registry: Arc::new(self.registry),
        }
    }
}

fn register<R: 'static, O: 'static>(
    table: &mut HashMap<HandlerKey, ErasedHandler>,
    kind: &str,
    handler: ErasedHandler,
) -> Result<()> {
    let key = HandlerKey::of::<R, O>();
    if table.contains_key(&key) {
        return Err(RecipeError::Configuration(format!(
            "A {kind} handler is already registered for {} -> {}.",
            type_name::<R>(),
            type_name::<O>()
        )));
    }
    table.insert(key, handler);
    Ok(())
}

fn not_registered<R, O>(kind: &str) -> RecipeError {
    RecipeError::Configuration(format!(
        "No {kind} handler registered for {} -> {}.",
        type_name::<R>(),
        type_name::<O>()
    ))
}

/// Immutable, shareable dispatcher.
#[derive(Clone)]
pub struct Bus {
    registry: Arc<Registry>,
}

impl Bus {
    pub fn builder() -> BusBuilder {
        BusBuilder::new()
    }

    /// Dispatches `command` to its handler and returns the handler's result
    /// unchanged. Exactly one handler runs per call.
    pub async fn send<C: Command>(&self, command: C, cancel: &CancellationToken) -> Result<C::Output> {
        let handler = self
            .registry
            .commands
            .get(&HandlerKey::of::<C, C::Output>())
            .and_then(|h| h.downcast_ref::<Arc<dyn CommandHandler<C>>>())
            .ok_or_else(|| not_registered::<C, C::Output>("command"))?;

        debug!(command = type_name::<C>(), "dispatching");
        handler.handle(command, cancel).await
    }

    /// Query counterpart of [`Bus::send`].
    pub async fn query<Q: Query>(&self, query: Q, cancel: &CancellationToken) -> Result<Q::Output> {
        let handler = self
            .registry
            .queries
            .get(&HandlerKey::of::<Q, Q::Output>())
            .and_then(|h| h.downcast_ref::<Arc<dyn QueryHandler<Q>>>())
            .ok_or_else(|| not_registered::<Q, Q::Output>("query"))?;

        debug!(query = type_name::<Q>(), "dispatching");
        handler.handle(query, cancel).await
    }
}
