//! # Recipebook Common
//!
//! Shared vocabulary of the recipe catalog: the domain model, the request
//! and result records, the dispatcher contracts, and the storage port.
//!
//! * **[`recipe`]**: Entities and value objects. Pure data, no IO.
//! * **[`contracts`]**: Untrusted requests and the records handed back.
//! * **[`messaging`]**: `Command`/`Query` and their handler traits.
//! * **[`repository`]**: The port implemented by storage adapters.
//! * **[`error`]**: The error taxonomy seen by every caller.

pub mod config;
pub mod contracts;
pub mod error;
pub mod macros;
pub mod messaging;
pub mod recipe;
pub mod repository;

pub use error::{RecipeError, Result};
