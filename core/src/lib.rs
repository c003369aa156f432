//! # Recipebook Core
//!
//! The application layer of the recipe catalog.
//!
//! * **[`validation`]**: Turns an untrusted request into a normalized [`Recipe`](recipebook_common::recipe::Recipe).
//! * **[`bus`]**: Routes commands and queries to their single registered handler.
//! * **[`recipes`]**: The create and list use cases.
//! * **[`storage`]**: Concrete repositories, in memory and SQLite.

pub mod bus;
pub mod recipes;
pub mod storage;
pub mod validation;

pub use bus::{Bus, BusBuilder};
pub use recipes::recipe_bus;
