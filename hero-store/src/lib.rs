//! Relational storage for the superheroes API.
//!
//! Persists heroes, powers and hero-power associations, and scopes each
//! operation to its own connection or transaction.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod sqlite;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use sqlite::SqliteStore;
pub use store::{HeroStore, SeedReport};
