//! Error types for the store crate.

use hero_core::{HeroId, PowerId};

/// Errors that can occur while reading or writing the entity store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The referenced hero does not exist.
    #[error("hero not found: {0}")]
    HeroNotFound(HeroId),

    /// The referenced power does not exist.
    #[error("power not found: {0}")]
    PowerNotFound(PowerId),

    /// A stored row could not be mapped onto a domain type.
    #[error("corrupt row in '{table}': {reason}")]
    CorruptRow { table: &'static str, reason: String },

    /// The seed data set refers to an entry it does not contain.
    #[error("invalid seed data: {reason}")]
    InvalidSeed { reason: String },

    /// Underlying database error.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Returns `true` if the error reports a missing hero or power.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::HeroNotFound(_) | StoreError::PowerNotFound(_))
    }
}
