//! Entity store abstraction trait.
//!
//! Lets request handlers run against any relational backend without
//! holding a global session.

use async_trait::async_trait;
use hero_core::{
    Hero, HeroId, HeroPowerWithEnds, HeroWithPowers, NewHeroPower, Power, PowerDescription,
    PowerId, PowerWithHeroes, SeedData,
};

use crate::StoreError;

/// Counts of rows written by [`HeroStore::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub heroes: usize,
    pub powers: usize,
    pub hero_powers: usize,
}

impl SeedReport {
    /// Returns `true` if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heroes == 0 && self.powers == 0 && self.hero_powers == 0
    }
}

/// Persistent store for heroes, powers and their associations.
///
/// Implementations must be `Send + Sync` to allow sharing across request
/// handlers. Every method scopes its own connection or transaction.
#[async_trait]
pub trait HeroStore: Send + Sync {
    /// All heroes, ordered by id.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the query fails.
    async fn list_heroes(&self) -> Result<Vec<Hero>, StoreError>;

    /// One hero with its associations, or `None` if absent.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the query fails, or
    /// [`StoreError::CorruptRow`] if an association has an unknown strength.
    async fn hero(&self, id: HeroId) -> Result<Option<HeroWithPowers>, StoreError>;

    /// All powers, ordered by id.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the query fails.
    async fn list_powers(&self) -> Result<Vec<Power>, StoreError>;

    /// One power with its associations, or `None` if absent.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the query fails, or
    /// [`StoreError::CorruptRow`] if an association has an unknown strength.
    async fn power(&self, id: PowerId) -> Result<Option<PowerWithHeroes>, StoreError>;

    /// Replace a power's description and return the updated power.
    ///
    /// # Errors
    /// Returns [`StoreError::PowerNotFound`] if the power does not exist.
    async fn update_power_description(
        &self,
        id: PowerId,
        description: &PowerDescription,
    ) -> Result<PowerWithHeroes, StoreError>;

    /// Create the association between a hero and a power, or replace the
    /// strength of the existing one. Runs as a single transaction.
    ///
    /// # Errors
    /// Returns [`StoreError::HeroNotFound`] or [`StoreError::PowerNotFound`]
    /// if either end is missing; nothing is written in that case.
    async fn upsert_hero_power(&self, new: NewHeroPower)
        -> Result<HeroPowerWithEnds, StoreError>;

    /// Load `data` if the store holds no heroes yet.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidSeed`] if an association refers outside
    /// the data set; nothing is written in that case.
    async fn seed(&self, data: &SeedData) -> Result<SeedReport, StoreError>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if a trivial query fails.
    async fn ping(&self) -> Result<(), StoreError>;
}
