//! Persisted entity records.

use serde::{Deserialize, Serialize};

use crate::id::{HeroId, HeroPowerId, PowerId};
use crate::strength::Strength;

/// A row of the `heroes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub super_name: String,
}

/// A row of the `powers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power {
    pub id: PowerId,
    pub name: String,
    pub description: String,
}

/// A row of the `hero_powers` association table.
///
/// At most one association exists per `(hero_id, power_id)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPower {
    pub id: HeroPowerId,
    pub strength: Strength,
    pub hero_id: HeroId,
    pub power_id: PowerId,
}

/// A hero together with each of its associations and the associated power.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroWithPowers {
    pub hero: Hero,
    pub powers: Vec<(HeroPower, Power)>,
}

/// A power together with each of its associations and the associated hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerWithHeroes {
    pub power: Power,
    pub heroes: Vec<(HeroPower, Hero)>,
}

/// Input for creating or replacing the association of a hero and a power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewHeroPower {
    pub strength: Strength,
    pub hero_id: HeroId,
    pub power_id: PowerId,
}

/// A freshly written association with both of its endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroPowerWithEnds {
    pub hero_power: HeroPower,
    pub hero: Hero,
    pub power: Power,
}
