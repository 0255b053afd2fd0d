//! Core domain types for the superheroes API.
//!
//! Defines the persisted entities (heroes, powers and the hero-power
//! association), their typed ids, the `Strength` rating, the validated
//! power description, and the canonical seed data set.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod description;
pub mod entity;
pub mod error;
pub mod id;
pub mod seed;
pub mod strength;

pub use description::PowerDescription;
pub use entity::{
    Hero, HeroPower, HeroPowerWithEnds, HeroWithPowers, NewHeroPower, Power, PowerWithHeroes,
};
pub use error::CoreError;
pub use id::{HeroId, HeroPowerId, PowerId};
pub use seed::{seed_data, SeedData, SeedHero, SeedHeroPower, SeedPower};
pub use strength::Strength;
