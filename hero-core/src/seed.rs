//! Canonical data set loaded into an empty database.
//!
//! Associations refer to heroes and powers by their position in
//! [`SeedData::heroes`] and [`SeedData::powers`], since ids are only
//! assigned on insert.

use crate::strength::Strength;

/// A hero to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedHero {
    pub name: &'static str,
    pub super_name: &'static str,
}

/// A power to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPower {
    pub name: &'static str,
    pub description: &'static str,
}

/// An association to insert, by index into the hero and power lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedHeroPower {
    pub hero: usize,
    pub power: usize,
    pub strength: Strength,
}

/// The complete seed data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub heroes: Vec<SeedHero>,
    pub powers: Vec<SeedPower>,
    pub hero_powers: Vec<SeedHeroPower>,
}

const HEROES: [(&str, &str); 10] = [
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

const POWERS: [(&str, &str); 4] = [
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

const HERO_POWERS: [(usize, usize, Strength); 6] = [
    (0, 1, Strength::Strong),
    (1, 0, Strength::Average),
    (2, 2, Strength::Strong),
    (3, 1, Strength::Weak),
    (5, 0, Strength::Strong),
    (7, 1, Strength::Average),
];

/// Returns the canonical seed data set.
#[must_use]
pub fn seed_data() -> SeedData {
    SeedData {
        heroes: HEROES
            .iter()
            .map(|&(name, super_name)| SeedHero { name, super_name })
            .collect(),
        powers: POWERS
            .iter()
            .map(|&(name, description)| SeedPower { name, description })
            .collect(),
        hero_powers: HERO_POWERS
            .iter()
            .map(|&(hero, power, strength)| SeedHeroPower { hero, power, strength })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn seed_associations_reference_existing_entries() {
        let data = seed_data();
        for hp in &data.hero_powers {
            assert!(hp.hero < data.heroes.len(), "hero index {} out of range", hp.hero);
            assert!(hp.power < data.powers.len(), "power index {} out of range", hp.power);
        }
    }

    #[test]
    fn seed_associations_are_unique_per_pair() {
        let data = seed_data();
        let pairs: HashSet<_> = data.hero_powers.iter().map(|hp| (hp.hero, hp.power)).collect();
        assert_eq!(pairs.len(), data.hero_powers.len(), "duplicate (hero, power) pair in seed");
    }

    #[test]
    fn seed_power_descriptions_pass_update_validation() {
        for power in seed_data().powers {
            assert!(
                crate::PowerDescription::new(power.description).is_ok(),
                "seed description for {} is too short",
                power.name
            );
        }
    }
}
