//! Response payloads, one shape per endpoint.
//!
//! Nested entities are always summaries, so a hero never expands back into
//! its powers' heroes.

use hero_core::{
    Hero, HeroId, HeroPower, HeroPowerId, HeroPowerWithEnds, HeroWithPowers, Power, PowerId,
    PowerWithHeroes, Strength,
};
use serde::{Deserialize, Serialize};

// ── Request bodies ────────────────────────────────────────────────────────────

/// Body of `PATCH /powers/{id}`. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePowerBody {
    pub description: Option<String>,
}

/// Body of `POST /hero_powers`.
///
/// Every field is optional at the parsing stage so that missing values are
/// reported with the same errors as invalid ones.
#[derive(Debug, Default, Deserialize)]
pub struct CreateHeroPowerBody {
    pub strength: Option<String>,
    pub hero_id: Option<HeroId>,
    pub power_id: Option<PowerId>,
}

// ── Summaries ─────────────────────────────────────────────────────────────────

/// A hero without its associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroSummary {
    pub id: HeroId,
    pub name: String,
    pub super_name: String,
}

impl From<Hero> for HeroSummary {
    fn from(hero: Hero) -> Self {
        Self { id: hero.id, name: hero.name, super_name: hero.super_name }
    }
}

/// A power without its associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerSummary {
    pub id: PowerId,
    pub name: String,
    pub description: String,
}

impl From<Power> for PowerSummary {
    fn from(power: Power) -> Self {
        Self { id: power.id, name: power.name, description: power.description }
    }
}

// ── Details ───────────────────────────────────────────────────────────────────

/// An association as seen from its hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroPowerWithPower {
    pub id: HeroPowerId,
    pub strength: Strength,
    pub hero_id: HeroId,
    pub power_id: PowerId,
    pub power: PowerSummary,
}

/// `GET /heroes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroDetail {
    pub id: HeroId,
    pub name: String,
    pub super_name: String,
    pub hero_powers: Vec<HeroPowerWithPower>,
}

impl From<HeroWithPowers> for HeroDetail {
    fn from(HeroWithPowers { hero, powers }: HeroWithPowers) -> Self {
        let hero_powers = powers
            .into_iter()
            .map(|(link, power): (HeroPower, Power)| HeroPowerWithPower {
                id: link.id,
                strength: link.strength,
                hero_id: link.hero_id,
                power_id: link.power_id,
                power: power.into(),
            })
            .collect();
        Self { id: hero.id, name: hero.name, super_name: hero.super_name, hero_powers }
    }
}

/// An association as seen from its power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroPowerWithHero {
    pub id: HeroPowerId,
    pub strength: Strength,
    pub hero_id: HeroId,
    pub power_id: PowerId,
    pub hero: HeroSummary,
}

/// `GET /powers/{id}` and `PATCH /powers/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerDetail {
    pub id: PowerId,
    pub name: String,
    pub description: String,
    pub hero_powers: Vec<HeroPowerWithHero>,
}

impl From<PowerWithHeroes> for PowerDetail {
    fn from(PowerWithHeroes { power, heroes }: PowerWithHeroes) -> Self {
        let hero_powers = heroes
            .into_iter()
            .map(|(link, hero): (HeroPower, Hero)| HeroPowerWithHero {
                id: link.id,
                strength: link.strength,
                hero_id: link.hero_id,
                power_id: link.power_id,
                hero: hero.into(),
            })
            .collect();
        Self { id: power.id, name: power.name, description: power.description, hero_powers }
    }
}

/// `POST /hero_powers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroPowerCreated {
    pub id: HeroPowerId,
    pub strength: Strength,
    pub hero_id: HeroId,
    pub power_id: PowerId,
    pub hero: HeroSummary,
    pub power: PowerSummary,
}

impl From<HeroPowerWithEnds> for HeroPowerCreated {
    fn from(HeroPowerWithEnds { hero_power, hero, power }: HeroPowerWithEnds) -> Self {
        Self {
            id: hero_power.id,
            strength: hero_power.strength,
            hero_id: hero_power.hero_id,
            power_id: hero_power.power_id,
            hero: hero.into(),
            power: power.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_hero() -> Hero {
        Hero { id: HeroId(1), name: "Kamala Khan".to_owned(), super_name: "Ms. Marvel".to_owned() }
    }

    fn sample_power() -> Power {
        Power {
            id: PowerId(2),
            name: "flight".to_owned(),
            description: "gives the wielder the ability to fly".to_owned(),
        }
    }

    fn sample_link() -> HeroPower {
        HeroPower {
            id: HeroPowerId(5),
            strength: Strength::Strong,
            hero_id: HeroId(1),
            power_id: PowerId(2),
        }
    }

    #[test]
    fn hero_detail_nests_power_summaries_only() {
        let detail = HeroDetail::from(HeroWithPowers {
            hero: sample_hero(),
            powers: vec![(sample_link(), sample_power())],
        });
        let value = match serde_json::to_value(&detail) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Kamala Khan",
                "super_name": "Ms. Marvel",
                "hero_powers": [{
                    "id": 5,
                    "strength": "Strong",
                    "hero_id": 1,
                    "power_id": 2,
                    "power": {
                        "id": 2,
                        "name": "flight",
                        "description": "gives the wielder the ability to fly"
                    }
                }]
            })
        );
    }

    #[test]
    fn power_detail_nests_hero_summaries_only() {
        let detail = PowerDetail::from(PowerWithHeroes {
            power: sample_power(),
            heroes: vec![(sample_link(), sample_hero())],
        });
        let value = match serde_json::to_value(&detail) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(value["hero_powers"][0]["hero"]["super_name"], "Ms. Marvel");
        assert!(value["hero_powers"][0]["hero"].get("hero_powers").is_none());
    }

    #[test]
    fn create_body_tolerates_missing_fields() {
        let body: CreateHeroPowerBody = match serde_json::from_str(r#"{"strength": "Weak"}"#) {
            Ok(b) => b,
            Err(e) => panic!("parse failed: {e}"),
        };
        assert_eq!(body.strength.as_deref(), Some("Weak"));
        assert!(body.hero_id.is_none());
        assert!(body.power_id.is_none());
    }

    #[test]
    fn create_body_rejects_mistyped_ids() {
        let result =
            serde_json::from_str::<CreateHeroPowerBody>(r#"{"strength": "Weak", "hero_id": "one"}"#);
        assert!(result.is_err(), "string hero_id must not parse");
    }
}
