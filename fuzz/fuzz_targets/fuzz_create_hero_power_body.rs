//! Fuzz target: parsing and validating a `POST /hero_powers` body.
//!
//! Arbitrary bytes must never panic the body parser or the strength check.

#![no_main]

use hero_core::Strength;
use hero_gateway::dto::CreateHeroPowerBody;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = serde_json::from_slice::<CreateHeroPowerBody>(data) else {
        return;
    };
    if let Some(raw) = body.strength.as_deref() {
        if let Ok(strength) = raw.parse::<Strength>() {
            assert_eq!(strength.as_str(), raw, "accepted strengths must be canonical");
        }
    }
});
