//! Fuzz target: parsing and validating a `PATCH /powers/{id}` body.
//!
//! Accepted descriptions must always have at least the minimum number of
//! characters, whatever bytes they were built from.

#![no_main]

use hero_core::PowerDescription;
use hero_gateway::dto::UpdatePowerBody;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = serde_json::from_slice::<UpdatePowerBody>(data) else {
        return;
    };
    let Some(text) = body.description else {
        return;
    };
    let chars = text.chars().count();
    match PowerDescription::new(text) {
        Ok(_) => assert!(chars >= PowerDescription::MIN_CHARS),
        Err(_) => assert!(chars < PowerDescription::MIN_CHARS),
    }
});
