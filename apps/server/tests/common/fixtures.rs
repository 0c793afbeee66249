//! Test fixtures: a small catalog and request bodies.

use serde_json::{json, Value};

/// Item asset with one inactive entry and one alias.
pub const ITEMS_JSON: &str = r#"{
    "countries": [
        { "active": true, "names": ["France"], "alternativeNames": ["Gaul"],
          "bounding": [[0, 0], [10, 10]], "geometry": [] },
        { "active": true, "names": ["Germany", "Deutschland"], "alternativeNames": [] },
        { "active": true, "names": ["Spain"], "alternativeNames": ["Hispania"] },
        { "active": true, "names": ["Italy"], "alternativeNames": [] },
        { "active": true, "names": ["Chad"], "alternativeNames": [] },
        { "active": false, "names": ["Atlantis"], "alternativeNames": [] }
    ]
}"#;

/// Group asset: two regions and two lists.
pub const GROUPS_JSON: &str = r#"{
    "regions": [
        { "name": "europe", "displayName": "Europe",
          "countries": ["France", "Germany", "Spain", "Italy", "Atlantis"] },
        { "name": "africa", "displayName": "Africa", "countries": ["Chad"] }
    ],
    "lists": [
        { "name": "all", "displayName": "All countries",
          "countries": ["France", "Germany", "Spain", "Italy", "Chad"] },
        { "name": "big", "displayName": "Big countries", "countries": ["France", "Germany"] }
    ]
}"#;

/// Body for POST /api/sessions.
pub fn create_session(region: &str, list: &str, seed: u64) -> Value {
    json!({ "region": region, "list": list, "seed": seed })
}

/// Body for POST /api/sessions/{id}/guess.
pub fn guess(text: &str) -> Value {
    json!({ "guess": text })
}
