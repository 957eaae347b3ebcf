//! Property tests for profile document parsing and rendering.

use std::path::Path;

use chrono::TimeZone;
use proptest::prelude::*;

use gantry::catalog::closest_name;
use gantry::profile::{BuildProfile, StepRecord};
use gantry::store::{parse_profile, render_profile};
use toml::value::Table;
use toml::Value;

fn step_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `parse_profile` never panics on arbitrary input.
    #[test]
    fn property_parse_profile_never_panics(s in ".{0,256}") {
        let _ = parse_profile(&s, Path::new("default.toml"));
    }

    /// PROPERTY: a rendered document parses back to the same profile.
    #[test]
    fn property_render_parse_round_trips(
        names in proptest::collection::btree_set(step_name(), 0..6),
        enabled in any::<bool>(),
        attempts in 0i64..1000,
    ) {
        let stamp = chrono::Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut profile = BuildProfile::new();
        profile.created_at = stamp;
        profile.updated_at = stamp;

        for name in &names {
            let mut settings = Table::new();
            settings.insert("attempts".to_string(), Value::Integer(attempts));
            profile.steps.insert(
                name.clone(),
                StepRecord {
                    name: name.clone(),
                    enabled,
                    settings,
                },
            );
        }

        let rendered = render_profile(&profile).unwrap();
        let (parsed, warnings) = parse_profile(&rendered, Path::new("default.toml")).unwrap();

        prop_assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
        prop_assert_eq!(parsed, profile);
    }

    /// PROPERTY: key suggestions only ever come from the candidate list.
    #[test]
    fn property_suggestions_come_from_candidates(s in ".{0,24}") {
        let candidates = ["info-plist", "entitlements", "signing", "frameworks"];
        if let Some(suggestion) = closest_name(&s, candidates) {
            prop_assert!(candidates.contains(&suggestion.as_str()));
        }
    }
}
