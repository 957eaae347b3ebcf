//! Property tests for step registry reconciliation.

use std::collections::BTreeSet;

use proptest::prelude::*;

use gantry::catalog::{StepCatalog, StepType};
use gantry::profile::{BuildProfile, StepRecord};
use toml::value::Table;
use toml::Value;

// Fixed name pool so catalog entries can carry `&'static str` names.
const POOL: &[&str] = &[
    "archive",
    "dsym",
    "entitlements",
    "frameworks",
    "info-plist",
    "notarize",
    "signing",
    "symbols",
];

fn pool_subset() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::collection::btree_set(0..POOL.len(), 0..=POOL.len())
        .prop_map(|indices| indices.into_iter().map(|i| POOL[i]).collect())
}

fn seeded_table() -> Table {
    let mut table = Table::new();
    table.insert("seeded".to_string(), Value::Boolean(true));
    table
}

fn hand_edited_table() -> Table {
    let mut table = Table::new();
    table.insert(
        "identity".to_string(),
        Value::String("by hand".to_string()),
    );
    table
}

fn profile_of(names: &[&'static str]) -> BuildProfile {
    let mut profile = BuildProfile::new();
    for name in names {
        profile.steps.insert(
            name.to_string(),
            StepRecord {
                name: name.to_string(),
                enabled: false,
                settings: hand_edited_table(),
            },
        );
    }
    profile
}

fn catalog_of<I>(names: I) -> StepCatalog
where
    I: IntoIterator<Item = &'static str>,
{
    let mut catalog = StepCatalog::new();
    for name in names {
        catalog.register(StepType::new(name, seeded_table));
    }
    catalog
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after sync the registry key set equals the catalog name set.
    #[test]
    fn property_sync_registry_matches_catalog(
        registry in pool_subset(),
        catalog_names in pool_subset(),
    ) {
        let mut profile = profile_of(&registry);
        let catalog = catalog_of(catalog_names.iter().copied());
        profile.sync_steps(&catalog);

        let keys: BTreeSet<&str> = profile.steps.keys().map(String::as_str).collect();
        let expected: BTreeSet<&str> = catalog_names.iter().copied().collect();
        prop_assert_eq!(keys, expected);
    }

    /// PROPERTY: records present before and after sync keep their state.
    #[test]
    fn property_sync_preserves_surviving_records(
        registry in pool_subset(),
        catalog_names in pool_subset(),
    ) {
        let mut profile = profile_of(&registry);
        let catalog = catalog_of(catalog_names.iter().copied());
        profile.sync_steps(&catalog);

        for name in registry.iter().filter(|n| catalog_names.contains(*n)) {
            let record = profile.step(name).expect("surviving record");
            prop_assert!(!record.enabled, "sync re-enabled {}", name);
            prop_assert_eq!(
                record.settings.get("identity").and_then(|v| v.as_str()),
                Some("by hand")
            );
        }
    }

    /// PROPERTY: the report splits names into added (catalog order), removed
    /// and retained (registry order), and nothing else.
    #[test]
    fn property_sync_report_partitions_names(
        registry in pool_subset(),
        catalog_names in pool_subset(),
    ) {
        let mut profile = profile_of(&registry);
        // Register in reverse order so catalog order differs from key order.
        let catalog = catalog_of(catalog_names.iter().rev().copied());
        let report = profile.sync_steps(&catalog);

        let expected_added: Vec<String> = catalog_names
            .iter()
            .rev()
            .filter(|n| !registry.contains(*n))
            .map(|n| n.to_string())
            .collect();
        let expected_removed: Vec<String> = registry
            .iter()
            .filter(|n| !catalog_names.contains(*n))
            .map(|n| n.to_string())
            .collect();
        let expected_retained: Vec<String> = registry
            .iter()
            .filter(|n| catalog_names.contains(*n))
            .map(|n| n.to_string())
            .collect();

        prop_assert_eq!(report.added, expected_added);
        prop_assert_eq!(report.removed, expected_removed);
        prop_assert_eq!(report.retained, expected_retained);
    }

    /// PROPERTY: a second sync against the same catalog is a no-op.
    #[test]
    fn property_sync_twice_converges(
        registry in pool_subset(),
        catalog_names in pool_subset(),
    ) {
        let mut profile = profile_of(&registry);
        let catalog = catalog_of(catalog_names.iter().copied());
        profile.sync_steps(&catalog);

        let snapshot = profile.steps.clone();
        let second = profile.sync_steps(&catalog);

        prop_assert!(second.is_noop());
        prop_assert_eq!(second.retained.len(), catalog_names.len());
        prop_assert_eq!(profile.steps, snapshot);
    }
}
