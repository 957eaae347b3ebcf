//! Build profile entity
//!
//! The profile is the single persistent record a build pipeline reads its
//! configuration from: scalar settings plus a name-keyed registry of build
//! steps. The registry is reconciled against the step-type catalog by
//! [`BuildProfile::sync_steps`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use toml::value::Table;

use crate::catalog::{StepCatalog, StepType};
use crate::error::{GantryError, GantryResult};

/// Scalar profile configuration, serialized as the `[settings]` table.
///
/// Field order matters for TOML rendering: scalar values first, the
/// `minimum_os_version` sub-table last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub automate_info_plist: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_info_plist: Option<PathBuf>,
    pub automate_entitlements: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_entitlements: Option<PathBuf>,
    pub app_uses_non_exempt_encryption: bool,
    pub minimum_os_version: MinimumOsVersions,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            automate_info_plist: true,
            default_info_plist: None,
            automate_entitlements: true,
            default_entitlements: None,
            app_uses_non_exempt_encryption: false,
            minimum_os_version: MinimumOsVersions::default(),
        }
    }
}

/// Minimum deployment target per platform. Empty string = inherit from the
/// project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimumOsVersions {
    pub ios: String,
    pub tvos: String,
    pub macos: String,
}

/// One registered build step and its persisted state.
///
/// `settings` is opaque here; each step type defines what lives inside it
/// (see `crate::steps`). Reconciliation never touches the settings of a
/// surviving record, so hand edits persist.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub name: String,
    pub enabled: bool,
    pub settings: Table,
}

impl StepRecord {
    /// Default-initialized record for a catalog entry.
    pub fn with_defaults(step_type: &StepType) -> Self {
        Self {
            name: step_type.name().to_string(),
            enabled: true,
            settings: step_type.defaults(),
        }
    }
}

/// Names touched by one reconciliation pass, in deterministic order
/// (`added` in catalog order, the rest in registry key order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub retained: Vec<String>,
}

impl SyncReport {
    /// True when the registry already matched the catalog.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// The build profile: settings plus the owning step registry.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildProfile {
    pub settings: ProfileSettings,
    pub steps: BTreeMap<String, StepRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BuildProfile {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            settings: ProfileSettings::default(),
            steps: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconcile the step registry against the catalog.
    ///
    /// Two passes: every catalog type missing from the registry gets a
    /// default-initialized record; every registry entry whose type is gone
    /// from the catalog is removed and dropped. Records present in both are
    /// not touched. Running this twice with the same catalog is a no-op the
    /// second time.
    pub fn sync_steps(&mut self, catalog: &StepCatalog) -> SyncReport {
        let mut added = Vec::new();
        for step_type in catalog.iter() {
            if !self.steps.contains_key(step_type.name()) {
                self.steps.insert(
                    step_type.name().to_string(),
                    StepRecord::with_defaults(step_type),
                );
                added.push(step_type.name().to_string());
            }
        }

        let stale: Vec<String> = self
            .steps
            .keys()
            .filter(|name| !catalog.contains(name.as_str()))
            .cloned()
            .collect();
        let mut removed = Vec::new();
        for name in stale {
            self.steps.remove(&name);
            removed.push(name);
        }

        let retained = self
            .steps
            .keys()
            .filter(|name| !added.contains(*name))
            .cloned()
            .collect();

        SyncReport {
            added,
            removed,
            retained,
        }
    }

    /// Flip a step's enabled flag. Returns whether the flag changed.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> GantryResult<bool> {
        let step = self
            .steps
            .get_mut(name)
            .ok_or_else(|| GantryError::UnknownStep {
                name: name.to_string(),
            })?;
        let changed = step.enabled != enabled;
        step.enabled = enabled;
        Ok(changed)
    }

    pub fn step(&self, name: &str) -> Option<&StepRecord> {
        self.steps.get(name)
    }

    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }

    /// Mark the profile as modified. Callers do this right before saving.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self::new()
    }
}
