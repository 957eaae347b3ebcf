//! Entitlements automation step
//!
//! Applies the profile's default entitlements file to the generated target
//! and checks requested capabilities against it. Gated by the profile-level
//! `automate_entitlements` flag.

use serde::{Deserialize, Serialize};
use toml::value::Table;
use toml::Value;

use crate::catalog::StepType;

pub const NAME: &str = "entitlements";

/// Typed view of the step's settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitlementsSettings {
    /// Merge the project's own entitlements over the profile default.
    pub merge_project_entitlements: bool,
    /// Fail the build when a capability is missing from the merged file.
    pub validate_capabilities: bool,
}

impl Default for EntitlementsSettings {
    fn default() -> Self {
        Self {
            merge_project_entitlements: true,
            validate_capabilities: true,
        }
    }
}

pub fn step_type() -> StepType {
    StepType::new(NAME, defaults)
}

fn defaults() -> Table {
    let mut table = Table::new();
    table.insert(
        "merge_project_entitlements".to_string(),
        Value::Boolean(true),
    );
    table.insert("validate_capabilities".to_string(), Value::Boolean(true));
    table
}
