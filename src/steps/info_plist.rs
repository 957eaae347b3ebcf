//! Info.plist automation step
//!
//! Merges the profile's default Info.plist into the generated project and
//! optionally prunes keys no other step claims. The profile-level
//! `automate_info_plist` flag gates the whole step; these settings tune it.

use serde::{Deserialize, Serialize};
use toml::value::Table;
use toml::Value;

use crate::catalog::StepType;

pub const NAME: &str = "info-plist";

/// Typed view of the step's settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoPlistSettings {
    /// Merge the project's own Info.plist over the profile default.
    pub merge_project_plist: bool,
    /// Drop keys not referenced by any enabled step.
    pub remove_unused_keys: bool,
}

impl Default for InfoPlistSettings {
    fn default() -> Self {
        Self {
            merge_project_plist: true,
            remove_unused_keys: false,
        }
    }
}

pub fn step_type() -> StepType {
    StepType::new(NAME, defaults)
}

fn defaults() -> Table {
    let mut table = Table::new();
    table.insert("merge_project_plist".to_string(), Value::Boolean(true));
    table.insert("remove_unused_keys".to_string(), Value::Boolean(false));
    table
}
