//! Framework embedding step
//!
//! Tracks which frameworks get embedded into the product bundle and whether
//! simulator slices are stripped from them before signing.

use serde::{Deserialize, Serialize};
use toml::value::Table;
use toml::Value;

use crate::catalog::StepType;

pub const NAME: &str = "frameworks";

/// Typed view of the step's settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworksSettings {
    /// Framework names to embed, e.g. `AppleCoreNative.framework`.
    pub embed: Vec<String>,
    pub strip_simulator_slices: bool,
}

impl Default for FrameworksSettings {
    fn default() -> Self {
        Self {
            embed: Vec::new(),
            strip_simulator_slices: true,
        }
    }
}

pub fn step_type() -> StepType {
    StepType::new(NAME, defaults)
}

fn defaults() -> Table {
    let mut table = Table::new();
    table.insert("embed".to_string(), Value::Array(Vec::new()));
    table.insert("strip_simulator_slices".to_string(), Value::Boolean(true));
    table
}
