//! Code-signing configuration step
//!
//! Records how the generated project should be signed. Empty `identity` and
//! `team_id` leave the choice to the signing toolchain.

use serde::{Deserialize, Serialize};
use toml::value::Table;
use toml::Value;

use crate::catalog::StepType;

pub const NAME: &str = "signing";

/// Typed view of the step's settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningSettings {
    pub automatic: bool,
    pub identity: String,
    pub team_id: String,
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self {
            automatic: true,
            identity: String::new(),
            team_id: String::new(),
        }
    }
}

pub fn step_type() -> StepType {
    StepType::new(NAME, defaults)
}

fn defaults() -> Table {
    let mut table = Table::new();
    table.insert("automatic".to_string(), Value::Boolean(true));
    table.insert("identity".to_string(), Value::String(String::new()));
    table.insert("team_id".to_string(), Value::String(String::new()));
    table
}
