//! Experiment configuration.
//!
//! A JSON document selecting the policies to run, their weights, and the
//! offline solver options. Every field is optional.
//!
//! ```json
//! {
//!   "policies": { "w_profit": 1.0, "w_deadline": 0.1, "urgency_weight": 1.0 },
//!   "offline": { "add_interval_cuts": true, "time_limit_seconds": 60.0 },
//!   "policy_names": ["edf", "preemptive-edf"]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatching::{PolicyConfig, PolicyKind, PolicyRegistry};
use crate::error::ScheduleError;
use crate::offline::OfflineOptions;

/// Settings for a comparison run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Policy weights.
    pub policies: PolicyConfig,
    /// Offline solver options.
    pub offline: OfflineOptions,
    /// Policies to run, by name. Empty runs every built-in policy.
    pub policy_names: Vec<String>,
}

impl ExperimentConfig {
    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        serde_json::from_str(json).map_err(|e| ScheduleError::Config(e.to_string()))
    }

    /// Reads and parses a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ScheduleError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Resolves `policy_names` into built-in policy kinds.
    ///
    /// Duplicates are dropped; an unknown name is an error.
    pub fn policy_kinds(&self) -> Result<Vec<PolicyKind>, ScheduleError> {
        if self.policy_names.is_empty() {
            return Ok(PolicyKind::all().to_vec());
        }

        let mut kinds = Vec::with_capacity(self.policy_names.len());
        for name in &self.policy_names {
            let kind: PolicyKind = name.parse().map_err(ScheduleError::Config)?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }

    /// Builds the registry of the selected policies.
    ///
    /// Fails on an unknown policy name or a negative or non-finite weight.
    pub fn registry(&self) -> Result<PolicyRegistry, ScheduleError> {
        self.policies.check().map_err(ScheduleError::Config)?;
        Ok(PolicyRegistry::with_kinds(&self.policy_kinds()?, &self.policies))
    }
}
