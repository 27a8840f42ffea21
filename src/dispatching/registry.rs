//! Policy identifiers and the policy registry.
//!
//! `PolicyKind` is the explicit tag for each built-in policy; the registry
//! maps display names to shared policy instances. Callers build a registry
//! once and pass it where it is needed. There is no global table.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::rules::{Edf, PreemptiveEdf, ProfitAwareEdf, ThresholdEdf};
use super::SelectionPolicy;

/// Tunable weights for the configurable policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Profit-aware EDF: weight on profit potential.
    pub w_profit: f64,
    /// Profit-aware EDF: weight on urgency.
    pub w_deadline: f64,
    /// Threshold EDF: weight on the urgency term.
    pub urgency_weight: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            w_profit: 1.0,
            w_deadline: 0.1,
            urgency_weight: 1.0,
        }
    }
}

impl PolicyConfig {
    /// Checks that every weight is finite and non-negative.
    ///
    /// Returns a message naming each offending weight.
    pub fn check(&self) -> Result<(), String> {
        let weights = [
            ("w_profit", self.w_profit),
            ("w_deadline", self.w_deadline),
            ("urgency_weight", self.urgency_weight),
        ];
        let invalid: Vec<String> = weights
            .iter()
            .filter(|(_, w)| !(w.is_finite() && *w >= 0.0))
            .map(|(name, w)| format!("{name} = {w}"))
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "policy weights must be finite and non-negative: {}",
                invalid.join(", ")
            ))
        }
    }
}

/// Built-in policy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Earliest deadline first.
    Edf,
    /// Profit-aware EDF.
    ProfitAwareEdf,
    /// Threshold-weighted EDF.
    ThresholdEdf,
    /// Preemptive replacement EDF.
    PreemptiveEdf,
}

impl PolicyKind {
    /// Every built-in policy, in canonical order.
    pub fn all() -> [PolicyKind; 4] {
        [
            PolicyKind::Edf,
            PolicyKind::ProfitAwareEdf,
            PolicyKind::ThresholdEdf,
            PolicyKind::PreemptiveEdf,
        ]
    }

    /// Short tag accepted by [`FromStr`].
    pub fn tag(&self) -> &'static str {
        match self {
            PolicyKind::Edf => "edf",
            PolicyKind::ProfitAwareEdf => "profit-aware-edf",
            PolicyKind::ThresholdEdf => "threshold-edf",
            PolicyKind::PreemptiveEdf => "preemptive-edf",
        }
    }

    /// Instantiates the policy with the given weights.
    pub fn build(&self, config: &PolicyConfig) -> Arc<dyn SelectionPolicy> {
        match self {
            PolicyKind::Edf => Arc::new(Edf),
            PolicyKind::ProfitAwareEdf => {
                Arc::new(ProfitAwareEdf::new(config.w_profit, config.w_deadline))
            }
            PolicyKind::ThresholdEdf => Arc::new(ThresholdEdf::new(config.urgency_weight)),
            PolicyKind::PreemptiveEdf => Arc::new(PreemptiveEdf),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "edf" => Ok(PolicyKind::Edf),
            "profit-aware-edf" | "profit-aware" | "weighted-edf" => Ok(PolicyKind::ProfitAwareEdf),
            "threshold-edf" | "edf-threshold" | "threshold" => Ok(PolicyKind::ThresholdEdf),
            "preemptive-edf" | "edf-replacement" | "replacement" | "preemptive" => {
                Ok(PolicyKind::PreemptiveEdf)
            }
            _ => Err(format!("Unknown policy: {s}")),
        }
    }
}

/// Named collection of selection policies.
///
/// Preserves registration order so reports list policies consistently.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    entries: Vec<(String, Arc<dyn SelectionPolicy>)>,
}

impl PolicyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in policy under its tag.
    pub fn with_defaults(config: &PolicyConfig) -> Self {
        let mut registry = Self::new();
        for kind in PolicyKind::all() {
            registry.register(kind.tag(), kind.build(config));
        }
        registry
    }

    /// Registry holding only the given built-in policies.
    pub fn with_kinds(kinds: &[PolicyKind], config: &PolicyConfig) -> Self {
        let mut registry = Self::new();
        for kind in kinds {
            registry.register(kind.tag(), kind.build(config));
        }
        registry
    }

    /// Adds a policy, replacing any existing entry with the same name.
    pub fn register(&mut self, name: impl Into<String>, policy: Arc<dyn SelectionPolicy>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = policy,
            None => self.entries.push((name, policy)),
        }
    }

    /// Looks up a policy by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn SelectionPolicy>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| Arc::clone(p))
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Iterates `(name, policy)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn SelectionPolicy>)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Number of registered policies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no policy is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
