//! Splitter configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::DuplicatePolicy;
use crate::split::Fractions;
use crate::{Error, Result};

/// Everything a split invocation needs. All fields have defaults, so a
/// JSON config only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    pub protein_col: String,
    pub substrate_col: String,
    /// Binary (0/1) label column.
    pub label_col: String,
    pub train_frac: f64,
    /// Validation gets whatever train and test leave over.
    pub test_frac: f64,
    pub random_state: u64,
    pub min_c2_size: usize,
    /// Rebalancing budget; `None` uses the graph's node count, the most
    /// demotions that can ever be made.
    pub max_rebalance_iterations: Option<usize>,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            protein_col: "UGT_trivial_name".into(),
            substrate_col: "substrate".into(),
            label_col: "is_active".into(),
            train_frac: 0.7,
            test_frac: 0.15,
            random_state: 42,
            min_c2_size: 50,
            max_rebalance_iterations: None,
            duplicate_policy: DuplicatePolicy::LastWins,
        }
    }
}

impl SplitConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Fail-fast checks, run before any graph work.
    pub fn validate(&self) -> Result<Fractions> {
        for (name, col) in [
            ("protein_col", &self.protein_col),
            ("substrate_col", &self.substrate_col),
            ("label_col", &self.label_col),
        ] {
            if col.trim().is_empty() {
                return Err(Error::Config(format!("{name} must not be empty")));
            }
        }
        if self.protein_col == self.substrate_col {
            return Err(Error::Config(format!(
                "protein_col and substrate_col both name '{}'",
                self.protein_col
            )));
        }
        Fractions::new(self.train_frac, self.test_frac)
    }
}
