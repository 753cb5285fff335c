//! Split statistics for diagnostics.
//!
//! Read-only view over a finished split; nothing here feeds back into the
//! splitter.

use hashbrown::HashSet;
use serde::Serialize;

use crate::model::{InteractionTable, Label, Tier};
use crate::split::{RebalanceStep, RowSplit};
use crate::Result;

/// Statistics for one split subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierReport {
    pub tier: Tier,
    pub rows: usize,
    /// Distinct `(protein, substrate)` pairs.
    pub pairs: usize,
    pub proteins: usize,
    pub substrates: usize,
    /// Share of active rows; `None` for an empty subset.
    pub active_fraction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitReport {
    pub total_rows: usize,
    pub total_pairs: usize,
    pub unassigned_rows: usize,
    pub rebalance_iterations: usize,
    pub tiers: Vec<TierReport>,
}

impl SplitReport {
    pub fn new(table: &InteractionTable, rows: &RowSplit, steps: &[RebalanceStep]) -> Self {
        let total_pairs = table
            .iter()
            .map(|r| (r.protein.as_str(), r.substrate.as_str()))
            .collect::<HashSet<_>>()
            .len();

        let tiers = Tier::ALL
            .into_iter()
            .map(|tier| {
                let mut pairs = HashSet::new();
                let mut proteins = HashSet::new();
                let mut substrates = HashSet::new();
                let (mut n, mut active) = (0usize, 0usize);
                for row in rows.rows(table, tier) {
                    n += 1;
                    if row.label == Label::Active {
                        active += 1;
                    }
                    pairs.insert((row.protein.as_str(), row.substrate.as_str()));
                    proteins.insert(row.protein.as_str());
                    substrates.insert(row.substrate.as_str());
                }
                TierReport {
                    tier,
                    rows: n,
                    pairs: pairs.len(),
                    proteins: proteins.len(),
                    substrates: substrates.len(),
                    active_fraction: (n > 0).then(|| active as f64 / n as f64),
                }
            })
            .collect();

        Self {
            total_rows: table.len(),
            total_pairs,
            unassigned_rows: rows.unassigned(),
            rebalance_iterations: steps.len(),
            tiers,
        }
    }

    pub fn tier(&self, tier: Tier) -> Option<&TierReport> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Log one line per tier.
    pub fn log(&self) {
        tracing::info!(
            pairs = self.total_pairs,
            rows = self.total_rows,
            unassigned = self.unassigned_rows,
            rebalance_iterations = self.rebalance_iterations,
            "split summary"
        );
        for t in &self.tiers {
            tracing::info!(
                tier = %t.tier,
                rows = t.rows,
                pairs = t.pairs,
                proteins = t.proteins,
                substrates = t.substrates,
                active_fraction = t.active_fraction.unwrap_or(f64::NAN),
                "tier"
            );
        }
    }
}
