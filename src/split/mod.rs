//! # Generalization Split
//!
//! Edge-level split of a [`RelationGraph`](crate::graph::RelationGraph)
//! into `train`, `val` and three evaluation tiers.
//!
//! ```text
//! graph ─► partition ─► {train, val, test}
//!                          │
//!          classify(seen(train), test) ─► {C1, C2, C3}
//!                          │
//!          rebalance (until |C2| ≥ min) ─► check ─► materialize rows
//! ```

pub mod partition;
pub mod classify;
pub mod rebalance;
pub mod validate;
pub mod materialize;

pub use partition::{partition_edges, Fractions, Partition};
pub use classify::{classify, SeenNodes, Tiers};
pub use rebalance::{RebalanceStep, Rebalancer};
pub use validate::{check_edge_split, check_row_split, LeakageViolation};
pub use materialize::RowSplit;

use serde::{Deserialize, Serialize};

use crate::model::{EdgeId, Tier};

/// The five disjoint edge lists of a split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSplit {
    pub train: Vec<EdgeId>,
    pub val: Vec<EdgeId>,
    pub c1: Vec<EdgeId>,
    pub c2: Vec<EdgeId>,
    pub c3: Vec<EdgeId>,
}

impl EdgeSplit {
    pub fn from_parts(train: Vec<EdgeId>, val: Vec<EdgeId>, tiers: Tiers) -> Self {
        Self { train, val, c1: tiers.c1, c2: tiers.c2, c3: tiers.c3 }
    }

    pub fn get(&self, tier: Tier) -> &[EdgeId] {
        match tier {
            Tier::Train => &self.train,
            Tier::Val => &self.val,
            Tier::C1 => &self.c1,
            Tier::C2 => &self.c2,
            Tier::C3 => &self.c3,
        }
    }

    pub fn len(&self, tier: Tier) -> usize {
        self.get(tier).len()
    }

    pub fn total(&self) -> usize {
        Tier::ALL.iter().map(|t| self.len(*t)).sum()
    }

    pub fn sizes(&self) -> TierSizes {
        TierSizes {
            train: self.train.len(),
            val: self.val.len(),
            c1: self.c1.len(),
            c2: self.c2.len(),
            c3: self.c3.len(),
        }
    }

    /// Every `(edge, tier)` pair, tiers in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, Tier)> + '_ {
        Tier::ALL
            .into_iter()
            .flat_map(move |t| self.get(t).iter().map(move |e| (*e, t)))
    }

    /// Tier per edge id, for a graph of `edge_count` edges.
    /// Edges in no list map to `None`.
    pub fn tier_by_edge(&self, edge_count: usize) -> Vec<Option<Tier>> {
        let mut out = vec![None; edge_count];
        for (edge, tier) in self.iter() {
            if let Some(slot) = out.get_mut(edge.index()) {
                *slot = Some(tier);
            }
        }
        out
    }
}

/// Edge counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSizes {
    pub train: usize,
    pub val: usize,
    pub c1: usize,
    pub c2: usize,
    pub c3: usize,
}

impl std::fmt::Display for TierSizes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "train={} val={} C1={} C2={} C3={}",
            self.train, self.val, self.c1, self.c2, self.c3
        )
    }
}
