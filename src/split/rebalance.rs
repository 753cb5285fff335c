//! C2 rebalancing.
//!
//! The label-stratified partition rarely leaves enough edges with exactly
//! one unseen endpoint. The rebalancer demotes seen nodes to unseen, one
//! per iteration, pulling all of their train/val edges into the evaluation
//! pool, until C2 reaches the requested size.

use hashbrown::HashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::RelationGraph;
use crate::model::{EdgeId, NodeId};
use crate::{Error, Result};
use super::classify::{classify, SeenNodes};
use super::{EdgeSplit, TierSizes};

/// One iteration of the rebalancing loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceStep {
    pub iteration: usize,
    /// C1 edge the demoted node was drawn from.
    pub candidate: EdgeId,
    pub demoted: NodeId,
    /// Train edges moved to the evaluation pool.
    pub evicted_train: usize,
    /// Val edges moved to the evaluation pool.
    pub evicted_val: usize,
    /// Tier sizes after the iteration.
    pub sizes: TierSizes,
}

impl RebalanceStep {
    pub fn evicted(&self) -> usize {
        self.evicted_train + self.evicted_val
    }
}

/// Capped corrective loop growing C2 to `min_c2_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rebalancer {
    min_c2_size: usize,
    max_iterations: usize,
}

impl Rebalancer {
    pub fn new(min_c2_size: usize, max_iterations: usize) -> Self {
        Self { min_c2_size, max_iterations }
    }

    pub fn min_c2_size(&self) -> usize {
        self.min_c2_size
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Iterate until `|C2| >= min_c2_size`.
    ///
    /// Fails with [`Error::InsufficientData`] once the iteration budget is
    /// spent or C1 has no candidate left to demote from. On failure `split`
    /// holds the state reached so far.
    pub fn run<R: Rng + ?Sized>(
        &self,
        graph: &RelationGraph,
        split: &mut EdgeSplit,
        rng: &mut R,
    ) -> Result<Vec<RebalanceStep>> {
        let mut steps = Vec::new();
        if split.c2.len() >= self.min_c2_size {
            return Ok(steps);
        }

        tracing::warn!(
            c2 = split.c2.len(),
            required = self.min_c2_size,
            "C2 below minimum, rebalancing"
        );

        while split.c2.len() < self.min_c2_size {
            let exhausted = steps.len() >= self.max_iterations;
            let next = if exhausted { None } else { step(graph, split, steps.len(), rng) };
            let Some(next) = next else {
                return Err(Error::InsufficientData {
                    c2_size: split.c2.len(),
                    required: self.min_c2_size,
                    iterations: steps.len(),
                });
            };
            tracing::debug!(
                iteration = next.iteration,
                demoted = %graph.node(next.demoted).key,
                evicted = next.evicted(),
                sizes = %next.sizes,
                "node demoted to unseen"
            );
            steps.push(next);
        }

        tracing::debug!(iterations = steps.len(), c2 = split.c2.len(), "rebalancing finished");
        Ok(steps)
    }
}

/// A single demotion. Returns `None` when C1 is empty.
///
/// Picks a C1 edge uniformly, then one of its endpoints uniformly, removes
/// every edge touching that node from train and val, and reclassifies the
/// removed edges together with the current C1/C2/C3 against the smaller
/// train set.
pub fn step<R: Rng + ?Sized>(
    graph: &RelationGraph,
    split: &mut EdgeSplit,
    iteration: usize,
    rng: &mut R,
) -> Option<RebalanceStep> {
    let candidate = *split.c1.choose(rng)?;
    let edge = graph.edge(candidate);
    let demoted = if rng.gen_bool(0.5) { edge.protein } else { edge.substrate };

    let incident: HashSet<EdgeId> = graph.incident_edges(demoted).iter().copied().collect();
    let train_removed = drain_incident(&mut split.train, &incident);
    let val_removed = drain_incident(&mut split.val, &incident);

    let pool: Vec<EdgeId> = std::mem::take(&mut split.c1)
        .into_iter()
        .chain(std::mem::take(&mut split.c2))
        .chain(std::mem::take(&mut split.c3))
        .chain(train_removed.iter().copied())
        .chain(val_removed.iter().copied())
        .collect();

    let seen = SeenNodes::from_edges(graph, &split.train);
    let tiers = classify(graph, &seen, pool);
    split.c1 = tiers.c1;
    split.c2 = tiers.c2;
    split.c3 = tiers.c3;

    Some(RebalanceStep {
        iteration,
        candidate,
        demoted,
        evicted_train: train_removed.len(),
        evicted_val: val_removed.len(),
        sizes: split.sizes(),
    })
}

/// Remove the edges in `incident` from `edges`, returning them in order.
fn drain_incident(edges: &mut Vec<EdgeId>, incident: &HashSet<EdgeId>) -> Vec<EdgeId> {
    let (removed, kept): (Vec<EdgeId>, Vec<EdgeId>) =
        edges.iter().partition(|e| incident.contains(*e));
    *edges = kept;
    removed
}
