//! Label-stratified edge partition into train / val / test.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::RelationGraph;
use crate::model::{EdgeId, Label};
use crate::{Error, Result};

/// Slack allowed when checking that the three fractions sum to one.
pub const FRACTION_TOLERANCE: f64 = 1e-4;

/// Validated split fractions; `val` is derived as `1 - train - test`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fractions {
    pub train: f64,
    pub val: f64,
    pub test: f64,
}

impl Fractions {
    pub fn new(train: f64, test: f64) -> Result<Self> {
        for (name, value) in [("train_frac", train), ("test_frac", test)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        let val = 1.0 - train - test;
        if val < -FRACTION_TOLERANCE {
            return Err(Error::Config(format!(
                "fractions don't add to 1: train_frac={train} + test_frac={test} exceeds 1"
            )));
        }
        let val = val.max(0.0);
        if (train + val + test - 1.0).abs() > FRACTION_TOLERANCE {
            return Err(Error::Config("fractions don't add to 1".into()));
        }
        Ok(Self { train, val, test })
    }
}

/// Output of the partitioner, before tiering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub train: Vec<EdgeId>,
    pub val: Vec<EdgeId>,
    pub test: Vec<EdgeId>,
}

/// Split every edge of `graph` into train/val/test, stratified by label.
///
/// Each label group (visited in ascending label order) is shuffled with
/// `rng`; its first `floor(train * n)` edges go to train, the next
/// `floor(val * n)` to val and the remainder to test. Node identity is
/// ignored.
pub fn partition_edges<R: Rng + ?Sized>(
    graph: &RelationGraph,
    fractions: &Fractions,
    rng: &mut R,
) -> Partition {
    let mut groups: BTreeMap<Label, Vec<EdgeId>> = BTreeMap::new();
    for edge in graph.edges() {
        groups.entry(edge.label).or_default().push(edge.id);
    }

    let mut out = Partition::default();
    for (label, mut group) in groups {
        group.shuffle(rng);

        let n = group.len();
        let n_train = ((fractions.train * n as f64).floor() as usize).min(n);
        let n_val = ((fractions.val * n as f64).floor() as usize).min(n - n_train);

        tracing::debug!(%label, n, n_train, n_val, n_test = n - n_train - n_val, "label group partitioned");

        out.train.extend_from_slice(&group[..n_train]);
        out.val.extend_from_slice(&group[n_train..n_train + n_val]);
        out.test.extend_from_slice(&group[n_train + n_val..]);
    }
    out
}
