//! Edge split → per-row split labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::RelationGraph;
use crate::model::{InteractionRow, InteractionTable, Tier};
use super::EdgeSplit;

/// Split label of every input row, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSplit {
    assignments: Vec<Option<Tier>>,
}

impl RowSplit {
    /// Each row inherits the tier of the edge for its `(protein, substrate)`
    /// pair. Rows whose pair has no tier are `None` (written as `none`).
    pub fn materialize(graph: &RelationGraph, table: &InteractionTable, split: &EdgeSplit) -> Self {
        let by_edge = split.tier_by_edge(graph.edge_count());
        let assignments = table
            .iter()
            .map(|row| {
                graph
                    .edge_between(&row.protein, &row.substrate)
                    .and_then(|e| by_edge[e.index()])
            })
            .collect();
        Self { assignments }
    }

    pub fn from_assignments(assignments: Vec<Option<Tier>>) -> Self {
        Self { assignments }
    }

    pub fn tier(&self, row: usize) -> Option<Tier> {
        self.assignments.get(row).copied().flatten()
    }

    pub fn assignments(&self) -> &[Option<Tier>] {
        &self.assignments
    }

    /// Column values: `train`, `val`, `C1`, `C2`, `C3` or `none`.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.assignments.iter().map(|t| Tier::label_for(*t))
    }

    /// Indices of the rows assigned to `tier`.
    pub fn row_indices(&self, tier: Tier) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |(_, t)| **t == Some(tier))
            .map(|(i, _)| i)
    }

    /// Rows of `table` assigned to `tier`.
    pub fn rows<'t>(&'t self, table: &'t InteractionTable, tier: Tier) -> impl Iterator<Item = &'t InteractionRow> + 't {
        self.row_indices(tier).filter_map(move |i| table.rows.get(i))
    }

    /// Split name → row indices, for all five tiers.
    pub fn subsets(&self) -> BTreeMap<Tier, Vec<usize>> {
        Tier::ALL
            .into_iter()
            .map(|t| (t, self.row_indices(t).collect()))
            .collect()
    }

    pub fn unassigned(&self) -> usize {
        self.assignments.iter().filter(|t| t.is_none()).count()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::model::{EdgeId, Label};
    use crate::split::Tiers;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rows_inherit_edge_tier() {
        let table: InteractionTable = [("P1", "S1"), ("P2", "S2"), ("P1", "S1")]
            .into_iter()
            .map(|(p, s)| InteractionRow::new(p, s, Label::Active))
            .collect();
        let g = GraphBuilder::new().build(&table).unwrap();
        let split = EdgeSplit::from_parts(
            vec![EdgeId(0)],
            Vec::new(),
            Tiers { c3: vec![EdgeId(1)], ..Default::default() },
        );
        let rows = RowSplit::materialize(&g, &table, &split);
        assert_eq!(rows.labels().collect::<Vec<_>>(), vec!["train", "C3", "train"]);
        assert_eq!(rows.row_indices(Tier::Train).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(rows.unassigned(), 0);
    }

    #[test]
    fn test_unclassified_pair_is_none() {
        let table: InteractionTable = [("P1", "S1"), ("P2", "S2")]
            .into_iter()
            .map(|(p, s)| InteractionRow::new(p, s, Label::Inactive))
            .collect();
        let g = GraphBuilder::new().build(&table).unwrap();
        let split = EdgeSplit::from_parts(vec![EdgeId(0)], Vec::new(), Tiers::default());
        let rows = RowSplit::materialize(&g, &table, &split);
        assert_eq!(rows.tier(1), None);
        assert_eq!(rows.labels().nth(1), Some("none"));
        assert_eq!(rows.unassigned(), 1);
        assert_eq!(rows.subsets()[&Tier::Train], vec![0]);
    }
}
