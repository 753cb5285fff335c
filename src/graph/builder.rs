//! Interaction table → relation graph.

use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::{Error, Result};
use super::RelationGraph;

/// What to do when the same `(protein, substrate)` pair appears more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The last row's label wins; the edge keeps its first-seen position.
    #[default]
    LastWins,
    /// Fail on a duplicated pair whose labels disagree.
    /// Exact duplicates are still collapsed.
    Reject,
}

/// Builds a [`RelationGraph`] from an [`InteractionTable`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    policy: DuplicatePolicy,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// One node per distinct protein and substrate key, one edge per
    /// distinct pair.
    ///
    /// Rejects an empty table and rows with an empty key.
    pub fn build(&self, table: &InteractionTable) -> Result<RelationGraph> {
        if table.is_empty() {
            return Err(Error::MalformedInput("interaction table is empty".into()));
        }

        let mut graph = RelationGraph::new();
        let mut overwritten = 0usize;

        for (row_idx, row) in table.iter().enumerate() {
            if row.protein.trim().is_empty() {
                return Err(Error::MalformedInput(format!("row {row_idx}: null protein key")));
            }
            if row.substrate.trim().is_empty() {
                return Err(Error::MalformedInput(format!("row {row_idx}: null substrate key")));
            }

            let p = graph.ensure_node(row.protein_key());
            let s = graph.ensure_node(row.substrate_key());
            let (_, previous) = graph.upsert_edge(p, s, row.label);

            match previous {
                Some(old) if old != row.label => {
                    if self.policy == DuplicatePolicy::Reject {
                        return Err(Error::DuplicatePair {
                            row: row_idx,
                            protein: row.protein.clone(),
                            substrate: row.substrate.clone(),
                        });
                    }
                    overwritten += 1;
                }
                _ => {}
            }
        }

        if overwritten > 0 {
            tracing::warn!(
                overwritten,
                "conflicting duplicate pairs resolved by last-observed label"
            );
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            rows = table.len(),
            "relation graph built"
        );

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str, u8)]) -> InteractionTable {
        rows.iter()
            .map(|(p, s, l)| InteractionRow::new(*p, *s, Label::from(*l == 1)))
            .collect()
    }

    #[test]
    fn test_build_counts() {
        let t = table(&[("P1", "S1", 1), ("P1", "S2", 0), ("P2", "S1", 1)]);
        let g = GraphBuilder::new().build(&t).unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.nodes_of_kind(NodeKind::Protein).count(), 2);
        assert_eq!(g.degree(g.protein("P1").unwrap()), 2);
    }

    #[test]
    fn test_conflicting_duplicate_last_wins() {
        let t = table(&[("P1", "S1", 1), ("P2", "S1", 1), ("P1", "S1", 0)]);
        let g = GraphBuilder::new().build(&t).unwrap();
        assert_eq!(g.edge_count(), 2);
        let id = g.edge_between("P1", "S1").unwrap();
        assert_eq!(id, EdgeId(0));
        assert_eq!(g.edge(id).label, Label::Inactive);
    }

    #[test]
    fn test_conflicting_duplicate_rejected() {
        let t = table(&[("P1", "S1", 1), ("P1", "S1", 0)]);
        let err = GraphBuilder::new()
            .with_policy(DuplicatePolicy::Reject)
            .build(&t)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicatePair { row: 1, .. }));
    }

    #[test]
    fn test_exact_duplicate_accepted_under_reject() {
        let t = table(&[("P1", "S1", 1), ("P1", "S1", 1)]);
        let g = GraphBuilder::new()
            .with_policy(DuplicatePolicy::Reject)
            .build(&t)
            .unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = GraphBuilder::new().build(&InteractionTable::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_null_key_rejected() {
        let t = table(&[("P1", "S1", 1), ("", "S2", 0)]);
        let err = GraphBuilder::new().build(&t).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("row 1")));
    }
}
