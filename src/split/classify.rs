//! Generalization tiers: how many endpoints of an edge were seen in training.

use hashbrown::HashSet;

use crate::graph::RelationGraph;
use crate::model::{EdgeId, NodeId, NodeKind};

/// Nodes incident to at least one training edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenNodes {
    seen: HashSet<NodeId>,
}

impl SeenNodes {
    pub fn from_edges(graph: &RelationGraph, train: &[EdgeId]) -> Self {
        let seen = train
            .iter()
            .flat_map(|e| graph.edge(*e).endpoints())
            .collect();
        Self { seen }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.seen.contains(&node)
    }

    /// Number of seen endpoints of an edge: 0, 1 or 2.
    pub fn seen_endpoints(&self, graph: &RelationGraph, edge: EdgeId) -> usize {
        graph.edge(edge).endpoints().iter().filter(|n| self.contains(**n)).count()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Seen node ids, sorted.
    pub fn to_sorted_vec(&self) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self.seen.iter().copied().collect();
        out.sort_unstable();
        out
    }

    pub fn count_of_kind(&self, graph: &RelationGraph, kind: NodeKind) -> usize {
        self.seen.iter().filter(|n| graph.node(**n).kind() == kind).count()
    }
}

/// Evaluation edges grouped by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tiers {
    pub c1: Vec<EdgeId>,
    pub c2: Vec<EdgeId>,
    pub c3: Vec<EdgeId>,
}

/// Assign each candidate edge to C1 (both endpoints seen), C2 (exactly
/// one) or C3 (neither). Candidate order is preserved within each tier.
pub fn classify(
    graph: &RelationGraph,
    seen: &SeenNodes,
    candidates: impl IntoIterator<Item = EdgeId>,
) -> Tiers {
    let mut tiers = Tiers::default();
    for edge in candidates {
        match seen.seen_endpoints(graph, edge) {
            2 => tiers.c1.push(edge),
            1 => tiers.c2.push(edge),
            _ => tiers.c3.push(edge),
        }
    }
    tiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::model::{InteractionRow, InteractionTable, Label};

    #[test]
    fn test_classify_tiers() {
        let table: InteractionTable = [
            ("P1", "S1"), // train
            ("P1", "S2"), // C2: S2 unseen
            ("P2", "S1"), // C2: P2 unseen
            ("P2", "S2"), // C3
            ("P3", "S3"), // train
            ("P1", "S3"), // C1
        ]
        .into_iter()
        .map(|(p, s)| InteractionRow::new(p, s, Label::Active))
        .collect();
        let g = GraphBuilder::new().build(&table).unwrap();

        let train = vec![EdgeId(0), EdgeId(4)];
        let seen = SeenNodes::from_edges(&g, &train);
        assert_eq!(seen.len(), 4);

        let tiers = classify(&g, &seen, [EdgeId(1), EdgeId(2), EdgeId(3), EdgeId(5)]);
        assert_eq!(tiers.c1, vec![EdgeId(5)]);
        assert_eq!(tiers.c2, vec![EdgeId(1), EdgeId(2)]);
        assert_eq!(tiers.c3, vec![EdgeId(3)]);
    }

    #[test]
    fn test_no_training_means_all_c3() {
        let table: InteractionTable = [("P1", "S1"), ("P2", "S2")]
            .into_iter()
            .map(|(p, s)| InteractionRow::new(p, s, Label::Inactive))
            .collect();
        let g = GraphBuilder::new().build(&table).unwrap();
        let seen = SeenNodes::from_edges(&g, &[]);
        let tiers = classify(&g, &seen, g.edge_ids());
        assert!(tiers.c1.is_empty());
        assert!(tiers.c2.is_empty());
        assert_eq!(tiers.c3.len(), 2);
    }
}
