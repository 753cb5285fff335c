//! Leakage checks.
//!
//! Pure verifiers run as the last gate before a split is handed out. Any
//! failure here is a defect in the splitter, never a data-quality issue.

use hashbrown::HashSet;

use crate::graph::RelationGraph;
use crate::model::{EdgeId, InteractionTable, NodeKind, Tier};
use super::classify::SeenNodes;
use super::{EdgeSplit, RowSplit};

/// A violated seen/unseen contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeakageViolation {
    #[error("edge {edge} has no split assignment")]
    EdgeUnassigned { edge: EdgeId },

    #[error("edge {edge} assigned to both {first} and {second}")]
    EdgeAssignedTwice { edge: EdgeId, first: Tier, second: Tier },

    #[error("edge {edge} in {tier} has {seen_endpoints} seen endpoint(s)")]
    TierMismatch { edge: EdgeId, tier: Tier, seen_endpoints: usize },

    #[error("train pair ({protein}, {substrate}) also in {tier}")]
    TrainOverlap { tier: Tier, protein: String, substrate: String },

    #[error("C1 {kind} '{name}' not in training")]
    UnseenInC1 { kind: NodeKind, name: String },

    #[error("C2 row {row} invalid: protein seen={protein_seen}, substrate seen={substrate_seen}")]
    C2NotExclusive { row: usize, protein_seen: bool, substrate_seen: bool },

    #[error("C3 {kind} '{name}' appears in training")]
    SeenInC3 { kind: NodeKind, name: String },
}

/// Edge-level gate: the five lists partition the edge set, and every
/// evaluation edge sits in the tier its seen-endpoint count implies.
pub fn check_edge_split(graph: &RelationGraph, split: &EdgeSplit) -> Result<(), LeakageViolation> {
    let mut assigned: Vec<Option<Tier>> = vec![None; graph.edge_count()];
    for (edge, tier) in split.iter() {
        match assigned[edge.index()] {
            Some(first) => {
                return Err(LeakageViolation::EdgeAssignedTwice { edge, first, second: tier });
            }
            None => assigned[edge.index()] = Some(tier),
        }
    }
    if let Some(idx) = assigned.iter().position(Option::is_none) {
        return Err(LeakageViolation::EdgeUnassigned { edge: EdgeId(idx as u32) });
    }

    let seen = SeenNodes::from_edges(graph, &split.train);
    for (tier, required) in [(Tier::C1, 2), (Tier::C2, 1), (Tier::C3, 0)] {
        for edge in split.get(tier) {
            let seen_endpoints = seen.seen_endpoints(graph, *edge);
            if seen_endpoints != required {
                return Err(LeakageViolation::TierMismatch { edge: *edge, tier, seen_endpoints });
            }
        }
    }
    Ok(())
}

/// Row-level gate over the materialized subsets.
///
/// - no `(protein, substrate)` pair in train is also in val or C1/C2/C3
/// - every C1 protein and substrate appears in train
/// - every C2 row has exactly one of its protein/substrate in train
/// - no C3 protein or substrate appears in train
pub fn check_row_split(table: &InteractionTable, rows: &RowSplit) -> Result<(), LeakageViolation> {
    let mut train_pairs: HashSet<(&str, &str)> = HashSet::new();
    let mut train_proteins: HashSet<&str> = HashSet::new();
    let mut train_substrates: HashSet<&str> = HashSet::new();
    for row in rows.rows(table, Tier::Train) {
        train_pairs.insert((row.protein.as_str(), row.substrate.as_str()));
        train_proteins.insert(row.protein.as_str());
        train_substrates.insert(row.substrate.as_str());
    }

    for tier in [Tier::Val, Tier::C1, Tier::C2, Tier::C3] {
        for row in rows.rows(table, tier) {
            if train_pairs.contains(&(row.protein.as_str(), row.substrate.as_str())) {
                return Err(LeakageViolation::TrainOverlap {
                    tier,
                    protein: row.protein.clone(),
                    substrate: row.substrate.clone(),
                });
            }
        }
    }

    for row in rows.rows(table, Tier::C1) {
        if !train_proteins.contains(row.protein.as_str()) {
            return Err(LeakageViolation::UnseenInC1 { kind: NodeKind::Protein, name: row.protein.clone() });
        }
        if !train_substrates.contains(row.substrate.as_str()) {
            return Err(LeakageViolation::UnseenInC1 { kind: NodeKind::Substrate, name: row.substrate.clone() });
        }
    }

    for idx in rows.row_indices(Tier::C2) {
        let row = &table.rows[idx];
        let protein_seen = train_proteins.contains(row.protein.as_str());
        let substrate_seen = train_substrates.contains(row.substrate.as_str());
        if protein_seen == substrate_seen {
            return Err(LeakageViolation::C2NotExclusive { row: idx, protein_seen, substrate_seen });
        }
    }

    for row in rows.rows(table, Tier::C3) {
        if train_proteins.contains(row.protein.as_str()) {
            return Err(LeakageViolation::SeenInC3 { kind: NodeKind::Protein, name: row.protein.clone() });
        }
        if train_substrates.contains(row.substrate.as_str()) {
            return Err(LeakageViolation::SeenInC3 { kind: NodeKind::Substrate, name: row.substrate.clone() });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::model::{InteractionRow, Label};
    use crate::split::Tiers;

    fn table() -> InteractionTable {
        [("P1", "S1"), ("P1", "S2"), ("P2", "S2"), ("P3", "S3")]
            .into_iter()
            .map(|(p, s)| InteractionRow::new(p, s, Label::Active))
            .collect()
    }

    fn rows(tiers: &[Option<Tier>]) -> RowSplit {
        RowSplit::from_assignments(tiers.to_vec())
    }

    #[test]
    fn test_valid_row_split_passes() {
        let r = rows(&[Some(Tier::Train), Some(Tier::C2), Some(Tier::C3), Some(Tier::C3)]);
        assert_eq!(check_row_split(&table(), &r), Ok(()));
    }

    #[test]
    fn test_train_val_pair_overlap() {
        let mut t = table();
        t.push("P1", "S1", Label::Inactive);
        let r = rows(&[Some(Tier::Train), Some(Tier::Val), Some(Tier::C2), Some(Tier::C3), Some(Tier::Val)]);
        assert!(matches!(
            check_row_split(&t, &r),
            Err(LeakageViolation::TrainOverlap { tier: Tier::Val, .. })
        ));
    }

    #[test]
    fn test_c1_requires_both_seen() {
        let r = rows(&[Some(Tier::Train), Some(Tier::Val), Some(Tier::C1), Some(Tier::C3)]);
        assert_eq!(
            check_row_split(&table(), &r),
            Err(LeakageViolation::UnseenInC1 { kind: NodeKind::Protein, name: "P2".into() })
        );
    }

    #[test]
    fn test_c2_is_strict_xor() {
        let r = rows(&[Some(Tier::Train), Some(Tier::C2), Some(Tier::C3), Some(Tier::C2)]);
        assert_eq!(
            check_row_split(&table(), &r),
            Err(LeakageViolation::C2NotExclusive { row: 3, protein_seen: false, substrate_seen: false })
        );
    }

    #[test]
    fn test_c3_must_be_unseen() {
        let r = rows(&[Some(Tier::Train), Some(Tier::C3), None, None]);
        assert_eq!(
            check_row_split(&table(), &r),
            Err(LeakageViolation::SeenInC3 { kind: NodeKind::Protein, name: "P1".into() })
        );
    }

    #[test]
    fn test_edge_split_totality() {
        let t = table();
        let g = GraphBuilder::new().build(&t).unwrap();
        let missing = EdgeSplit::from_parts(vec![EdgeId(0)], vec![EdgeId(1)], Tiers::default());
        assert!(matches!(
            check_edge_split(&g, &missing),
            Err(LeakageViolation::EdgeUnassigned { edge: EdgeId(2) })
        ));

        let twice = EdgeSplit::from_parts(
            vec![EdgeId(0), EdgeId(1)],
            vec![EdgeId(1)],
            Tiers { c2: vec![EdgeId(2)], c3: vec![EdgeId(3)], ..Default::default() },
        );
        assert!(matches!(
            check_edge_split(&g, &twice),
            Err(LeakageViolation::EdgeAssignedTwice { edge: EdgeId(1), first: Tier::Train, second: Tier::Val })
        ));
    }

    #[test]
    fn test_edge_split_tier_contracts() {
        let t = table();
        let g = GraphBuilder::new().build(&t).unwrap();
        let ok = EdgeSplit::from_parts(
            vec![EdgeId(0)],
            Vec::new(),
            Tiers { c2: vec![EdgeId(1)], c3: vec![EdgeId(2), EdgeId(3)], ..Default::default() },
        );
        assert_eq!(check_edge_split(&g, &ok), Ok(()));

        let wrong = EdgeSplit::from_parts(
            vec![EdgeId(0)],
            Vec::new(),
            Tiers { c1: vec![EdgeId(1)], c3: vec![EdgeId(2), EdgeId(3)], ..Default::default() },
        );
        assert_eq!(
            check_edge_split(&g, &wrong),
            Err(LeakageViolation::TierMismatch { edge: EdgeId(1), tier: Tier::C1, seen_endpoints: 1 })
        );
    }
}
