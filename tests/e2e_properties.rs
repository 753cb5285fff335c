//! Property tests over random bipartite interaction tables.

use pairsplit::split::{classify, partition_edges, Fractions, SeenNodes};
use pairsplit::{
    Error, GraphBuilder, InteractionRow, InteractionTable, Label, SplitConfig, Splitter, Tier,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn arb_table() -> impl Strategy<Value = InteractionTable> {
    prop::collection::vec((0u8..8, 0u8..8, any::<bool>()), 1..64).prop_map(|rows| {
        rows.into_iter()
            .map(|(p, s, active)| InteractionRow::new(format!("P{p}"), format!("S{s}"), Label::from(active)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_partition_is_stratified(table in arb_table(), seed in any::<u64>()) {
        let graph = GraphBuilder::new().build(&table).unwrap();
        let fractions = Fractions::new(0.7, 0.15).unwrap();
        let p = partition_edges(&graph, &fractions, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(p.train.len() + p.val.len() + p.test.len(), graph.edge_count());
        for label in [Label::Active, Label::Inactive] {
            let group = graph.edges().iter().filter(|e| e.label == label).count();
            let in_train = p.train.iter().filter(|e| graph.edge(**e).label == label).count();
            let expected = (0.7 * group as f64).floor() as usize;
            prop_assert!(in_train.abs_diff(expected) <= 1);
        }
    }

    #[test]
    fn prop_classifier_matches_seen_count(table in arb_table(), seed in any::<u64>()) {
        let graph = GraphBuilder::new().build(&table).unwrap();
        let fractions = Fractions::new(0.5, 0.3).unwrap();
        let p = partition_edges(&graph, &fractions, &mut StdRng::seed_from_u64(seed));
        let seen = SeenNodes::from_edges(&graph, &p.train);
        let tiers = classify(&graph, &seen, p.test.iter().copied());

        prop_assert_eq!(tiers.c1.len() + tiers.c2.len() + tiers.c3.len(), p.test.len());
        for e in &tiers.c1 { prop_assert_eq!(seen.seen_endpoints(&graph, *e), 2); }
        for e in &tiers.c2 { prop_assert_eq!(seen.seen_endpoints(&graph, *e), 1); }
        for e in &tiers.c3 { prop_assert_eq!(seen.seen_endpoints(&graph, *e), 0); }
    }

    #[test]
    fn prop_split_is_total_and_leak_free(
        table in arb_table(),
        seed in any::<u64>(),
        min_c2 in 0usize..12,
    ) {
        let cfg = SplitConfig { random_state: seed, min_c2_size: min_c2, ..Default::default() };
        let outcome = match Splitter::new(cfg).unwrap().split(&table) {
            Ok(outcome) => outcome,
            Err(Error::InsufficientData { c2_size, required, .. }) => {
                prop_assert!(c2_size < required);
                return Ok(());
            }
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        };

        // partition totality
        let mut assigned: Vec<_> = outcome.edges.iter().map(|(e, _)| e).collect();
        assigned.sort();
        let all: Vec<_> = outcome.graph.edge_ids().collect();
        prop_assert_eq!(assigned, all);
        prop_assert!(outcome.edges.c2.len() >= min_c2);

        // tier contracts against the final seen set
        let seen = outcome.seen_nodes();
        for (tier, want) in [(Tier::C1, 2), (Tier::C2, 1), (Tier::C3, 0)] {
            for e in outcome.edges.get(tier) {
                prop_assert_eq!(seen.seen_endpoints(&outcome.graph, *e), want);
            }
        }

        // every rebalancing step strictly shrinks train ∪ val
        let mut previous = outcome.initial.train + outcome.initial.val;
        for step in &outcome.steps {
            let now = step.sizes.train + step.sizes.val;
            prop_assert!(now < previous);
            previous = now;
        }
        prop_assert!(outcome.steps.len() <= outcome.graph.node_count());

        prop_assert_eq!(outcome.rows.unassigned(), 0);
    }

    #[test]
    fn prop_split_is_deterministic(table in arb_table(), seed in any::<u64>()) {
        let cfg = SplitConfig { random_state: seed, min_c2_size: 2, ..Default::default() };
        let splitter = Splitter::new(cfg).unwrap();
        match (splitter.split(&table), splitter.split(&table)) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.edges, b.edges);
                prop_assert_eq!(a.rows, b.rows);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "same seed gave different outcomes"),
        }
    }
}
