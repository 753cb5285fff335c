//! # pairsplit — Leakage-free splits for protein–substrate activity data
//!
//! Splits an interaction table into `train`, `val` and three evaluation
//! tiers that measure generalization to unseen proteins and substrates:
//!
//! | Tier | Meaning |
//! |------|---------|
//! | `C1` | both protein and substrate seen in training |
//! | `C2` | exactly one of them seen |
//! | `C3` | neither seen |
//!
//! ## Design Principles
//!
//! 1. **Explicit graph**: proteins and substrates are nodes of an owned
//!    bipartite graph; duplicate pairs are resolved by a named policy.
//! 2. **One RNG per run**: a single generator seeded from `random_state`
//!    is threaded through every random draw, so a split depends only on
//!    its input and config.
//! 3. **Capped correction**: C2 rebalancing has an iteration budget and a
//!    typed failure.
//! 4. **Checked output**: leakage checks are hard errors, run on every split.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pairsplit::{Splitter, SplitConfig, Tier};
//! use pairsplit::table::Table;
//!
//! # fn example() -> pairsplit::Result<()> {
//! let config = SplitConfig::default();
//! let table = Table::from_csv_path("activity.csv")?;
//! let interactions = table.interactions(&config.protein_col, &config.substrate_col, &config.label_col)?;
//!
//! let outcome = Splitter::new(config)?.split(&interactions)?;
//! for row in outcome.rows.rows(&interactions, Tier::C2) {
//!     println!("{} / {}", row.protein, row.substrate);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod split;
pub mod config;
pub mod binarize;
pub mod table;
pub mod report;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Node, NodeId, NodeKey, NodeKind, Edge, EdgeId, Label, Tier,
    InteractionRow, InteractionTable,
};
pub use graph::{DuplicatePolicy, GraphBuilder, RelationGraph};
pub use split::{
    EdgeSplit, TierSizes, RowSplit, SeenNodes, RebalanceStep, Rebalancer,
    LeakageViolation, Fractions,
};
pub use config::SplitConfig;
pub use report::SplitReport;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Top-level Splitter handle
// ============================================================================

/// The primary entry point. A `Splitter` holds a validated config and
/// runs the full pipeline on an interaction table.
#[derive(Debug, Clone)]
pub struct Splitter {
    config: SplitConfig,
    fractions: Fractions,
}

impl Splitter {
    /// Validate `config`. Fails fast on bad fractions or column names.
    pub fn new(config: SplitConfig) -> Result<Self> {
        let fractions = config.validate()?;
        Ok(Self { config, fractions })
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Split `table`.
    pub fn split(&self, table: &InteractionTable) -> Result<SplitOutcome> {
        // Phase 1: Build
        let graph = GraphBuilder::new()
            .with_policy(self.config.duplicate_policy)
            .build(table)?;

        // Phase 2: Partition
        let mut rng = StdRng::seed_from_u64(self.config.random_state);
        let partition = split::partition_edges(&graph, &self.fractions, &mut rng);

        // Phase 3: Classify
        let seen = SeenNodes::from_edges(&graph, &partition.train);
        let tiers = split::classify(&graph, &seen, partition.test.iter().copied());
        let mut edges = EdgeSplit::from_parts(partition.train, partition.val, tiers);
        let initial = edges.sizes();
        tracing::debug!(sizes = %initial, "initial split");

        // Phase 4: Rebalance
        let budget = self
            .config
            .max_rebalance_iterations
            .unwrap_or_else(|| graph.node_count());
        let steps = Rebalancer::new(self.config.min_c2_size, budget).run(&graph, &mut edges, &mut rng)?;

        // Phase 5: Materialize
        let rows = RowSplit::materialize(&graph, table, &edges);

        // Phase 6: Validate
        split::check_edge_split(&graph, &edges)?;
        split::check_row_split(table, &rows)?;

        tracing::info!(sizes = %edges.sizes(), rebalance_iterations = steps.len(), "split complete");

        Ok(SplitOutcome { graph, initial, edges, rows, steps })
    }
}

/// Everything a split produced. The caller decides what to persist.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub graph: RelationGraph,
    /// Tier sizes straight after partition + classification.
    pub initial: TierSizes,
    pub edges: EdgeSplit,
    pub rows: RowSplit,
    pub steps: Vec<RebalanceStep>,
}

impl SplitOutcome {
    /// Nodes touched by the final training edges.
    pub fn seen_nodes(&self) -> SeenNodes {
        SeenNodes::from_edges(&self.graph, &self.edges.train)
    }

    /// Tier of the edge for an observed pair.
    pub fn tier_of(&self, protein: &str, substrate: &str) -> Option<Tier> {
        let edge = self.graph.edge_between(protein, substrate)?;
        self.edges.iter().find(|(e, _)| *e == edge).map(|(_, t)| t)
    }

    pub fn report(&self, table: &InteractionTable) -> SplitReport {
        SplitReport::new(table, &self.rows, &self.steps)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Duplicate pair ({protein}, {substrate}) with conflicting label at row {row}")]
    DuplicatePair { row: usize, protein: String, substrate: String },

    #[error("Insufficient data: C2 has {c2_size} edges after {iterations} rebalancing iterations, need {required}")]
    InsufficientData { c2_size: usize, required: usize, iterations: usize },

    #[error("Leakage check failed: {0}")]
    Leakage(#[from] LeakageViolation),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
