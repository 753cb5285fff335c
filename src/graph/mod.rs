//! # Relation Graph
//!
//! Owned, in-memory bipartite graph of proteins and substrates.
//!
//! ## Layout
//!
//! - **Nodes** and **edges** live in insertion-ordered `Vec`s; their ids are
//!   dense indices into those vectors.
//! - `node_index` maps a [`NodeKey`] to its id, `pair_index` maps an
//!   unordered `(protein, substrate)` pair to its edge. The pair index is
//!   what keeps the graph simple: at most one edge per node pair.
//! - `adjacency` holds each node's incident edges.
//!
//! Iteration order is always insertion order, so everything downstream
//! is deterministic given the input row order.

mod builder;

pub use builder::{DuplicatePolicy, GraphBuilder};

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::*;

/// Incident edge list; most nodes in activity screens have a handful of partners.
pub type Incidence = SmallVec<[EdgeId; 8]>;

/// Bipartite protein–substrate graph.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// node_id → incident edge ids
    adjacency: Vec<Incidence>,
    node_index: HashMap<NodeKey, NodeId>,
    /// (protein, substrate) → edge id
    pair_index: HashMap<(NodeId, NodeId), EdgeId>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutation (used by the builder)
    // ========================================================================

    /// Return the node for `key`, creating it if needed.
    pub(crate) fn ensure_node(&mut self, key: NodeKey) -> NodeId {
        if let Some(id) = self.node_index.get(&key) {
            return *id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, key.clone()));
        self.adjacency.push(Incidence::new());
        self.node_index.insert(key, id);
        id
    }

    /// Insert the edge for a pair, or overwrite its label if the pair exists.
    ///
    /// Returns the edge id and the label it replaced, if any. An overwritten
    /// edge keeps its original position in edge order.
    pub(crate) fn upsert_edge(
        &mut self,
        protein: NodeId,
        substrate: NodeId,
        label: Label,
    ) -> (EdgeId, Option<Label>) {
        if let Some(&id) = self.pair_index.get(&(protein, substrate)) {
            let edge = &mut self.edges[id.index()];
            let previous = std::mem::replace(&mut edge.label, label);
            return (id, Some(previous));
        }
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge::new(id, protein, substrate, label));
        self.adjacency[protein.index()].push(id);
        self.adjacency[substrate.index()].push(id);
        self.pair_index.insert((protein, substrate), id);
        (id, None)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn node_id(&self, key: &NodeKey) -> Option<NodeId> {
        self.node_index.get(key).copied()
    }

    pub fn protein(&self, name: &str) -> Option<NodeId> {
        self.node_id(&NodeKey::protein(name))
    }

    pub fn substrate(&self, name: &str) -> Option<NodeId> {
        self.node_id(&NodeKey::substrate(name))
    }

    /// Edge for an observed pair, by raw keys.
    pub fn edge_between(&self, protein: &str, substrate: &str) -> Option<EdgeId> {
        let p = self.protein(protein)?;
        let s = self.substrate(substrate)?;
        self.pair_index.get(&(p, s)).copied()
    }

    pub fn incident_edges(&self, node: NodeId) -> &[EdgeId] {
        &self.adjacency[node.index()]
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node.index()].len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().map(|e| e.id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
