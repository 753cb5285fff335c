//! Node in the protein–substrate relation graph.

use serde::{Deserialize, Serialize};

/// Dense node identifier, valid only within the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the bipartite graph a node lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Protein,
    Substrate,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Protein => f.write_str("protein"),
            NodeKind::Substrate => f.write_str("substrate"),
        }
    }
}

/// Identity of a node: its kind plus the raw key from the table.
///
/// A protein and a substrate that happen to share a key string are
/// still two different nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub name: String,
}

impl NodeKey {
    pub fn protein(name: impl Into<String>) -> Self {
        Self { kind: NodeKind::Protein, name: name.into() }
    }

    pub fn substrate(name: impl Into<String>) -> Self {
        Self { kind: NodeKind::Substrate, name: name.into() }
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// A node in the relation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub key: NodeKey,
}

impl Node {
    pub fn new(id: NodeId, key: NodeKey) -> Self {
        Self { id, key }
    }

    pub fn kind(&self) -> NodeKind {
        self.key.kind
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn is_protein(&self) -> bool {
        self.key.kind == NodeKind::Protein
    }
}
