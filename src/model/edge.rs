//! Edge (observed protein–substrate pair) in the relation graph.

use serde::{Deserialize, Serialize};
use super::NodeId;

/// Dense edge identifier, valid only within the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binarized activity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Inactive,
    Active,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Inactive => 0,
            Label::Active => 1,
        }
    }

    /// Parse a binary label cell. Accepts `0`/`1` as well as float-formatted
    /// `0.0`/`1.0` and `true`/`false`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" | "1.0" | "true" | "True" => Some(Label::Active),
            "0" | "0.0" | "false" | "False" => Some(Label::Inactive),
            _ => None,
        }
    }
}

impl From<bool> for Label {
    fn from(active: bool) -> Self {
        if active { Label::Active } else { Label::Inactive }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// An undirected protein–substrate edge carrying the pair's label.
///
/// Endpoints are stored by role so the pair is unordered in meaning but
/// canonical in representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub protein: NodeId,
    pub substrate: NodeId,
    pub label: Label,
}

impl Edge {
    pub fn new(id: EdgeId, protein: NodeId, substrate: NodeId, label: Label) -> Self {
        Self { id, protein, substrate, label }
    }

    pub fn endpoints(&self) -> [NodeId; 2] {
        [self.protein, self.substrate]
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.protein == node || self.substrate == node
    }

    /// The "other" end of the edge from the given node.
    pub fn other_node(&self, from: NodeId) -> Option<NodeId> {
        if from == self.protein { Some(self.substrate) }
        else if from == self.substrate { Some(self.protein) }
        else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse() {
        assert_eq!(Label::parse("1"), Some(Label::Active));
        assert_eq!(Label::parse(" 0 "), Some(Label::Inactive));
        assert_eq!(Label::parse("1.0"), Some(Label::Active));
        assert_eq!(Label::parse("high"), None);
        assert_eq!(Label::parse(""), None);
    }

    #[test]
    fn test_other_node() {
        let e = Edge::new(EdgeId(0), NodeId(1), NodeId(2), Label::Active);
        assert_eq!(e.other_node(NodeId(1)), Some(NodeId(2)));
        assert_eq!(e.other_node(NodeId(2)), Some(NodeId(1)));
        assert_eq!(e.other_node(NodeId(3)), None);
        assert!(e.touches(NodeId(2)));
        assert!(!e.touches(NodeId(3)));
    }
}
