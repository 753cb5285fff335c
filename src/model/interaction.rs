//! The interaction table, the only input the splitter needs.

use serde::{Deserialize, Serialize};
use super::{Label, NodeKey};

/// One observed `(protein, substrate, label)` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRow {
    pub protein: String,
    pub substrate: String,
    pub label: Label,
}

impl InteractionRow {
    pub fn new(protein: impl Into<String>, substrate: impl Into<String>, label: Label) -> Self {
        Self { protein: protein.into(), substrate: substrate.into(), label }
    }

    pub fn protein_key(&self) -> NodeKey {
        NodeKey::protein(self.protein.clone())
    }

    pub fn substrate_key(&self) -> NodeKey {
        NodeKey::substrate(self.substrate.clone())
    }
}

/// Ordered interaction rows. Row order is significant: it decides edge
/// order in the graph and which label survives a duplicated pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionTable {
    pub rows: Vec<InteractionRow>,
}

impl InteractionTable {
    pub fn new(rows: Vec<InteractionRow>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, protein: impl Into<String>, substrate: impl Into<String>, label: Label) {
        self.rows.push(InteractionRow::new(protein, substrate, label));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InteractionRow> {
        self.rows.iter()
    }
}

impl FromIterator<InteractionRow> for InteractionTable {
    fn from_iter<I: IntoIterator<Item = InteractionRow>>(iter: I) -> Self {
        Self { rows: iter.into_iter().collect() }
    }
}
