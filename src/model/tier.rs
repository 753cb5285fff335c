//! Split tiers.

use serde::{Deserialize, Serialize};

/// The five disjoint destinations of an edge.
///
/// `C1`..`C3` are the generalization tiers of evaluation edges:
/// both endpoints seen in training, exactly one seen, neither seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "train")]
    Train,
    #[serde(rename = "val")]
    Val,
    C1,
    C2,
    C3,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::Train, Tier::Val, Tier::C1, Tier::C2, Tier::C3];

    /// Evaluation tiers only.
    pub const EVALUATION: [Tier; 3] = [Tier::C1, Tier::C2, Tier::C3];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Train => "train",
            Tier::Val => "val",
            Tier::C1 => "C1",
            Tier::C2 => "C2",
            Tier::C3 => "C3",
        }
    }

    /// Column value for a row-level assignment; unassigned rows read `none`.
    pub fn label_for(tier: Option<Tier>) -> &'static str {
        tier.map_or("none", Tier::as_str)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Tier::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
