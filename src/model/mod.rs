//! # Interaction Model
//!
//! Plain DTOs shared by every stage of the splitter.
//! These types cross every boundary: table ↔ graph ↔ split ↔ report.
//!
//! Design rule: no CSV types, no RNG, no tracing here.
//! This module is pure data: no I/O, no state.

pub mod node;
pub mod edge;
pub mod tier;
pub mod interaction;

pub use node::{Node, NodeId, NodeKey, NodeKind};
pub use edge::{Edge, EdgeId, Label};
pub use tier::Tier;
pub use interaction::{InteractionRow, InteractionTable};
