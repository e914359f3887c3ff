//! Upgrade graph and effect engine for orefall.
//!
//! The graph is a fixed table of nodes across five branches. Buying a node
//! debits credits and mutates the shared stat records through its effects.

pub mod effects;
pub mod graph;
pub mod purchase;

pub use effects::UpgradeEffect;
pub use graph::{Branch, UpgradeGraph, UpgradeNode, ROOT_NODE_ID};
pub use purchase::{NodeStatus, PurchaseReceipt, PurchaseRejection, PurchaseState};
