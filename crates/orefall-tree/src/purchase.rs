//! Purchase state and the purchase gate.
//!
//! A node is purchasable iff it is not already owned, every prerequisite is
//! owned, and the wallet covers its actual cost. A successful purchase debits
//! credits, marks the node, then applies its effects in order and sets the
//! skill unlock carried on the node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use orefall_core::records::SharedRecords;

use crate::graph::{UpgradeGraph, UpgradeNode};

/// Owned nodes keyed by stable node id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseState {
    purchased: BTreeMap<String, bool>,
}

impl PurchaseState {
    /// A fresh state owning only the graph root.
    pub fn new(graph: &UpgradeGraph) -> Self {
        let mut state = Self::default();
        state.ensure_root(graph);
        state
    }

    /// Build from a keyed map, as stored in current saves. Unknown keys are kept
    /// so a newer save read by an older build does not lose them.
    pub fn from_map(graph: &UpgradeGraph, map: BTreeMap<String, bool>) -> Self {
        let mut state = Self { purchased: map };
        state.ensure_root(graph);
        state
    }

    /// Build from a positional array aligned to the node table order.
    pub fn from_positional(graph: &UpgradeGraph, flags: &[bool]) -> Self {
        let mut state = Self::default();
        for (i, &owned) in flags.iter().enumerate() {
            match graph.by_legacy_index(i) {
                Some(node) => {
                    state.purchased.insert(node.id.to_string(), owned);
                }
                None => debug!(index = i, "ignoring positional unlock past end of node table"),
            }
        }
        state.ensure_root(graph);
        state
    }

    pub fn ensure_root(&mut self, graph: &UpgradeGraph) {
        if let Some(root) = graph.root() {
            self.purchased.insert(root.id.to_string(), true);
        }
    }

    pub fn is_purchased(&self, id: &str) -> bool {
        self.purchased.get(id).copied().unwrap_or(false)
    }

    fn mark(&mut self, id: &str) {
        self.purchased.insert(id.to_string(), true);
    }

    /// Number of owned nodes other than the root.
    pub fn purchased_count(&self, graph: &UpgradeGraph) -> usize {
        self.purchased
            .iter()
            .filter(|(id, owned)| **owned && graph.get(id).is_some_and(|n| !n.is_root()))
            .count()
    }

    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.purchased
    }
}

/// Why a purchase was refused. Refusals never change any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseRejection {
    /// Shared records are not bootstrapped yet.
    Unavailable,
    UnknownNode,
    AlreadyPurchased,
    MissingPrerequisite { prerequisite: &'static str },
    InsufficientCredits { have: u64, need: u64 },
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub node_id: &'static str,
    pub cost: u64,
    pub credits_left: u64,
}

/// Display state of a node on the upgrade screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    /// No prerequisite owned yet.
    Hidden,
    /// Visible but not buyable right now.
    Revealed,
    /// Visible and buyable.
    Available,
    Purchased,
}

impl UpgradeGraph {
    /// Revealed iff root, or at least one prerequisite is owned.
    pub fn is_revealed(&self, node: &UpgradeNode, state: &PurchaseState) -> bool {
        node.is_root() || node.prerequisites.iter().any(|p| state.is_purchased(p))
    }

    /// Revealed, not owned, all prerequisites owned, and affordable.
    pub fn is_available(&self, node: &UpgradeNode, state: &PurchaseState, credits: u64) -> bool {
        self.is_revealed(node, state) && self.check(node, state, credits).is_ok()
    }

    pub fn node_status(&self, id: &str, state: &PurchaseState, credits: u64) -> NodeStatus {
        let Some(node) = self.get(id) else {
            return NodeStatus::Hidden;
        };
        if state.is_purchased(id) {
            NodeStatus::Purchased
        } else if self.is_available(node, state, credits) {
            NodeStatus::Available
        } else if self.is_revealed(node, state) {
            NodeStatus::Revealed
        } else {
            NodeStatus::Hidden
        }
    }

    fn check(
        &self,
        node: &UpgradeNode,
        state: &PurchaseState,
        credits: u64,
    ) -> Result<u64, PurchaseRejection> {
        if state.is_purchased(node.id) {
            return Err(PurchaseRejection::AlreadyPurchased);
        }
        if let Some(&missing) = node.prerequisites.iter().find(|p| !state.is_purchased(p)) {
            return Err(PurchaseRejection::MissingPrerequisite {
                prerequisite: missing,
            });
        }
        let cost = node.actual_cost();
        if credits < cost {
            return Err(PurchaseRejection::InsufficientCredits {
                have: credits,
                need: cost,
            });
        }
        Ok(cost)
    }

    /// Gate and apply a purchase against `records.game.credits`.
    pub fn purchase(
        &self,
        id: &str,
        state: &mut PurchaseState,
        records: &mut SharedRecords,
    ) -> Result<PurchaseReceipt, PurchaseRejection> {
        let node = self.get(id).ok_or(PurchaseRejection::UnknownNode)?;
        let cost = self.check(node, state, records.game.credits).inspect_err(|reason| {
            debug!(node = id, ?reason, "purchase rejected");
        })?;

        records.game.credits -= cost;
        state.mark(node.id);
        for effect in node.effects {
            effect.apply(records);
        }
        if let Some(slot) = node.skill_slot {
            records.unlocks.unlock(slot);
        }

        info!(
            node = node.id,
            cost,
            credits_left = records.game.credits,
            "upgrade purchased"
        );
        Ok(PurchaseReceipt {
            node_id: node.id,
            cost,
            credits_left: records.game.credits,
        })
    }
}
