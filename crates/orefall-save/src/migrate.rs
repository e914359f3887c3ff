//! Forward migration of save documents.
//!
//! Version history:
//! - 1: no tech tree; skills were always available.
//! - 2: `techTreeUnlocks` as a bool array aligned to the node table.
//! - 3: `techTreeUnlocks` keyed by node id.

use tracing::info;

use orefall_tree::{PurchaseState, UpgradeGraph};

use crate::schema::{SaveDocument, TechTreeUnlocks};

pub const CURRENT_SAVE_VERSION: u32 = 3;

/// Bring `doc` up to [`CURRENT_SAVE_VERSION`]. Returns `true` if anything
/// changed. Current documents are left untouched, so running this twice is
/// the same as running it once.
pub fn migrate(doc: &mut SaveDocument, graph: &UpgradeGraph) -> bool {
    if doc.save_version >= CURRENT_SAVE_VERSION {
        return false;
    }
    let from = doc.save_version;

    let purchases: PurchaseState = doc.tech_tree_unlocks.to_state(graph);
    let filled = doc.stats.fill_unset();

    // Pre-graph players owned every skill; do not take them away.
    let legacy = purchases.purchased_count(graph) == 0;
    if legacy {
        doc.skill_unlocks = [true; 4];
    }

    doc.tech_tree_unlocks = TechTreeUnlocks::Keyed(purchases.as_map().clone());
    doc.current_level = doc.current_level.max(1);
    doc.save_version = CURRENT_SAVE_VERSION;

    info!(
        from,
        to = CURRENT_SAVE_VERSION,
        filled,
        legacy,
        "migrated save document"
    );
    true
}
