//! Save persistence for orefall.
//!
//! A versioned JSON document holds credits, level, upgrade purchases, skill
//! unlocks and every tunable stat. Older documents are migrated forward on
//! load. Writes go to a primary file store with a lightweight key-value
//! store as fallback; when nothing can be read a fresh document is used.

pub mod error;
pub mod manager;
pub mod migrate;
pub mod schema;
pub mod store;

pub use error::{SaveError, SaveResult};
pub use manager::SaveManager;
pub use migrate::{migrate, CURRENT_SAVE_VERSION};
pub use schema::{SaveDocument, SaveStats, TechTreeUnlocks};
pub use store::{FileStore, MemoryStore, PrefsStore, SaveStore};
