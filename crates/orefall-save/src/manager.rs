//! Load and save with fallback.
//!
//! Nothing here is fatal. A store that cannot be read, or holds something
//! that does not parse, counts as empty; when every store is empty the
//! player gets a fresh profile. A failed write is logged and reported, and
//! the caller keeps its in-memory state until the next attempt.

use std::path::Path;

use tracing::{info, warn};

use orefall_tree::UpgradeGraph;

use crate::error::SaveResult;
use crate::migrate::migrate;
use crate::schema::SaveDocument;
use crate::store::{FileStore, PrefsStore, SaveStore};

pub const SAVE_FILE_NAME: &str = "orefall_save.json";
pub const PREFS_FILE_NAME: &str = "orefall_prefs.json";
pub const PREFS_SAVE_KEY: &str = "orefall.save";

pub struct SaveManager {
    primary: Box<dyn SaveStore>,
    fallback: Box<dyn SaveStore>,
    graph: &'static UpgradeGraph,
}

impl SaveManager {
    pub fn new(
        primary: Box<dyn SaveStore>,
        fallback: Box<dyn SaveStore>,
        graph: &'static UpgradeGraph,
    ) -> Self {
        Self {
            primary,
            fallback,
            graph,
        }
    }

    /// File store in `dir` with a prefs file beside it as fallback.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            Box::new(FileStore::new(dir.join(SAVE_FILE_NAME))),
            Box::new(PrefsStore::new(dir.join(PREFS_FILE_NAME), PREFS_SAVE_KEY)),
            UpgradeGraph::standard(),
        )
    }

    pub fn graph(&self) -> &'static UpgradeGraph {
        self.graph
    }

    /// Read the newest usable document, migrated to the current version.
    pub fn load(&self) -> SaveDocument {
        for store in [&self.primary, &self.fallback] {
            if let Some(mut doc) = self.try_load(store.as_ref()) {
                if migrate(&mut doc, self.graph) {
                    // Persist the upgraded form so migration runs once per profile.
                    let _ = self.save(&doc);
                }
                info!(
                    store = store.name(),
                    credits = doc.total_credits,
                    level = doc.current_level,
                    "save loaded"
                );
                return doc;
            }
        }
        info!("no usable save found, starting fresh profile");
        SaveDocument::fresh(self.graph)
    }

    fn try_load(&self, store: &dyn SaveStore) -> Option<SaveDocument> {
        let json = match store.read() {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!(store = store.name(), error = %e, "save store unreadable");
                return None;
            }
        };
        match SaveDocument::from_json(&json) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(store = store.name(), error = %e, "save document corrupt, ignoring");
                None
            }
        }
    }

    /// Write to the primary store, or the fallback if the primary fails.
    pub fn save(&self, doc: &SaveDocument) -> SaveResult<()> {
        let json = doc.to_json()?;
        match self.primary.write(&json) {
            Ok(()) => Ok(()),
            Err(primary_err) => {
                warn!(
                    store = self.primary.name(),
                    error = %primary_err,
                    "primary save failed, trying fallback"
                );
                self.fallback.write(&json).inspect_err(|e| {
                    warn!(store = self.fallback.name(), error = %e, "fallback save failed");
                })
            }
        }
    }
}
