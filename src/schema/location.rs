//! Where the image table lives.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

/// The schema currently believed to hold the image table.
///
/// Starts at the configured schema and moves at most once, when the
/// resolver finds the table elsewhere. Share it with `Arc`; readers see
/// either the old or the new name, never a partial update.
#[derive(Debug)]
pub struct SchemaLocation {
    configured: String,
    current: RwLock<String>,
    relocated: AtomicBool,
}

impl SchemaLocation {
    pub fn new(configured: impl Into<String>) -> Self {
        let configured = configured.into();
        Self {
            current: RwLock::new(configured.clone()),
            configured,
            relocated: AtomicBool::new(false),
        }
    }

    /// Schema name from configuration.
    pub fn configured(&self) -> &str {
        &self.configured
    }

    /// Schema name to use for the next query.
    pub fn current(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the table was found outside the configured schema.
    pub fn is_relocated(&self) -> bool {
        self.relocated.load(Ordering::SeqCst)
    }

    /// Point at a different schema. Returns false if it is already current.
    pub(crate) fn relocate(&self, schema: &str) -> bool {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if *current == schema {
            return false;
        }
        *current = schema.to_string();
        self.relocated.store(true, Ordering::SeqCst);
        true
    }
}
