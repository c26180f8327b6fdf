//! In-flight action tracking.
//!
//! One action per label at a time. A guard is handed out on begin and
//! releases the label on drop, so the label is freed on every exit path
//! including errors and panics.

use std::sync::Arc;

use dashmap::DashMap;

/// Registry of action labels currently in flight.
#[derive(Debug, Clone, Default)]
pub struct PendingActions {
    actions: Arc<DashMap<String, ()>>,
}

impl PendingActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a label. Returns `None` if an action with this label is
    /// already running.
    pub fn begin(&self, label: &str) -> Option<ActionGuard> {
        match self.actions.entry(label.to_string()) {
            dashmap::Entry::Occupied(_) => None,
            dashmap::Entry::Vacant(entry) => {
                entry.insert(());
                Some(ActionGuard {
                    actions: Arc::clone(&self.actions),
                    label: label.to_string(),
                })
            }
        }
    }

    /// Whether any action with this label is running.
    pub fn is_busy(&self, label: &str) -> bool {
        self.actions.contains_key(label)
    }

    /// Labels currently in flight.
    pub fn active(&self) -> Vec<String> {
        self.actions.iter().map(|e| e.key().clone()).collect()
    }
}

/// Releases its label when dropped.
#[derive(Debug)]
pub struct ActionGuard {
    actions: Arc<DashMap<String, ()>>,
    label: String,
}

impl Drop for ActionGuard {
    fn drop(&mut self) {
        self.actions.remove(&self.label);
    }
}
