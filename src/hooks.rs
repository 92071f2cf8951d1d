//! Hook system: notification of document lifecycle events
//!
//! Presentation layers subscribe to named hooks and are called
//! synchronously after the state change the hook describes, before the
//! triggering call returns. The core never touches display state; hooks
//! are its only outbound channel.

use crate::document_set::BufferId;
use std::collections::HashMap;
use std::path::PathBuf;

/// Arguments passed to hook callbacks
#[derive(Debug, Clone)]
pub enum HookArgs {
    /// A document was created or opened and made active
    DocumentOpened {
        id: BufferId,
        path: Option<PathBuf>,
    },

    /// The active document's text changed
    DocumentChanged {
        id: BufferId,
        old_text: String,
        new_text: String,
    },

    /// A document was successfully written to disk
    DocumentSaved { id: BufferId, path: PathBuf },
}

/// Callback invoked when a hook fires
///
/// Returning `false` stops the remaining callbacks registered for the
/// same hook name.
pub type HookCallback = Box<dyn Fn(&HookArgs) -> bool>;

/// Registry for managing hooks
pub struct HookRegistry {
    /// Map from hook name to list of callbacks
    hooks: HashMap<String, Vec<HookCallback>>,
}

impl HookRegistry {
    /// Create a new hook registry
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Add a hook callback for a specific hook name
    pub fn add_hook(&mut self, name: &str, callback: HookCallback) {
        self.hooks
            .entry(name.to_string())
            .or_insert_with(Vec::new)
            .push(callback);
    }

    /// Remove all hooks for a specific name
    pub fn remove_hooks(&mut self, name: &str) {
        self.hooks.remove(name);
    }

    /// Run all hooks for a specific name
    ///
    /// Returns `true` if all callbacks returned true, `false` if one of
    /// them stopped the chain.
    pub fn run_hooks(&self, name: &str, args: &HookArgs) -> bool {
        if let Some(hooks) = self.hooks.get(name) {
            for callback in hooks {
                if !callback(args) {
                    tracing::debug!("Hook '{}' stopped the callback chain", name);
                    return false;
                }
            }
        }
        true
    }

    /// Get count of registered callbacks for a hook
    pub fn hook_count(&self, name: &str) -> usize {
        self.hooks.get(name).map(|v| v.len()).unwrap_or(0)
    }

    /// Get all registered hook names
    pub fn hook_names(&self) -> Vec<String> {
        self.hooks.keys().cloned().collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
