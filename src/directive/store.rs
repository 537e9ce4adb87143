//! Directive store
//!
//! Holds the active directive set. The only mutations are wholesale
//! replacement and clearing; a snapshot taken before a replacement keeps
//! seeing the set it was taken from.

use std::sync::Arc;

use super::types::DirectiveSet;

/// Owner of the active directive set
#[derive(Debug, Default)]
pub struct DirectiveStore {
    current: Arc<DirectiveSet>,
    /// Number of replacements since creation
    generation: u64,
}

impl DirectiveStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `directives` in place of the current set
    pub fn replace(&mut self, directives: impl Into<DirectiveSet>) {
        self.current = Arc::new(directives.into());
        self.generation += 1;
    }

    /// Drops every directive
    pub fn clear(&mut self) {
        self.replace(DirectiveSet::new());
    }

    /// Read-only view of the current set
    pub fn snapshot(&self) -> Arc<DirectiveSet> {
        Arc::clone(&self.current)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }
}
