//! # Stage
//!
//! Off-screen registry of patched clones. Each export run owns exactly one
//! entry through a [`StageGuard`]; dropping the guard removes the entry and
//! every logo listener still pending for it, on success and failure alike.
//!
//! ## Entry Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stage.open(kind) ──► StageGuard ─┬─► add_listener()    (logo load)    │
//! │                                   ├─► remove_listener() (load settled) │
//! │                                   ├─► attach(clone)                    │
//! │                                   └─► drop ──► entry + listeners gone  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use taraang_core::document::DocNode;
use taraang_core::DocumentKind;
use uuid::Uuid;

#[derive(Debug)]
struct StagedEntry {
    kind: DocumentKind,
    node: Option<DocNode>,
    listeners: usize,
}

/// Shared registry of staged clones.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    entries: Arc<Mutex<HashMap<Uuid, StagedEntry>>>,
}

impl Stage {
    pub fn new() -> Self {
        Stage::default()
    }

    /// Registers a new, empty entry for one export run.
    pub fn open(&self, kind: DocumentKind) -> StageGuard {
        let id = Uuid::new_v4();
        self.entries.lock().expect("Stage mutex poisoned").insert(
            id,
            StagedEntry {
                kind,
                node: None,
                listeners: 0,
            },
        );
        StageGuard {
            stage: self.clone(),
            id,
        }
    }

    /// Number of staged entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("Stage mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pending listeners across all entries.
    pub fn listener_count(&self) -> usize {
        self.entries
            .lock()
            .expect("Stage mutex poisoned")
            .values()
            .map(|e| e.listeners)
            .sum()
    }

    /// Entries with an attached clone, per kind.
    pub fn attached_count(&self, kind: DocumentKind) -> usize {
        self.entries
            .lock()
            .expect("Stage mutex poisoned")
            .values()
            .filter(|e| e.kind == kind && e.node.is_some())
            .count()
    }

    fn with_entry<R>(&self, id: Uuid, f: impl FnOnce(&mut StagedEntry) -> R) -> Option<R> {
        let mut entries = self.entries.lock().expect("Stage mutex poisoned");
        entries.get_mut(&id).map(f)
    }
}

/// Ownership of one stage entry; releases it on drop.
#[derive(Debug)]
pub struct StageGuard {
    stage: Stage,
    id: Uuid,
}

impl StageGuard {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Records a pending load listener.
    pub fn add_listener(&self) {
        self.stage.with_entry(self.id, |e| e.listeners += 1);
    }

    /// Releases one pending listener.
    pub fn remove_listener(&self) {
        self.stage
            .with_entry(self.id, |e| e.listeners = e.listeners.saturating_sub(1));
    }

    /// Attaches the patched clone.
    pub fn attach(&self, node: DocNode) {
        self.stage.with_entry(self.id, |e| e.node = Some(node));
    }

    /// A copy of the attached clone, if any.
    pub fn snapshot(&self) -> Option<DocNode> {
        self.stage
            .with_entry(self.id, |e| e.node.clone())
            .flatten()
    }
}

impl Drop for StageGuard {
    fn drop(&mut self) {
        // A poisoned lock still holds valid entries
        let mut entries = match self.stage.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_drop_releases_entry_and_listeners() {
        let stage = Stage::new();
        {
            let guard = stage.open(DocumentKind::Invoice);
            guard.add_listener();
            guard.attach(DocNode::text("clone"));
            assert_eq!(stage.len(), 1);
            assert_eq!(stage.listener_count(), 1);
            assert_eq!(stage.attached_count(DocumentKind::Invoice), 1);
            assert!(guard.snapshot().is_some());
        }
        assert!(stage.is_empty());
        assert_eq!(stage.listener_count(), 0);
    }

    #[test]
    fn test_entries_are_independent() {
        let stage = Stage::new();
        let a = stage.open(DocumentKind::Quotation);
        let b = stage.open(DocumentKind::Quotation);
        a.attach(DocNode::text("a"));
        b.attach(DocNode::text("b"));
        drop(a);
        assert_eq!(stage.len(), 1);
        assert_eq!(b.snapshot().map(|n| n.text_content()).as_deref(), Some("b"));
    }

    #[test]
    fn test_remove_listener_saturates() {
        let stage = Stage::new();
        let guard = stage.open(DocumentKind::Invoice);
        guard.remove_listener();
        assert_eq!(stage.listener_count(), 0);
    }
}
