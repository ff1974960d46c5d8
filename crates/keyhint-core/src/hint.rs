//! Hint: one label bound to one actionable element.

use keyhint_protocols::{DocumentId, NodeId};

/// One overlay label bound to one actionable element.
///
/// Several hints may share a `number` when they are anchors with the same
/// resolved destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// The labelled element. Not owned; the page may remove it at any time.
    pub element: NodeId,
    /// Document the element lives in.
    pub document: DocumentId,
    /// Number shown on the label, starting at 1.
    pub number: u32,
    /// Overlay label node, owned by the engine.
    pub label: NodeId,
    /// Resolved destination, for anchors only.
    pub href: Option<String>,
}

impl Hint {
    pub fn key(&self) -> String {
        self.number.to_string()
    }

    /// Whether the label starts with the typed digits.
    pub fn matches_prefix(&self, typed: &str) -> bool {
        self.key().starts_with(typed)
    }

    /// Whether the label is exactly the typed digits.
    pub fn matches_exactly(&self, typed: &str) -> bool {
        self.key() == typed
    }
}
