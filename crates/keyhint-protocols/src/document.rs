//! The document tree a host exposes to the hint engine.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Viewport};
use crate::style::LabelStyle;

/// Handle to a node in the host tree. Only meaningful to the host that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Handle to a document (the top document or an embedded frame document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

/// The subset of computed style the engine looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedStyle {
    #[serde(default = "default_display")]
    pub display: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: default_display(),
            visibility: default_visibility(),
        }
    }
}

impl ComputedStyle {
    /// Rendered means not `display: none` and `visibility: visible`.
    pub fn is_rendered(&self) -> bool {
        self.display != "none" && self.visibility == "visible"
    }
}

fn default_display() -> String {
    "inline".to_string()
}

fn default_visibility() -> String {
    "visible".to_string()
}

/// Text of a hint label, split at the part the user has already typed.
///
/// `matched` is empty when no digits are typed; hosts are expected to
/// render a non-empty `matched` distinctly from `rest`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelText {
    pub matched: String,
    pub rest: String,
}

impl LabelText {
    /// The whole number, nothing highlighted.
    pub fn plain(number: u32) -> Self {
        Self {
            matched: String::new(),
            rest: number.to_string(),
        }
    }

    /// The number with its first `typed` digits highlighted.
    pub fn highlighted(number: u32, typed: usize) -> Self {
        let digits = number.to_string();
        let split = typed.min(digits.len());
        Self {
            matched: digits[..split].to_string(),
            rest: digits[split..].to_string(),
        }
    }

    /// The full label as displayed.
    pub fn full(&self) -> String {
        format!("{}{}", self.matched, self.rest)
    }
}

/// Everything the host needs to draw one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec<'a> {
    pub text: LabelText,
    /// Position in the scroll coordinates of the label's own document.
    pub position: Point,
    pub style: &'a LabelStyle,
}

/// Host document tree.
///
/// The engine reads geometry and attributes through the query methods and
/// draws its overlay through the mutation methods. Every call is synchronous
/// and happens on the host's UI thread.
pub trait Document {
    // ---- tree queries ----

    /// The top-level document hint mode was started in.
    fn top_document(&self) -> DocumentId;

    /// Viewport size and scroll offset of a document.
    fn viewport(&self, doc: DocumentId) -> Viewport;

    /// Base URL used to resolve relative links, if known.
    fn base_url(&self, doc: DocumentId) -> Option<String>;

    /// All elements of a document in document order.
    fn elements(&self, doc: DocumentId) -> Vec<NodeId>;

    /// Tag name of an element, in any case.
    fn tag_name(&self, node: NodeId) -> String;

    /// Raw attribute value.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Bounding rectangle relative to the element's document viewport.
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    fn computed_style(&self, node: NodeId) -> Option<ComputedStyle>;

    /// Content document of a `frame`/`iframe` element.
    fn content_document(&self, node: NodeId) -> Option<DocumentId>;

    /// False once the node has been removed from the tree.
    fn is_alive(&self, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    // ---- overlay ----

    /// Create a container for labels and attach it to the document.
    fn create_overlay_root(&mut self, doc: DocumentId) -> NodeId;

    /// Create a label inside an overlay root.
    fn create_label(&mut self, root: NodeId, spec: &LabelSpec<'_>) -> NodeId;

    fn set_label_text(&mut self, label: NodeId, text: &LabelText);

    fn set_label_visible(&mut self, label: NodeId, visible: bool);

    /// Detach `child` from `parent`.
    fn remove_child(&mut self, parent: NodeId, child: NodeId);

    // ---- actions ----

    fn focus(&mut self, node: NodeId);

    /// Trigger the element's primary action.
    fn click(&mut self, node: NodeId);

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn remove_attribute(&mut self, node: NodeId, name: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_style_rendered() {
        assert!(ComputedStyle::default().is_rendered());

        let hidden = ComputedStyle {
            visibility: "hidden".to_string(),
            ..ComputedStyle::default()
        };
        assert!(!hidden.is_rendered());

        let none = ComputedStyle {
            display: "none".to_string(),
            ..ComputedStyle::default()
        };
        assert!(!none.is_rendered());
    }

    #[test]
    fn test_label_text_plain() {
        let text = LabelText::plain(42);
        assert!(text.matched.is_empty());
        assert_eq!(text.rest, "42");
        assert_eq!(text.full(), "42");
    }

    #[test]
    fn test_label_text_highlighted() {
        let text = LabelText::highlighted(123, 2);
        assert_eq!(text.matched, "12");
        assert_eq!(text.rest, "3");
        assert_eq!(text.full(), "123");
    }

    #[test]
    fn test_label_text_highlight_clamped() {
        let text = LabelText::highlighted(7, 3);
        assert_eq!(text.matched, "7");
        assert!(text.rest.is_empty());
    }
}
