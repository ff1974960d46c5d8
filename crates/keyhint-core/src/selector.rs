//! Which elements get a hint, and what activating them means.

use keyhint_protocols::{Document, NodeId};
use url::Url;

/// Attributes that make any element actionable.
const ACTION_ATTRIBUTES: [&str; 6] = [
    "onclick",
    "onmouseover",
    "onmousedown",
    "onmouseup",
    "oncommand",
    "href",
];

/// Tags that are actionable on their own.
const ACTIONABLE_TAGS: [&str; 6] = ["area", "textarea", "button", "select", "frame", "iframe"];

/// `input` types that are pressed rather than typed into.
const PRESSABLE_INPUT_TYPES: [&str; 7] = [
    "button", "submit", "reset", "checkbox", "radio", "file", "image",
];

/// How an element reacts to activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// Text input, select or textarea: focused, host enters insert mode.
    TextEntry,
    /// Embedded document: focused.
    Frame,
    /// Everything else: clicked.
    Pressable,
}

fn tag_of<D: Document + ?Sized>(doc: &D, node: NodeId) -> String {
    doc.tag_name(node).to_ascii_lowercase()
}

fn input_type<D: Document + ?Sized>(doc: &D, node: NodeId) -> String {
    doc.attribute(node, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Whether `node` matches the selection rule.
pub fn is_actionable<D: Document + ?Sized>(doc: &D, node: NodeId) -> bool {
    if ACTION_ATTRIBUTES
        .iter()
        .any(|attr| doc.attribute(node, attr).is_some())
    {
        return true;
    }

    let tag = tag_of(doc, node);
    match tag.as_str() {
        "input" => input_type(doc, node) != "hidden",
        other => ACTIONABLE_TAGS.contains(&other),
    }
}

pub fn is_anchor<D: Document + ?Sized>(doc: &D, node: NodeId) -> bool {
    tag_of(doc, node) == "a"
}

pub fn is_frame<D: Document + ?Sized>(doc: &D, node: NodeId) -> bool {
    matches!(tag_of(doc, node).as_str(), "frame" | "iframe")
}

pub fn role<D: Document + ?Sized>(doc: &D, node: NodeId) -> ElementRole {
    match tag_of(doc, node).as_str() {
        "select" | "textarea" => ElementRole::TextEntry,
        "input" if !PRESSABLE_INPUT_TYPES.contains(&input_type(doc, node).as_str()) => {
            ElementRole::TextEntry
        }
        "frame" | "iframe" => ElementRole::Frame,
        _ => ElementRole::Pressable,
    }
}

/// Resolve an `href` against the document base URL.
///
/// Falls back to the raw value when it cannot be resolved, so two anchors
/// with the same unresolvable `href` still compare equal.
pub fn resolve_href(base: Option<&str>, raw: &str) -> String {
    let raw = raw.trim();
    let base = base.and_then(|b| Url::parse(b).ok());
    let resolved = match base {
        Some(base) => base.join(raw),
        None => Url::parse(raw),
    };
    resolved.map(|url| url.to_string()).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyhint_dom_snapshot::{ElementSnapshot, PageSnapshot, SnapshotDocument};
    use keyhint_protocols::Viewport;

    fn single(element: ElementSnapshot) -> (SnapshotDocument, NodeId) {
        let doc = SnapshotDocument::new(PageSnapshot::new(Viewport::default()).element(element));
        let node = doc.element_ids(doc.top_document())[0];
        (doc, node)
    }

    #[test]
    fn test_event_attributes_are_actionable() {
        for attr in ACTION_ATTRIBUTES {
            let (doc, node) = single(ElementSnapshot::new("div").attr(attr, "x"));
            assert!(is_actionable(&doc, node), "{} should be actionable", attr);
        }
    }

    #[test]
    fn test_plain_div_not_actionable() {
        let (doc, node) = single(ElementSnapshot::new("div"));
        assert!(!is_actionable(&doc, node));
    }

    #[test]
    fn test_hidden_input_not_actionable() {
        let (doc, node) = single(ElementSnapshot::new("input").attr("type", "HIDDEN"));
        assert!(!is_actionable(&doc, node));

        let (doc, node) = single(ElementSnapshot::new("input"));
        assert!(is_actionable(&doc, node));
    }

    #[test]
    fn test_actionable_tags_case_insensitive() {
        for tag in ["AREA", "textarea", "Button", "select", "frame", "IFRAME"] {
            let (doc, node) = single(ElementSnapshot::new(tag));
            assert!(is_actionable(&doc, node), "{} should be actionable", tag);
        }
    }

    #[test]
    fn test_anchor_without_href_not_actionable() {
        let (doc, node) = single(ElementSnapshot::new("a"));
        assert!(!is_actionable(&doc, node));
        assert!(is_anchor(&doc, node));
    }

    #[test]
    fn test_roles() {
        let cases = [
            (ElementSnapshot::new("input"), ElementRole::TextEntry),
            (ElementSnapshot::new("input").attr("type", "email"), ElementRole::TextEntry),
            (ElementSnapshot::new("input").attr("type", "checkbox"), ElementRole::Pressable),
            (ElementSnapshot::new("input").attr("type", "Submit"), ElementRole::Pressable),
            (ElementSnapshot::new("textarea"), ElementRole::TextEntry),
            (ElementSnapshot::new("select"), ElementRole::TextEntry),
            (ElementSnapshot::new("iframe"), ElementRole::Frame),
            (ElementSnapshot::new("frame"), ElementRole::Frame),
            (ElementSnapshot::link("/x"), ElementRole::Pressable),
            (ElementSnapshot::new("button"), ElementRole::Pressable),
        ];
        for (element, expected) in cases {
            let (doc, node) = single(element);
            assert_eq!(role(&doc, node), expected, "{}", doc.describe(node));
        }
    }

    #[test]
    fn test_resolve_href() {
        let base = Some("https://example.com/docs/index.html");
        assert_eq!(resolve_href(base, "intro.html"), "https://example.com/docs/intro.html");
        assert_eq!(resolve_href(base, "/about"), "https://example.com/about");
        assert_eq!(
            resolve_href(base, "https://other.org/"),
            "https://other.org/"
        );
    }

    #[test]
    fn test_resolve_href_without_base() {
        assert_eq!(resolve_href(None, "https://example.com"), "https://example.com/");
        assert_eq!(resolve_href(None, "relative/path"), "relative/path");
    }
}
