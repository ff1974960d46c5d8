//! Discovery: walk the document and its frames, label every visible actionable element.

use std::collections::HashMap;

use tracing::{debug, trace};

use keyhint_config::HintsConfig;
use keyhint_protocols::{Document, DocumentId, LabelSpec, LabelText, NodeId, Point, Rect, Viewport};

use crate::hint::Hint;
use crate::selector;

/// Visible part of a document, in that document's viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Clip a document whose origin sits at `offset` in top-document
    /// coordinates against the top viewport. `None` when nothing is visible.
    pub fn clip(viewport: &Viewport, top: &Viewport, offset: Point) -> Option<Bounds> {
        let bounds = Bounds {
            min_x: (-offset.x).max(0.0),
            min_y: (-offset.y).max(0.0),
            max_x: viewport.width.min(top.width - offset.x),
            max_y: viewport.height.min(top.height - offset.y),
        };
        (bounds.min_x <= bounds.max_x && bounds.min_y <= bounds.max_y).then_some(bounds)
    }

    /// Edges touching the bounds count as visible.
    pub fn touches(&self, rect: &Rect) -> bool {
        !(rect.left > self.max_x
            || rect.right() < self.min_x
            || rect.top > self.max_y
            || rect.bottom() < self.min_y)
    }
}

/// Result of a discovery pass.
#[derive(Debug, Default)]
pub(crate) struct Discovery {
    pub hints: Vec<Hint>,
    pub overlay_roots: Vec<NodeId>,
}

/// State shared across the recursion: counter, dedup table and output.
struct Traversal<'a> {
    config: &'a HintsConfig,
    limit: usize,
    top: Viewport,
    next_number: u32,
    groups: HashMap<String, u32>,
    out: Discovery,
}

impl Traversal<'_> {
    fn is_full(&self) -> bool {
        self.out.hints.len() >= self.limit
    }

    /// Number for a new hint; anchors reuse the number of an earlier anchor
    /// with the same destination.
    fn assign_number(&mut self, href: Option<&str>) -> u32 {
        if let Some(number) = href.and_then(|h| self.groups.get(h)) {
            return *number;
        }
        let number = self.next_number;
        self.next_number += 1;
        if let Some(href) = href {
            self.groups.insert(href.to_string(), number);
        }
        number
    }
}

pub(crate) fn discover<D: Document + ?Sized>(doc: &mut D, config: &HintsConfig) -> Discovery {
    let top_doc = doc.top_document();
    let mut traversal = Traversal {
        config,
        limit: config.effective_max_hints(),
        top: doc.viewport(top_doc),
        next_number: 1,
        groups: HashMap::new(),
        out: Discovery::default(),
    };

    visit(doc, &mut traversal, top_doc, Point::default());

    debug!(
        hints = traversal.out.hints.len(),
        numbers = traversal.next_number - 1,
        documents = traversal.out.overlay_roots.len(),
        "Hint discovery finished"
    );
    traversal.out
}

fn visit<D: Document + ?Sized>(
    doc: &mut D,
    traversal: &mut Traversal<'_>,
    document: DocumentId,
    offset: Point,
) {
    let viewport = doc.viewport(document);
    let Some(bounds) = Bounds::clip(&viewport, &traversal.top, offset) else {
        trace!(doc = document.0, ?offset, "Document outside top viewport, skipped");
        return;
    };

    let root = doc.create_overlay_root(document);
    traversal.out.overlay_roots.push(root);

    let elements = doc.elements(document);
    for &node in &elements {
        if traversal.is_full() {
            debug!(limit = traversal.limit, "Hint limit reached");
            break;
        }
        if !selector::is_actionable(doc, node) {
            continue;
        }
        let Some(rect) = doc.bounding_rect(node) else {
            trace!(node = node.0, "No bounding rect, skipped");
            continue;
        };
        if !bounds.touches(&rect) {
            trace!(node = node.0, "Outside visible bounds, skipped");
            continue;
        }
        match doc.computed_style(node) {
            Some(style) if style.is_rendered() => {}
            _ => {
                trace!(node = node.0, "Not rendered, skipped");
                continue;
            }
        }

        let position = Point::new(
            rect.left.max(0.0) + viewport.scroll_x,
            rect.top.max(0.0) + viewport.scroll_y,
        );

        let href = if selector::is_anchor(doc, node) {
            let base = doc.base_url(document);
            doc.attribute(node, "href")
                .map(|raw| selector::resolve_href(base.as_deref(), &raw))
        } else {
            None
        };
        let number = traversal.assign_number(href.as_deref());

        let label = doc.create_label(
            root,
            &LabelSpec {
                text: LabelText::plain(number),
                position,
                style: &traversal.config.label_style,
            },
        );
        trace!(node = node.0, number, x = position.x, y = position.y, "Hint labelled");

        traversal.out.hints.push(Hint {
            element: node,
            document,
            number,
            label,
            href,
        });
    }

    for tag in ["frame", "iframe"] {
        for &node in &elements {
            if traversal.is_full() {
                return;
            }
            if !doc.tag_name(node).eq_ignore_ascii_case(tag) {
                continue;
            }
            let Some(content) = doc.content_document(node) else {
                continue;
            };
            let Some(rect) = doc.bounding_rect(node) else {
                continue;
            };
            if !bounds.touches(&rect) {
                continue;
            }
            visit(
                doc,
                traversal,
                content,
                Point::new(offset.x + rect.left, offset.y + rect.top),
            );
        }
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
