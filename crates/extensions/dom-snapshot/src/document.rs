//! SnapshotDocument: a live tree built from a PageSnapshot.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use keyhint_protocols::{
    ComputedStyle, Document, DocumentId, LabelSpec, LabelText, NodeId, Point, Rect, Viewport,
};

use crate::error::SnapshotError;
use crate::snapshot::PageSnapshot;

/// Side effect of an engine action, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    Focus { node: NodeId },
    /// `target` is the element's `target` attribute at the moment of the click.
    Click { node: NodeId, target: Option<String> },
    SetAttribute { node: NodeId, name: String, value: String },
    RemoveAttribute { node: NodeId, name: String },
}

/// Read-only view of a label node.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelView {
    pub node: NodeId,
    pub document: DocumentId,
    pub text: LabelText,
    pub position: Point,
    pub visible: bool,
    pub attached: bool,
    pub css: String,
}

#[derive(Debug)]
enum NodeKind {
    Element,
    OverlayRoot,
    Label {
        text: LabelText,
        position: Point,
        visible: bool,
        css: String,
    },
}

#[derive(Debug)]
struct NodeData {
    document: DocumentId,
    tag: String,
    attributes: BTreeMap<String, String>,
    rect: Option<Rect>,
    style: Option<ComputedStyle>,
    content: Option<DocumentId>,
    parent: Option<NodeId>,
    alive: bool,
    kind: NodeKind,
}

#[derive(Debug)]
struct DocumentData {
    url: Option<String>,
    viewport: Viewport,
    root: NodeId,
    elements: Vec<NodeId>,
}

/// In-memory document tree implementing [`Document`].
#[derive(Debug)]
pub struct SnapshotDocument {
    documents: Vec<DocumentData>,
    nodes: Vec<NodeData>,
    effects: Vec<Effect>,
}

impl SnapshotDocument {
    /// Build a live tree; the snapshot becomes the top document.
    pub fn new(snapshot: PageSnapshot) -> Self {
        let mut tree = Self {
            documents: Vec::new(),
            nodes: Vec::new(),
            effects: Vec::new(),
        };
        tree.add_document(snapshot);
        debug!(
            documents = tree.documents.len(),
            nodes = tree.nodes.len(),
            "Built snapshot document"
        );
        tree
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(Self::new(PageSnapshot::from_json(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn add_document(&mut self, snapshot: PageSnapshot) -> DocumentId {
        let doc_id = DocumentId(self.documents.len() as u64);
        let root = self.push_node(NodeData {
            document: doc_id,
            tag: "html".to_string(),
            attributes: BTreeMap::new(),
            rect: None,
            style: None,
            content: None,
            parent: None,
            alive: true,
            kind: NodeKind::Element,
        });
        self.documents.push(DocumentData {
            url: snapshot.url,
            viewport: snapshot.viewport,
            root,
            elements: Vec::new(),
        });

        for element in snapshot.elements {
            let content = element.content.map(|page| self.add_document(*page));
            let node = self.push_node(NodeData {
                document: doc_id,
                tag: element.tag,
                attributes: element.attributes,
                rect: element.rect,
                style: element.style,
                content,
                parent: Some(root),
                alive: true,
                kind: NodeKind::Element,
            });
            self.documents[doc_id.0 as usize].elements.push(node);
        }

        doc_id
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(data);
        id
    }

    fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0 as usize)
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0 as usize)
    }

    /// Number of documents, top document included.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Page elements of a document (overlay nodes excluded).
    pub fn element_ids(&self, doc: DocumentId) -> Vec<NodeId> {
        self.documents
            .get(doc.0 as usize)
            .map(|d| d.elements.clone())
            .unwrap_or_default()
    }

    /// First page element, across all documents, whose attribute equals `value`.
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        self.documents
            .iter()
            .flat_map(|d| d.elements.iter().copied())
            .find(|&id| {
                self.node(id)
                    .and_then(|n| n.attributes.get(name))
                    .is_some_and(|v| v == value)
            })
    }

    /// Remove a node from the tree, as a script on the page would.
    pub fn remove_node(&mut self, node: NodeId) {
        if let Some(data) = self.node_mut(node) {
            data.alive = false;
            data.parent = None;
        }
    }

    pub fn label(&self, node: NodeId) -> Option<LabelView> {
        let data = self.node(node)?;
        match &data.kind {
            NodeKind::Label {
                text,
                position,
                visible,
                css,
            } => Some(LabelView {
                node,
                document: data.document,
                text: text.clone(),
                position: *position,
                visible: *visible,
                attached: data.parent.is_some(),
                css: css.clone(),
            }),
            _ => None,
        }
    }

    /// Labels still attached to an overlay root, in creation order.
    pub fn attached_labels(&self) -> Vec<LabelView> {
        (0..self.nodes.len() as u64)
            .filter_map(|i| self.label(NodeId(i)))
            .filter(|label| label.attached)
            .collect()
    }

    /// Overlay roots still attached to their document.
    pub fn attached_overlay_roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::OverlayRoot) && n.parent.is_some())
            .map(|(i, _)| NodeId(i as u64))
            .collect()
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Short human-readable description, e.g. `<a href="/docs">`.
    pub fn describe(&self, node: NodeId) -> String {
        match self.node(node) {
            Some(data) => {
                let attrs: Vec<String> = data
                    .attributes
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, v))
                    .collect();
                if attrs.is_empty() {
                    format!("<{}>", data.tag)
                } else {
                    format!("<{} {}>", data.tag, attrs.join(" "))
                }
            }
            None => format!("<unknown #{}>", node.0),
        }
    }
}

impl Document for SnapshotDocument {
    fn top_document(&self) -> DocumentId {
        DocumentId(0)
    }

    fn viewport(&self, doc: DocumentId) -> Viewport {
        self.documents
            .get(doc.0 as usize)
            .map(|d| d.viewport)
            .unwrap_or_default()
    }

    fn base_url(&self, doc: DocumentId) -> Option<String> {
        self.documents.get(doc.0 as usize)?.url.clone()
    }

    fn elements(&self, doc: DocumentId) -> Vec<NodeId> {
        self.element_ids(doc)
            .into_iter()
            .filter(|&id| self.is_alive(id))
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.node(node).map(|n| n.tag.clone()).unwrap_or_default()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node)?.attributes.get(name).cloned()
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.node(node)?.rect
    }

    fn computed_style(&self, node: NodeId) -> Option<ComputedStyle> {
        self.node(node)?.style.clone()
    }

    fn content_document(&self, node: NodeId) -> Option<DocumentId> {
        self.node(node)?.content
    }

    fn is_alive(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.alive)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn create_overlay_root(&mut self, doc: DocumentId) -> NodeId {
        let root = self.documents.get(doc.0 as usize).map(|d| d.root);
        if root.is_none() {
            warn!(doc = doc.0, "Overlay root requested for unknown document");
        }
        self.push_node(NodeData {
            document: doc,
            tag: "div".to_string(),
            attributes: BTreeMap::new(),
            rect: None,
            style: None,
            content: None,
            parent: root,
            alive: true,
            kind: NodeKind::OverlayRoot,
        })
    }

    fn create_label(&mut self, root: NodeId, spec: &LabelSpec<'_>) -> NodeId {
        let document = self.node(root).map(|n| n.document).unwrap_or(DocumentId(0));
        self.push_node(NodeData {
            document,
            tag: "span".to_string(),
            attributes: BTreeMap::new(),
            rect: None,
            style: None,
            content: None,
            parent: Some(root),
            alive: true,
            kind: NodeKind::Label {
                text: spec.text.clone(),
                position: spec.position,
                visible: true,
                css: spec.style.to_css(),
            },
        })
    }

    fn set_label_text(&mut self, label: NodeId, new_text: &LabelText) {
        if let Some(NodeKind::Label { text, .. }) = self.node_mut(label).map(|n| &mut n.kind) {
            *text = new_text.clone();
        }
    }

    fn set_label_visible(&mut self, label: NodeId, now_visible: bool) {
        if let Some(NodeKind::Label { visible, .. }) = self.node_mut(label).map(|n| &mut n.kind) {
            *visible = now_visible;
        }
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        match self.node_mut(child) {
            Some(data) if data.parent == Some(parent) => data.parent = None,
            _ => warn!(parent = parent.0, child = child.0, "remove_child on a non-child node"),
        }
    }

    fn focus(&mut self, node: NodeId) {
        self.effects.push(Effect::Focus { node });
    }

    fn click(&mut self, node: NodeId) {
        let target = self.attribute(node, "target");
        self.effects.push(Effect::Click { node, target });
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            data.attributes.insert(name.to_string(), value.to_string());
        }
        self.effects.push(Effect::SetAttribute {
            node,
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.node_mut(node) {
            data.attributes.remove(name);
        }
        self.effects.push(Effect::RemoveAttribute {
            node,
            name: name.to_string(),
        });
    }
}
