//! Serializable page snapshot types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use keyhint_protocols::{ComputedStyle, Rect, Viewport};

use crate::error::SnapshotError;

/// One document: viewport, base URL and its elements in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Base URL for resolving relative links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub viewport: Viewport,

    #[serde(default)]
    pub elements: Vec<ElementSnapshot>,
}

impl PageSnapshot {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            url: None,
            viewport,
            elements: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn element(mut self, element: ElementSnapshot) -> Self {
        self.elements.push(element);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: PageSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Only frame elements may carry a content document.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for (index, element) in self.elements.iter().enumerate() {
            if let Some(ref content) = element.content {
                if !element.is_frame() {
                    return Err(SnapshotError::InvalidSnapshot(format!(
                        "element {} <{}> has a content document but is not a frame",
                        index, element.tag
                    )));
                }
                content.validate()?;
            }
        }
        Ok(())
    }
}

/// One element of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub tag: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Bounding rect relative to the document viewport; `None` when not laid out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,

    /// Computed style; `None` when it cannot be resolved.
    #[serde(default = "default_style")]
    pub style: Option<ComputedStyle>,

    /// Content document of a frame element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Box<PageSnapshot>>,
}

fn default_style() -> Option<ComputedStyle> {
    Some(ComputedStyle::default())
}

impl ElementSnapshot {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            rect: None,
            style: default_style(),
            content: None,
        }
    }

    /// An anchor pointing at `href`.
    pub fn link(href: impl Into<String>) -> Self {
        Self::new("a").attr("href", href)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn at(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.rect = Some(Rect::new(left, top, width, height));
        self
    }

    pub fn style(mut self, display: &str, visibility: &str) -> Self {
        self.style = Some(ComputedStyle {
            display: display.to_string(),
            visibility: visibility.to_string(),
        });
        self
    }

    pub fn without_style(mut self) -> Self {
        self.style = None;
        self
    }

    pub fn content(mut self, page: PageSnapshot) -> Self {
        self.content = Some(Box::new(page));
        self
    }

    pub fn is_frame(&self) -> bool {
        let tag = self.tag.to_ascii_lowercase();
        tag == "frame" || tag == "iframe"
    }
}
