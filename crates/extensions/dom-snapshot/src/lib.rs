//! In-memory document tree for the hint engine.
//!
//! A page is described by a [`PageSnapshot`]: viewport, base URL and a flat
//! list of elements in document order, where `frame`/`iframe` elements may
//! carry a nested snapshot of their content document. [`SnapshotDocument`]
//! turns a snapshot into a live tree implementing
//! [`keyhint_protocols::Document`], draws overlay nodes into it and records
//! every focus/click/attribute change as an [`Effect`].
//!
//! ## Snapshot format
//!
//! ```json
//! {
//!   "url": "https://example.com/",
//!   "viewport": { "width": 1280, "height": 720 },
//!   "elements": [
//!     { "tag": "a", "attributes": { "href": "/docs" },
//!       "rect": { "left": 10, "top": 10, "width": 80, "height": 16 } },
//!     { "tag": "iframe", "rect": { "left": 0, "top": 100, "width": 400, "height": 300 },
//!       "content": { "viewport": { "width": 400, "height": 300 }, "elements": [] } }
//!   ]
//! }
//! ```

mod document;
mod error;
mod snapshot;

pub use document::{Effect, LabelView, SnapshotDocument};
pub use error::SnapshotError;
pub use snapshot::{ElementSnapshot, PageSnapshot};

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
