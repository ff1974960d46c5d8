//! # keyhint Protocols
//!
//! Interface definitions shared by the hint engine and its hosts.
//! Contains only types and traits - no engine logic.
//!
//! ## Core Items
//!
//! - [`Document`] - the document tree a host exposes to the engine
//! - [`ModeSignal`] - what the host should do after a hint-mode event
//! - [`KeyInput`] - keys the host forwards while hint mode is active
//! - [`Rect`], [`Viewport`], [`Point`] - geometry in CSS pixels

pub mod document;
pub mod geometry;
pub mod mode;
pub mod style;

pub use document::{ComputedStyle, Document, DocumentId, LabelSpec, LabelText, NodeId};
pub use geometry::{Point, Rect, Viewport};
pub use mode::{KeyInput, ModeSignal, ParseModeSignalError};
pub use style::LabelStyle;
