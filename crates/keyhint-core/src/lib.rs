//! # keyhint Core
//!
//! The hint overlay engine.
//!
//! ## Flow
//!
//! ```text
//! HintSlot::install ──► discovery ──► labels drawn, state Idle
//!        │
//!        ├─ add_digit / remove_digit ──► re-render (Matching / Idle)
//!        │        └─ single match ─────► activate
//!        ├─ activate_current_match ────► activate exact match
//!        └─ uninstall ─────────────────► teardown, previous handle restored
//! ```
//!
//! Activation always tears the overlay down before it focuses or clicks the
//! element, and returns a [`ModeSignal`] telling the host which mode to enter.

mod discovery;
mod engine;
mod hint;
pub mod selector;
mod slot;

pub use engine::{HintEngine, MatchState};
pub use hint::Hint;
pub use selector::ElementRole;
pub use slot::HintSlot;

pub use keyhint_protocols::{KeyInput, ModeSignal};
