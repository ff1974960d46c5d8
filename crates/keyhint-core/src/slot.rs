//! HintSlot: the single place the host reaches the active engine through.

use tracing::debug;

use keyhint_config::HintsConfig;
use keyhint_protocols::{Document, KeyInput, ModeSignal};

use crate::engine::HintEngine;

/// Holds the active [`HintEngine`], if any.
///
/// Installing while an engine is active stores the old one inside the new
/// one; when the new engine tears down (activation or cancel) the old one
/// becomes active again.
#[derive(Debug, Default)]
pub struct HintSlot {
    active: Option<HintEngine>,
}

impl HintSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run discovery and publish a new engine, saving the current one.
    pub fn install<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        config: &HintsConfig,
    ) -> &mut HintEngine {
        let previous = self.active.take();
        if previous.is_some() {
            debug!("Hint mode installed over an active engine");
        }
        let engine = HintEngine::install(doc, config).with_previous(previous);
        self.active.insert(engine)
    }

    pub fn active(&self) -> Option<&HintEngine> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Number of engines in the slot, saved ones included.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.active.as_ref(), |engine| engine.previous()).count()
    }

    pub fn add_digit<D: Document + ?Sized>(&mut self, doc: &mut D, digit: u32) -> ModeSignal {
        self.forward(|engine| engine.add_digit(doc, digit))
    }

    pub fn add_char<D: Document + ?Sized>(&mut self, doc: &mut D, c: char) -> ModeSignal {
        self.forward(|engine| engine.add_char(doc, c))
    }

    pub fn remove_digit<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.forward(|engine| engine.remove_digit(doc))
    }

    pub fn activate_current_match<D: Document + ?Sized>(&mut self, doc: &mut D) -> ModeSignal {
        self.forward(|engine| engine.activate_current_match(doc))
    }

    pub fn set_open_to_new_tab(&mut self) {
        self.forward(|engine| engine.set_open_to_new_tab())
    }

    /// Cancel hint mode: tear down the active engine and restore the saved one.
    pub fn uninstall<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.forward(|engine| engine.uninstall(doc))
    }

    /// Hint-mode key handling: digits narrow, Backspace widens, Enter
    /// commits an exact match, Escape cancels.
    pub fn handle_key<D: Document + ?Sized>(&mut self, doc: &mut D, key: KeyInput) -> ModeSignal {
        match key {
            KeyInput::Escape => {
                self.uninstall(doc);
                ModeSignal::Normal
            }
            KeyInput::Backspace => {
                self.remove_digit(doc);
                ModeSignal::Ignore
            }
            KeyInput::Enter => self.activate_current_match(doc),
            KeyInput::Char(c) => self.add_char(doc, c),
        }
    }

    fn forward<R: Default>(&mut self, f: impl FnOnce(&mut HintEngine) -> R) -> R {
        let Some(engine) = self.active.as_mut() else {
            debug!("No hint mode installed");
            return R::default();
        };
        let result = f(engine);
        if !engine.is_installed() {
            let restored = engine.take_previous();
            if restored.is_some() {
                debug!("Restoring previous hint engine");
            }
            self.active = restored;
        }
        result
    }
}
