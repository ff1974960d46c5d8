//! HintEngine: digit matching, activation and teardown.

use tracing::{debug, info, warn};

use keyhint_config::HintsConfig;
use keyhint_protocols::{Document, LabelText, ModeSignal, NodeId};

use crate::discovery;
use crate::hint::Hint;
use crate::selector::{self, ElementRole};

/// Matching state, derived from the typed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// No digits typed; every label shows its full number.
    Idle,
    /// Digits typed; only labels starting with them are shown.
    Matching,
}

/// One activation of hint mode on one document tree.
///
/// Created by [`HintEngine::install`], which draws the overlay. The engine
/// does not own the document: every operation borrows it from the host.
#[derive(Debug)]
pub struct HintEngine {
    hints: Vec<Hint>,
    overlay_roots: Vec<NodeId>,
    sequence: u64,
    open_to_new_tab: bool,
    installed: bool,
    previous: Option<Box<HintEngine>>,
}

impl HintEngine {
    /// Discover actionable elements and draw their labels.
    pub fn install<D: Document + ?Sized>(doc: &mut D, config: &HintsConfig) -> Self {
        let discovery = discovery::discover(doc, config);
        debug!(hints = discovery.hints.len(), "Hint mode installed");
        Self {
            hints: discovery.hints,
            overlay_roots: discovery.overlay_roots,
            sequence: 0,
            open_to_new_tab: config.open_in_new_tab,
            installed: true,
            previous: None,
        }
    }

    pub(crate) fn with_previous(mut self, previous: Option<HintEngine>) -> Self {
        self.previous = previous.map(Box::new);
        self
    }

    pub(crate) fn take_previous(&mut self) -> Option<HintEngine> {
        self.previous.take().map(|boxed| *boxed)
    }

    pub(crate) fn previous(&self) -> Option<&HintEngine> {
        self.previous.as_deref()
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn state(&self) -> MatchState {
        if self.sequence == 0 {
            MatchState::Idle
        } else {
            MatchState::Matching
        }
    }

    /// False once the overlay has been torn down.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn open_to_new_tab(&self) -> bool {
        self.open_to_new_tab
    }

    /// Hints whose number starts with the typed sequence; all hints when idle.
    pub fn matches(&self) -> Vec<&Hint> {
        if self.sequence == 0 {
            return self.hints.iter().collect();
        }
        let typed = self.sequence.to_string();
        self.hints
            .iter()
            .filter(|hint| hint.matches_prefix(&typed))
            .collect()
    }

    /// Append a digit; activates the hint if it is the only one left.
    pub fn add_digit<D: Document + ?Sized>(&mut self, doc: &mut D, digit: u32) -> ModeSignal {
        if !self.installed || digit > 9 {
            return ModeSignal::Ignore;
        }
        let Some(sequence) = self
            .sequence
            .checked_mul(10)
            .and_then(|s| s.checked_add(u64::from(digit)))
        else {
            return ModeSignal::Ignore;
        };
        self.sequence = sequence;

        let typed = sequence.to_string();
        let matching: Vec<usize> = self
            .hints
            .iter()
            .enumerate()
            .filter(|(_, hint)| hint.matches_prefix(&typed))
            .map(|(index, _)| index)
            .take(2)
            .collect();

        if let [index] = matching.as_slice() {
            let signal = self.activate(doc, *index);
            if !self.installed {
                return signal;
            }
        }
        self.render(doc);
        ModeSignal::Ignore
    }

    /// Like [`add_digit`](Self::add_digit), for a typed character.
    pub fn add_char<D: Document + ?Sized>(&mut self, doc: &mut D, c: char) -> ModeSignal {
        match c.to_digit(10) {
            Some(digit) => self.add_digit(doc, digit),
            None => ModeSignal::Ignore,
        }
    }

    /// Drop the last digit and show the labels matching what is left.
    pub fn remove_digit<D: Document + ?Sized>(&mut self, doc: &mut D) {
        if self.sequence == 0 {
            return;
        }
        self.sequence /= 10;
        self.render(doc);
    }

    /// Activate the first hint whose number equals the typed sequence,
    /// even when longer numbers share it as a prefix.
    pub fn activate_current_match<D: Document + ?Sized>(&mut self, doc: &mut D) -> ModeSignal {
        if self.sequence == 0 {
            return ModeSignal::Ignore;
        }
        let typed = self.sequence.to_string();
        match self.hints.iter().position(|hint| hint.matches_exactly(&typed)) {
            Some(index) => self.activate(doc, index),
            None => ModeSignal::Ignore,
        }
    }

    /// Open activated links in a new browsing context. Cannot be unset.
    pub fn set_open_to_new_tab(&mut self) {
        self.open_to_new_tab = true;
    }

    /// Remove all labels and overlay roots. Safe to call repeatedly.
    pub fn uninstall<D: Document + ?Sized>(&mut self, doc: &mut D) {
        for hint in self.hints.drain(..) {
            if let Some(parent) = doc.parent(hint.label) {
                doc.remove_child(parent, hint.label);
            }
        }
        for root in self.overlay_roots.drain(..) {
            match doc.parent(root) {
                Some(parent) => doc.remove_child(parent, root),
                None => warn!(root = root.0, "Overlay root already detached"),
            }
        }
        if self.installed {
            debug!("Hint mode uninstalled");
        }
        self.sequence = 0;
        self.installed = false;
    }

    fn render<D: Document + ?Sized>(&self, doc: &mut D) {
        if self.sequence == 0 {
            for hint in &self.hints {
                doc.set_label_text(hint.label, &LabelText::plain(hint.number));
                doc.set_label_visible(hint.label, true);
            }
            return;
        }

        let typed = self.sequence.to_string();
        for hint in &self.hints {
            if hint.matches_prefix(&typed) {
                doc.set_label_text(hint.label, &LabelText::highlighted(hint.number, typed.len()));
                doc.set_label_visible(hint.label, true);
            } else {
                doc.set_label_visible(hint.label, false);
            }
        }
    }

    /// Tears the overlay down before acting on the element. The slot puts the
    /// saved engine back only after this returns; the host cannot observe
    /// the slot while it is mutably borrowed, so the order makes no difference.
    fn activate<D: Document + ?Sized>(&mut self, doc: &mut D, index: usize) -> ModeSignal {
        let Some(hint) = self.hints.get(index) else {
            return ModeSignal::Ignore;
        };
        let element = hint.element;
        let number = hint.number;
        if !doc.is_alive(element) {
            debug!(number, "Hint element no longer in the document");
            return ModeSignal::Ignore;
        }

        self.uninstall(doc);

        let role = selector::role(doc, element);
        info!(number, ?role, new_tab = self.open_to_new_tab, "Activating hint");
        match role {
            ElementRole::TextEntry => {
                doc.focus(element);
                ModeSignal::Insert
            }
            ElementRole::Frame => {
                doc.focus(element);
                ModeSignal::Normal
            }
            ElementRole::Pressable => {
                if self.open_to_new_tab {
                    click_in_new_context(doc, element);
                } else {
                    doc.click(element);
                }
                ModeSignal::Normal
            }
        }
    }
}

/// Click with `target="_blank"`, then put `target` back exactly as it was.
fn click_in_new_context<D: Document + ?Sized>(doc: &mut D, element: NodeId) {
    let previous = doc.attribute(element, "target");
    doc.set_attribute(element, "target", "_blank");
    doc.click(element);
    match previous {
        Some(value) => doc.set_attribute(element, "target", &value),
        None => doc.remove_attribute(element, "target"),
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
