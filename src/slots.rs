//! Growing ingredient input list.
//!
//! The list of input slots is an explicit value: a pass resolves every slot
//! and, only when the last one is accepted, returns the list with one extra
//! empty slot for the next ingredient. Re-running a pass on its own output
//! changes nothing.

use crate::ingredient_set::IngredientSet;
use crate::matcher::MatchResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Nothing typed yet
    #[default]
    Empty,
    /// Resolved to a canonical ingredient
    Valid,
    /// Text present but not accepted (possibly with a suggestion)
    Invalid,
}

/// One evaluated slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub text: String,
    pub result: MatchResult,
}

impl SlotView {
    pub fn status(&self) -> SlotStatus {
        if self.text.trim().is_empty() {
            SlotStatus::Empty
        } else if self.result.is_accepted() {
            SlotStatus::Valid
        } else {
            SlotStatus::Invalid
        }
    }
}

/// Result of [`evaluate_slots`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotPass {
    pub slots: Vec<SlotView>,
    /// Whether this pass appended the trailing empty slot
    pub appended: bool,
}

impl SlotPass {
    /// Slot texts, suitable as input for the next pass
    pub fn texts(&self) -> Vec<String> {
        self.slots.iter().map(|slot| slot.text.clone()).collect()
    }

    /// Canonical ingredients of the accepted slots, in slot order
    pub fn ingredients(&self) -> IngredientSet {
        self.slots
            .iter()
            .filter_map(|slot| slot.result.canonical())
            .collect()
    }
}

/// Resolve every slot and grow the list when the last one is accepted.
///
/// An empty list is treated as a single empty slot.
pub fn evaluate_slots<S: AsRef<str>>(
    texts: &[S],
    resolve: &dyn Fn(&str) -> MatchResult,
) -> SlotPass {
    let mut slots: Vec<SlotView> = texts
        .iter()
        .map(|text| {
            let text = text.as_ref();
            SlotView {
                text: text.to_string(),
                result: resolve(text),
            }
        })
        .collect();

    if slots.is_empty() {
        slots.push(empty_slot());
    }

    let appended = slots
        .last()
        .is_some_and(|last| last.status() == SlotStatus::Valid);
    if appended {
        slots.push(empty_slot());
    }

    SlotPass { slots, appended }
}

/// Append one empty slot unconditionally
pub fn add_slot(texts: &[String]) -> Vec<String> {
    let mut grown = texts.to_vec();
    grown.push(String::new());
    grown
}

fn empty_slot() -> SlotView {
    SlotView {
        text: String::new(),
        result: MatchResult::Rejected,
    }
}
