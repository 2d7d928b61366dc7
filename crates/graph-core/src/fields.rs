// File: crates/graph-core/src/fields.rs
// Summary: Field model; live expression slots for the selected plot mode.

use serde::Serialize;

use crate::error::{FieldError, ParseError};
use crate::expr::ExpressionCompiler;
use crate::mode::PlotMode;
use crate::result::PlotResult;
use crate::sampler::{PlotSampler, SlotTexts};

/// One user-editable expression field with its current text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpressionSlot {
    pub id: &'static str,
    pub label: &'static str,
    pub text: String,
    pub default: &'static str,
}

/// Active mode plus its live slots. Selecting a mode rebuilds the slots from defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldModel {
    mode: PlotMode,
    slots: Vec<ExpressionSlot>,
}

impl Default for FieldModel {
    fn default() -> Self {
        Self::new(PlotMode::default())
    }
}

impl FieldModel {
    pub fn new(mode: PlotMode) -> Self {
        Self {
            mode,
            slots: build_slots(mode),
        }
    }

    pub fn mode(&self) -> PlotMode {
        self.mode
    }

    pub fn slots(&self) -> &[ExpressionSlot] {
        &self.slots
    }

    /// Switch modes. Edited text is discarded, even when re-selecting the current mode.
    pub fn select_mode(&mut self, mode: PlotMode) {
        self.mode = mode;
        self.slots = build_slots(mode);
    }

    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> Result<(), FieldError> {
        let mode = self.mode;
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| FieldError::UnknownSlot {
                mode,
                slot: id.to_string(),
            })?;
        slot.text = text.into();
        Ok(())
    }

    /// Live text of slot `id`, or an empty string when the active mode has no such slot.
    pub fn value(&self, id: &str) -> &str {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .map_or("", |s| s.text.as_str())
    }

    /// Snapshot of the live texts, in the shape the sampler takes.
    pub fn expressions(&self) -> SlotTexts {
        self.slots.iter().map(|s| (s.id, s.text.as_str())).collect()
    }

    pub fn plot<C: ExpressionCompiler>(
        &self,
        sampler: &PlotSampler<C>,
    ) -> Result<PlotResult, ParseError> {
        sampler.sample(self.mode, &self.expressions())
    }
}

fn build_slots(mode: PlotMode) -> Vec<ExpressionSlot> {
    mode.slots()
        .iter()
        .map(|t| ExpressionSlot {
            id: t.id,
            label: t.label,
            text: t.default.to_string(),
            default: t.default,
        })
        .collect()
}
