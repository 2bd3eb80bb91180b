//! Retargetable parameter binding control.
//!
//! A `BindingControl` is bound to at most one external numeric handle at a
//! time and owns the two-way sync contract: binding copies the handle's
//! current value into the visible affordance immediately, edits write through
//! to the handle in the same operation, and rebinding tears the old
//! affordance down before the new one is built so no stale state survives.

use egui::{DragValue, Slider, Ui};

use crate::engine::ParamHandle;
use crate::error::EditorError;
use crate::widgets::Knob;

/// Visual representation of a bound parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    /// Rotary knob.
    Rotary,
    /// Horizontal slider.
    Slider,
    /// Numeric entry field.
    Field,
}

/// Whether an edit propagates to the bound external handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteThrough {
    /// Update the visible value and the external target together.
    Apply,
    /// Update only the visible value.
    Skip,
}

/// The built widget state behind a bound control.
///
/// Rebuilt from scratch on every rebind or kind switch; its `shown` value is
/// the value the user sees and edits.
#[derive(Clone, Copy, Debug)]
struct Affordance {
    kind: ControlKind,
    shown: f32,
}

/// A widget bound to exactly one external numeric handle at a time.
#[derive(Debug)]
pub struct BindingControl {
    label: String,
    kind: ControlKind,
    target: Option<ParamHandle>,
    target_property: String,
    affordance: Option<Affordance>,
    /// Bumped on every affordance teardown; salts the egui widget id so the
    /// toolkit drops per-widget state (drag offsets, text edit buffers) from
    /// the previous binding.
    generation: u64,
}

impl BindingControl {
    /// Creates an unbound control.
    pub fn new(label: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            label: label.into(),
            kind,
            target: None,
            target_property: String::new(),
            affordance: None,
            generation: 0,
        }
    }

    /// The display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// The current visual kind.
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    /// The property name this control addresses on its target.
    pub fn target_property(&self) -> &str {
        &self.target_property
    }

    /// True once a target handle is bound.
    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    /// How many times the affordance has been torn down and rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Binds (or rebinds) the control to an external handle.
    ///
    /// The previous affordance is torn down before the new one is built, and
    /// the handle's current value is copied into the new affordance
    /// immediately.
    pub fn set_influence(&mut self, target: ParamHandle, property: impl Into<String>) {
        self.teardown();
        let shown = target.get();
        self.affordance = Some(Affordance {
            kind: self.kind,
            shown,
        });
        self.target_property = property.into();
        self.target = Some(target);
    }

    /// Releases the bound handle. The control shows no value afterwards.
    pub fn clear_influence(&mut self) {
        self.teardown();
        self.target = None;
        self.target_property.clear();
    }

    /// Switches the visual kind.
    ///
    /// Always discards and rebuilds the affordance, even when the kind is
    /// unchanged; a rebuild is idempotent, not a no-op.
    pub fn set_control_kind(&mut self, kind: ControlKind) {
        self.kind = kind;
        self.teardown();
        if let Some(target) = &self.target {
            self.affordance = Some(Affordance {
                kind,
                shown: target.get(),
            });
        }
    }

    /// The value this control currently represents.
    ///
    /// Fails with `UnknownEntity` when unbound; an unbound control never
    /// dereferences a target.
    pub fn value(&self) -> Result<f32, EditorError> {
        match &self.affordance {
            Some(affordance) => Ok(affordance.shown),
            None => Err(EditorError::UnknownEntity(format!(
                "control '{}' is not bound",
                self.label
            ))),
        }
    }

    /// Writes a new value into the control.
    ///
    /// Updates the visible affordance and, unless suppressed, the external
    /// target in the same single assignment. Fails with `UnknownEntity` when
    /// unbound.
    pub fn set_value(&mut self, value: f32, write: WriteThrough) -> Result<(), EditorError> {
        let target = self.target.as_ref().ok_or_else(|| {
            EditorError::UnknownEntity(format!("control '{}' is not bound", self.label))
        })?;
        let shown = match write {
            WriteThrough::Apply => {
                target.set(value);
                target.get()
            }
            WriteThrough::Skip => target.spec().clamp(value),
        };
        if let Some(affordance) = &mut self.affordance {
            affordance.shown = shown;
        }
        Ok(())
    }

    fn teardown(&mut self) {
        self.affordance = None;
        self.generation += 1;
    }

    /// Renders the control as one labelled row. Edits write through.
    pub fn show(&mut self, ui: &mut Ui) {
        let salt = ("binding", self.label.clone(), self.generation);
        ui.push_id(salt, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.label);
                let Some(target) = self.target.clone() else {
                    ui.add_enabled(false, egui::Label::new("(unbound)"));
                    return;
                };
                let spec = *target.spec();
                let mut edited = match &self.affordance {
                    Some(affordance) => affordance.shown,
                    None => return,
                };
                let changed = match self.kind {
                    ControlKind::Rotary => ui
                        .add(Knob::new(&mut edited, spec.min..=spec.max))
                        .changed(),
                    ControlKind::Slider => ui
                        .add(Slider::new(&mut edited, spec.min..=spec.max))
                        .changed(),
                    ControlKind::Field => ui
                        .add(DragValue::new(&mut edited).range(spec.min..=spec.max))
                        .changed(),
                };
                if changed {
                    // Bound above, so this cannot fail.
                    let _ = self.set_value(edited, WriteThrough::Apply);
                }
            });
        });
    }
}
