//! A single named, typed settings option.

use egui::{Checkbox, DragValue, TextEdit, Ui};

use crate::error::EditorError;
use crate::widgets::Knob;

/// How an option is represented and edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// Plain numeric entry.
    NumberRaw,
    /// Numeric value edited with a rotary knob.
    NumberKnob,
    /// Free text.
    Text,
    /// On/off checkbox.
    Boolean,
    /// Declared but unimplemented; creating one fails with
    /// `UnsupportedKind`.
    Select,
}

/// A typed option value.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    Number(f32),
    Text(String),
    Bool(bool),
}

impl OptionValue {
    /// The shape name used in mismatch errors.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Bool(_) => "boolean",
        }
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

fn expected_shape(kind: OptionKind) -> &'static str {
    match kind {
        OptionKind::NumberRaw | OptionKind::NumberKnob => "number",
        OptionKind::Text => "text",
        OptionKind::Boolean => "boolean",
        OptionKind::Select => "select",
    }
}

fn accepts(kind: OptionKind, value: &OptionValue) -> bool {
    matches!(
        (kind, value),
        (OptionKind::NumberRaw, OptionValue::Number(_))
            | (OptionKind::NumberKnob, OptionValue::Number(_))
            | (OptionKind::Text, OptionValue::Text(_))
            | (OptionKind::Boolean, OptionValue::Bool(_))
    )
}

/// A named, typed, independently gettable/settable option.
#[derive(Debug)]
pub struct SettingsOption {
    id: String,
    kind: OptionKind,
    label: String,
    value: OptionValue,
    /// Numeric edit range for number kinds.
    range: (f32, f32),
}

impl SettingsOption {
    pub(super) fn new(
        id: impl Into<String>,
        kind: OptionKind,
        label: impl Into<String>,
        default: OptionValue,
    ) -> Result<Self, EditorError> {
        if kind == OptionKind::Select {
            return Err(EditorError::UnsupportedKind("select".to_string()));
        }
        if !accepts(kind, &default) {
            return Err(EditorError::KindMismatch {
                expected: expected_shape(kind),
                found: default.shape(),
            });
        }
        Ok(Self {
            id: id.into(),
            kind,
            label: label.into(),
            value: default,
            range: (0.0, 10.0),
        })
    }

    /// Registry-unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The option's representation kind.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current value.
    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    /// Replaces the value.
    ///
    /// A value whose shape does not match the option kind fails with
    /// `KindMismatch` and leaves the stored value unchanged.
    pub fn set_value(&mut self, value: OptionValue) -> Result<(), EditorError> {
        if !accepts(self.kind, &value) {
            return Err(EditorError::KindMismatch {
                expected: expected_shape(self.kind),
                found: value.shape(),
            });
        }
        self.value = value;
        Ok(())
    }

    /// Sets the numeric edit range used by number kinds.
    pub fn set_range(&mut self, min: f32, max: f32) -> &mut Self {
        self.range = (min, max);
        self
    }

    /// Renders one labelled row for this option.
    pub fn show(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.label);
            let (min, max) = self.range;
            match (&mut self.value, self.kind) {
                (OptionValue::Number(v), OptionKind::NumberKnob) => {
                    ui.add(Knob::new(v, min..=max));
                }
                (OptionValue::Number(v), _) => {
                    ui.add(DragValue::new(v).range(min..=max).speed((max - min) / 200.0));
                }
                (OptionValue::Bool(v), _) => {
                    ui.add(Checkbox::without_text(v));
                }
                (OptionValue::Text(v), _) => {
                    ui.add(TextEdit::singleline(v).desired_width(120.0));
                }
            }
        });
    }
}
