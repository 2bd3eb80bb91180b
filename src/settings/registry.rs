//! Flat registry of named settings options.
//!
//! Options are looked up by id with a linear scan; id is the only key. The
//! error policy is intentionally asymmetric and must stay that way:
//! creating a duplicate id is a hard error, while reading a missing id is a
//! soft `None`.

use crate::error::EditorError;

use super::option::{OptionKind, OptionValue, SettingsOption};

/// A flat collection of independently gettable/settable options.
#[derive(Default)]
pub struct SettingsRegistry {
    options: Vec<SettingsOption>,
}

impl SettingsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// True when no options are registered.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Builds, registers, and returns a new option.
    ///
    /// A duplicate id fails with `DuplicateEntity`; an unimplemented kind
    /// (`Select`) with `UnsupportedKind`; a default whose shape does not
    /// match the kind with `KindMismatch`. Nothing is registered on failure.
    pub fn create(
        &mut self,
        id: impl Into<String>,
        kind: OptionKind,
        label: impl Into<String>,
        default: OptionValue,
    ) -> Result<&mut SettingsOption, EditorError> {
        let id = id.into();
        if self.get(&id).is_some() {
            return Err(EditorError::DuplicateEntity(format!("option '{}'", id)));
        }
        let option = SettingsOption::new(id, kind, label, default)?;
        self.options.push(option);
        // Just pushed, so the collection is non-empty.
        let index = self.options.len() - 1;
        Ok(&mut self.options[index])
    }

    /// Looks up an option by id. Missing ids yield `None`, never an error.
    pub fn get(&self, id: &str) -> Option<&SettingsOption> {
        self.options.iter().find(|option| option.id() == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut SettingsOption> {
        self.options.iter_mut().find(|option| option.id() == id)
    }

    /// The current value of an option, or `None` when absent.
    pub fn get_value(&self, id: &str) -> Option<&OptionValue> {
        self.get(id).map(SettingsOption::value)
    }

    /// Numeric shortcut for `get_value`.
    pub fn number(&self, id: &str) -> Option<f32> {
        self.get_value(id).and_then(OptionValue::as_number)
    }

    /// Boolean shortcut for `get_value`.
    pub fn boolean(&self, id: &str) -> Option<bool> {
        self.get_value(id).and_then(OptionValue::as_bool)
    }

    /// Replaces an option's value.
    ///
    /// Setting an absent id fails with `UnknownEntity`; a mismatched shape
    /// with `KindMismatch`.
    pub fn set_value(&mut self, id: &str, value: OptionValue) -> Result<(), EditorError> {
        self.get_mut(id)
            .ok_or_else(|| EditorError::UnknownEntity(format!("option '{}'", id)))?
            .set_value(value)
    }

    /// Iterates options in registration order for rendering.
    pub fn options_mut(&mut self) -> impl Iterator<Item = &mut SettingsOption> {
        self.options.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_get_value() {
        let mut registry = SettingsRegistry::new();
        registry
            .create(
                "vol",
                OptionKind::NumberRaw,
                "Volume",
                OptionValue::Number(3.0),
            )
            .unwrap();

        assert_eq!(registry.get_value("vol"), Some(&OptionValue::Number(3.0)));
        assert_eq!(registry.number("vol"), Some(3.0));
    }

    #[test]
    fn test_missing_get_is_soft_none() {
        let registry = SettingsRegistry::new();
        assert_eq!(registry.get_value("missing"), None);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_create_is_hard_error() {
        let mut registry = SettingsRegistry::new();
        registry
            .create(
                "vol",
                OptionKind::NumberRaw,
                "Volume",
                OptionValue::Number(3.0),
            )
            .unwrap();

        let err = registry
            .create(
                "vol",
                OptionKind::NumberKnob,
                "Volume again",
                OptionValue::Number(1.0),
            )
            .unwrap_err();
        assert!(matches!(err, EditorError::DuplicateEntity(_)));
        assert_eq!(registry.len(), 1);
        // The original registration survives untouched.
        assert_eq!(registry.number("vol"), Some(3.0));
    }

    #[test]
    fn test_failed_create_registers_nothing() {
        let mut registry = SettingsRegistry::new();
        let err = registry
            .create(
                "mode",
                OptionKind::Select,
                "Mode",
                OptionValue::Text("a".to_string()),
            )
            .unwrap_err();
        assert!(matches!(err, EditorError::UnsupportedKind(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_set_value_by_id() {
        let mut registry = SettingsRegistry::new();
        registry
            .create(
                "grid",
                OptionKind::Boolean,
                "Grid",
                OptionValue::Bool(false),
            )
            .unwrap();

        registry.set_value("grid", OptionValue::Bool(true)).unwrap();
        assert_eq!(registry.boolean("grid"), Some(true));

        let err = registry
            .set_value("missing", OptionValue::Bool(true))
            .unwrap_err();
        assert!(matches!(err, EditorError::UnknownEntity(_)));
    }

    #[test]
    fn test_lookup_is_order_independent() {
        let mut registry = SettingsRegistry::new();
        for (id, value) in [("a", 1.0), ("b", 2.0), ("c", 3.0)] {
            registry
                .create(id, OptionKind::NumberRaw, id, OptionValue::Number(value))
                .unwrap();
        }
        assert_eq!(registry.number("b"), Some(2.0));
        assert_eq!(registry.number("c"), Some(3.0));
        assert_eq!(registry.number("a"), Some(1.0));
    }
}
