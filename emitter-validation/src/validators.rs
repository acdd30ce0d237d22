// Built-in validators

use crate::ValidationError;
use serde_json::Value;
use std::fmt;

/// JSON value kinds understood by the schema validators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// String validators

/// Validates that a string has at least one character
///
/// Whitespace counts: `" "` is accepted.
pub struct NotEmpty;

impl NotEmpty {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            Err(
                ValidationError::new(field, format!("{} should not be empty", field))
                    .with_constraint("notEmpty"),
            )
        } else {
            Ok(())
        }
    }
}

// Value validators

/// Validates that a JSON value has the expected kind
pub struct OfKind(pub ValueKind);

impl OfKind {
    pub fn validate(&self, value: &Value, field: &str) -> Result<(), ValidationError> {
        let actual = ValueKind::of(value);
        if actual == self.0 {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("{} must be a {}, received {}", field, self.0, actual),
            )
            .with_constraint(format!("is{}", capitalize(self.0.as_str())))
            .with_value(actual.as_str()))
        }
    }
}

/// Validates that a JSON value is a boolean
pub struct IsBoolean;

impl IsBoolean {
    pub fn validate(value: &Value, field: &str) -> Result<(), ValidationError> {
        OfKind(ValueKind::Boolean).validate(value, field)
    }
}

/// Validates that a JSON value is a non-empty string
pub struct IsNonEmptyString;

impl IsNonEmptyString {
    pub fn validate(value: &Value, field: &str) -> Result<(), ValidationError> {
        match value {
            Value::String(s) => NotEmpty::validate(s, field),
            other => OfKind(ValueKind::String).validate(other, field),
        }
    }
}

// Collection validators

/// Validates a minimum number of items
pub struct MinItems(pub usize);

impl MinItems {
    pub fn validate(&self, len: usize, field: &str) -> Result<(), ValidationError> {
        if len < self.0 {
            Err(ValidationError::new(
                field,
                format!("{} must contain at least {} item(s)", field, self.0),
            )
            .with_constraint("minItems")
            .with_value(len.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Validates that no two items are the same under `same`
pub struct NoDuplicates;

impl NoDuplicates {
    pub fn validate_by<T, F>(items: &[T], same: F, field: &str) -> Result<(), ValidationError>
    where
        F: Fn(&T, &T) -> bool,
    {
        for (i, item) in items.iter().enumerate() {
            if let Some(offset) = items[i + 1..].iter().position(|other| same(item, other)) {
                return Err(ValidationError::new(
                    field,
                    format!("{} contains a duplicate entry", field),
                )
                .with_constraint("noDuplicates")
                .with_value(format!("{} and {}", i, i + 1 + offset)));
            }
        }
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
