// Object schema builder

use crate::{OfKind, ValidationError, ValidationErrors, ValueKind};
use serde_json::Value;

#[derive(Debug, Clone)]
struct FieldRule {
    name: String,
    kind: ValueKind,
    required: bool,
}

/// Declarative shape check for a JSON object
///
/// # Examples
///
/// ```
/// use emitter_validation::{ObjectSchema, ValueKind};
/// use serde_json::json;
///
/// let schema = ObjectSchema::strict("config")
///     .optional("logging", ValueKind::Boolean)
///     .nullish();
///
/// assert!(schema.validate(None).is_ok());
/// assert!(schema.validate(Some(&json!({"logging": true}))).is_ok());
/// assert!(schema.validate(Some(&json!({"verbose": true}))).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    name: String,
    fields: Vec<FieldRule>,
    strict: bool,
    nullish: bool,
}

impl ObjectSchema {
    /// Schema that ignores keys it does not declare
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            strict: false,
            nullish: false,
        }
    }

    /// Schema that rejects keys it does not declare
    pub fn strict(name: impl Into<String>) -> Self {
        Self {
            strict: true,
            ..Self::new(name)
        }
    }

    /// Declare a field that must be present
    pub fn required(self, field: impl Into<String>, kind: ValueKind) -> Self {
        self.field(field, kind, true)
    }

    /// Declare a field that may be omitted
    pub fn optional(self, field: impl Into<String>, kind: ValueKind) -> Self {
        self.field(field, kind, false)
    }

    /// Accept an absent value or JSON `null` in place of the object
    pub fn nullish(mut self) -> Self {
        self.nullish = true;
        self
    }

    fn field(mut self, field: impl Into<String>, kind: ValueKind, required: bool) -> Self {
        self.fields.push(FieldRule {
            name: field.into(),
            kind,
            required,
        });
        self
    }

    /// Names of the declared fields, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Validate a value, collecting every violation
    pub fn validate(&self, value: Option<&Value>) -> Result<(), ValidationErrors> {
        let map = match value {
            None | Some(Value::Null) if self.nullish => return Ok(()),
            Some(Value::Object(map)) => map,
            other => {
                let received = other.map(ValueKind::of).unwrap_or(ValueKind::Null);
                return Err(ValidationError::new(
                    self.name.as_str(),
                    format!("{} must be an object, received {}", self.name, received),
                )
                .with_constraint("isObject")
                .with_value(received.as_str())
                .into());
            }
        };

        let mut errors = ValidationErrors::default();

        for rule in &self.fields {
            match map.get(&rule.name) {
                Some(value) => {
                    if let Err(e) = OfKind(rule.kind).validate(value, &rule.name) {
                        errors.add(e);
                    }
                }
                None if rule.required => errors.add(
                    ValidationError::new(rule.name.as_str(), format!("{} is required", rule.name))
                        .with_constraint("required"),
                ),
                None => {}
            }
        }

        if self.strict {
            for key in map.keys() {
                if !self.fields.iter().any(|f| &f.name == key) {
                    errors.add(
                        ValidationError::new(
                            key.as_str(),
                            format!("unrecognized key in {}: {}", self.name, key),
                        )
                        .with_constraint("strict"),
                    );
                }
            }
        }

        errors.into_result()
    }
}
