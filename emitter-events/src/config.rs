//! Emitter configuration

use crate::error::{EmitterError, Result};
use emitter_validation::{ObjectSchema, Validate, ValidationError, ValidationErrors, ValueKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;

/// Environment variable read by [`EmitterConfig::from_env`].
pub const LOGGING_ENV: &str = "EVENT_EMITTER_LOGGING";

/// Construction options, fixed for the lifetime of an emitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmitterConfig {
    /// Enable diagnostics output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<bool>,
}

/// Shape accepted for untyped configuration input.
///
/// Only `logging` (boolean) is recognised; the whole value may be absent or
/// `null`.
pub fn schema() -> ObjectSchema {
    ObjectSchema::strict("config")
        .optional("logging", ValueKind::Boolean)
        .nullish()
}

impl EmitterConfig {
    /// Config with logging explicitly set
    pub fn with_logging(enabled: bool) -> Self {
        Self {
            logging: Some(enabled),
        }
    }

    /// Whether diagnostics are enabled. Absent means disabled.
    pub fn logging_enabled(&self) -> bool {
        self.logging.unwrap_or(false)
    }

    /// Validate and convert an untyped configuration value.
    pub fn from_value(value: Option<&Value>) -> Result<Self> {
        schema().validate(value).map_err(EmitterError::InvalidConfig)?;

        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| EmitterError::ConfigParse(e.to_string())),
        }
    }

    /// Parse configuration from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| EmitterError::ConfigParse(format!("JSON parse error: {}", e)))?;

        Self::from_value(Some(&value))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| EmitterError::ConfigParse(format!("TOML parse error: {}", e)))?;

        let value = serde_json::to_value(table).map_err(|e| {
            EmitterError::ConfigParse(format!("TOML to JSON conversion error: {}", e))
        })?;

        Self::from_value(Some(&value))
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `EVENT_EMITTER_LOGGING` accepts `1`, `0`, `true` or `false` (any case).
    /// Unset or empty leaves logging absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = match lookup(LOGGING_ENV) {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Self::default()),
        };

        let normalized = raw.trim().to_lowercase();
        let logging = match normalized.as_str() {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => {
                return Err(EmitterError::InvalidConfig(
                    ValidationError::new(LOGGING_ENV, format!("{} must be a boolean", LOGGING_ENV))
                        .with_constraint("isBoolean")
                        .with_value(raw)
                        .into(),
                ));
            }
        };

        Ok(Self::with_logging(logging))
    }
}

impl Validate for EmitterConfig {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let value = serde_json::to_value(self).map_err(|e| {
            ValidationErrors::from(ValidationError::new("config", e.to_string()))
        })?;
        schema().validate(Some(&value))
    }
}
