//! Event identifiers

use emitter_validation::{IsNonEmptyString, NotEmpty, Validate, ValidationError, ValidationErrors};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Opaque identity usable as an event identifier.
///
/// Tokens compare by identity: two tokens are equal only when one is a clone
/// of the other, regardless of their descriptions.
#[derive(Clone)]
pub struct Token {
    id: Uuid,
    description: Option<Arc<str>>,
}

impl Token {
    /// Create a new token with a description used only for display.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: Some(Arc::from(description.into())),
        }
    }

    /// Create a new token without a description.
    pub fn anonymous() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("id", &self.id)
            .field("description", &self.description())
            .finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.description().unwrap_or_default())
    }
}

/// Key that groups listeners: non-empty text or an opaque [`Token`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventId {
    Text(String),
    Token(Token),
}

impl EventId {
    /// Text value, if this is a text identifier.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EventId::Text(text) => Some(text),
            EventId::Token(_) => None,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, EventId::Token(_))
    }
}

impl Validate for EventId {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            EventId::Text(text) => Ok(NotEmpty::validate(text, "event")?),
            EventId::Token(_) => Ok(()),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Text(text) => f.write_str(text),
            EventId::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

impl From<&str> for EventId {
    fn from(text: &str) -> Self {
        EventId::Text(text.to_string())
    }
}

impl From<String> for EventId {
    fn from(text: String) -> Self {
        EventId::Text(text)
    }
}

impl From<&String> for EventId {
    fn from(text: &String) -> Self {
        EventId::Text(text.clone())
    }
}

impl From<Token> for EventId {
    fn from(token: Token) -> Self {
        EventId::Token(token)
    }
}

impl From<&Token> for EventId {
    fn from(token: &Token) -> Self {
        EventId::Token(token.clone())
    }
}

impl From<&EventId> for EventId {
    fn from(id: &EventId) -> Self {
        id.clone()
    }
}

/// Only non-empty JSON strings name events; every other value is rejected.
impl TryFrom<&Value> for EventId {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        IsNonEmptyString::validate(value, "event")?;
        Ok(EventId::Text(value.as_str().unwrap_or_default().to_string()))
    }
}

impl TryFrom<Value> for EventId {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => {
                NotEmpty::validate(&text, "event")?;
                Ok(EventId::Text(text))
            }
            other => EventId::try_from(&other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_text_ids_compare_by_value() {
        assert_eq!(EventId::from("click"), EventId::from("click".to_string()));
        assert_ne!(EventId::from("click"), EventId::from("hover"));
    }

    #[test]
    fn test_tokens_compare_by_identity() {
        let a = Token::new("click");
        let b = Token::new("click");

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(EventId::from(&a), EventId::from("click"));
    }

    #[test]
    fn test_ids_hash_consistently() {
        let token = Token::anonymous();
        let mut set = HashSet::new();
        set.insert(EventId::from(&token));
        set.insert(EventId::from(token.clone()));
        set.insert(EventId::from("a"));
        set.insert(EventId::from("a"));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_validate() {
        assert!(EventId::from("x").validate().is_ok());
        assert!(EventId::from(" ").validate().is_ok());
        assert!(EventId::from(Token::anonymous()).validate().is_ok());

        let errors = EventId::from("").validate().unwrap_err();
        assert!(errors.has_constraint("notEmpty"));
    }

    #[test]
    fn test_try_from_value() {
        assert_eq!(
            EventId::try_from(json!("click")).unwrap(),
            EventId::from("click")
        );

        for bad in [json!(1), json!(null), json!(true), json!([]), json!({})] {
            let err = EventId::try_from(&bad).unwrap_err();
            assert_eq!(err.constraint, "isString");
        }

        let err = EventId::try_from(json!("")).unwrap_err();
        assert_eq!(err.constraint, "notEmpty");
        assert_eq!(err.field, "event");
        assert!(EventId::try_from(&json!("")).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(EventId::from("click").to_string(), "click");
        assert_eq!(EventId::from(Token::new("ready")).to_string(), "Token(ready)");
        assert_eq!(Token::anonymous().to_string(), "Token()");
    }

    #[test]
    fn test_accessors() {
        let token = Token::new("ready");
        let id = EventId::from(&token);

        assert!(id.is_token());
        assert_eq!(id.as_text(), None);
        assert_eq!(token.description(), Some("ready"));
        assert_eq!(EventId::from("x").as_text(), Some("x"));
    }
}
