//! Validation for the event emitter
//!
//! Small, pure validators that either pass or return a [`ValidationError`]
//! describing the violated shape, plus an [`ObjectSchema`] builder for
//! checking untyped JSON input such as configuration.
//!
//! # Examples
//!
//! ## Field Validation
//!
//! ```
//! use emitter_validation::{NotEmpty, IsBoolean};
//! use serde_json::json;
//!
//! assert!(NotEmpty::validate("click", "event").is_ok());
//! assert!(NotEmpty::validate("", "event").is_err());
//!
//! assert!(IsBoolean::validate(&json!(true), "logging").is_ok());
//! assert!(IsBoolean::validate(&json!("true"), "logging").is_err());
//! ```
//!
//! ## Implementing `Validate`
//!
//! ```
//! use emitter_validation::{MinItems, Validate, ValidationErrors};
//!
//! struct Batch {
//!     items: Vec<u32>,
//! }
//!
//! impl Validate for Batch {
//!     fn validate(&self) -> Result<(), ValidationErrors> {
//!         MinItems(1).validate(self.items.len(), "items")?;
//!         Ok(())
//!     }
//! }
//!
//! assert!(Batch { items: vec![1] }.validate().is_ok());
//! assert!(Batch { items: vec![] }.validate().is_err());
//! ```

mod errors;
mod schema;
mod traits;
mod validators;

pub use errors::*;
pub use schema::*;
pub use traits::*;
pub use validators::*;
