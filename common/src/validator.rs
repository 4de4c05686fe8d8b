//! Field-level validation against server-supplied JSON Schema.
//!
//! Backend schemas carry renderer hints (`placeholder`, `form_type`) that are
//! not JSON Schema keywords; complaints about them are noise and never reach
//! the user.

use serde_json::Value;
use thiserror::Error;

const UNKNOWN_KEYWORD: &str = "unknown keyword";

/// The schema itself is unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema does not compile: {0}")]
pub struct SchemaError(pub String);

/// A value violates its schema. The message is one constraint per line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FieldError(pub String);

impl FieldError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// A compiled schema. Formats (`email`, `uri`, ...) are enforced.
pub struct CompiledSchema {
    validator: jsonschema::Validator,
}

impl CompiledSchema {
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .map_err(|err| SchemaError(err.to_string()))?;
        Ok(Self { validator })
    }

    /// `None` is vacuously valid; presence is a required-field concern.
    pub fn check(&self, value: Option<&Value>) -> Result<(), FieldError> {
        let Some(value) = value else {
            return Ok(());
        };
        let messages = self
            .validator
            .iter_errors(value)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        match build_validation_errors(&messages) {
            joined if joined.is_empty() => Ok(()),
            joined => Err(FieldError(joined)),
        }
    }
}

/// Joins violation messages with newlines, dropping unknown-keyword noise.
pub fn build_validation_errors<S: AsRef<str>>(messages: &[S]) -> String {
    messages
        .iter()
        .map(AsRef::as_ref)
        .filter(|msg| !msg.contains(UNKNOWN_KEYWORD))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compiles `schema` and checks `value` against it.
///
/// A schema that does not compile cannot reject anything: it is logged and
/// the value passes, leaving the decision to the server.
pub fn validate(schema: &Value, value: Option<&Value>) -> Result<(), FieldError> {
    match CompiledSchema::compile(schema) {
        Ok(compiled) => compiled.check(value),
        Err(err) => {
            log::warn!("{err}");
            Ok(())
        }
    }
}
