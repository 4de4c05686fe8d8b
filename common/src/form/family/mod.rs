//! Resource families edited through the schema-driven modal.
//!
//! A family knows where its variant schemas come from, how a variant is
//! identified, which properties the user may edit and how filled values are
//! shaped into the body its endpoint expects. The modal state machine is
//! the same for all of them.

mod datasource;
mod destination;
mod expectation;
mod sampling;

use serde_json::{Map, Value};
use thiserror::Error;

pub use datasource::DatasourceFamily;
pub use destination::DestinationFamily;
pub use expectation::ExpectationFamily;
pub use sampling::SamplingFamily;

use super::field::FormField;
use super::values::FormValues;
use crate::api::ApiRequest;
use crate::model::schema::ResourceSchema;

/// Whether the modal creates a record or edits an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalMode {
    Create,
    Update { key: String, record: Value },
}

impl ModalMode {
    pub fn is_update(&self) -> bool {
        matches!(self, ModalMode::Update { .. })
    }

    pub fn verb(&self) -> &'static str {
        match self {
            ModalMode::Create => "Create",
            ModalMode::Update { .. } => "Update",
        }
    }
}

/// Values that cannot be shaped into a request body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("unknown variant {0:?}")]
    UnknownVariant(String),
    #[error("no variant selected")]
    NoVariantSelected,
    #[error("missing {0}")]
    MissingKey(&'static str),
}

/// What an UPDATE modal starts with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prefill {
    pub variant: Option<String>,
    pub values: FormValues,
}

pub trait FormFamily {
    /// Singular noun used in titles and messages, capitalised.
    fn noun(&self) -> &'static str;

    fn schema_request(&self) -> ApiRequest;

    /// Extracts the variant schemas from the schema endpoint's body.
    fn variants(&self, body: &Value) -> Option<Vec<ResourceSchema>>;

    /// The discriminator value identifying `schema`.
    fn variant_key(&self, schema: &ResourceSchema) -> Option<String>;

    /// Editable fields of one variant, ignore-list applied.
    fn variant_fields(&self, schema: &ResourceSchema) -> Vec<FormField>;

    /// Inputs shown regardless of the variant, such as a resource name.
    fn base_fields(&self) -> Vec<FormField> {
        Vec::new()
    }

    /// Shown when the form is submitted without a variant.
    fn variant_required_message(&self) -> &'static str;

    /// Request body for `values`, which only hold the rendered fields.
    fn build_payload(&self, variant: &str, values: &FormValues) -> Result<Value, PayloadError>;

    fn submit_request(&self, mode: &ModalMode, variant: &str, payload: Value) -> Result<ApiRequest, PayloadError>;

    fn prefill(&self, record: &Value) -> Prefill;

    fn variant_locked_on_update(&self) -> bool {
        false
    }

    fn success_message(&self) -> &'static str {
        "Looks good!"
    }

    fn schema_error_message(&self) -> String {
        format!(
            "An error occurred while retrieving {} schema.",
            self.noun().to_lowercase()
        )
    }

    fn title(&self, mode: &ModalMode) -> String {
        format!("{} {}", mode.verb(), self.noun())
    }
}

/// Parses a JSON array of schemas, skipping entries that do not parse.
pub(crate) fn schema_list(body: &Value) -> Option<Vec<ResourceSchema>> {
    let items = body.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match serde_json::from_value(item.clone()) {
                Ok(schema) => Some(schema),
                Err(err) => {
                    log::warn!("skipping unparsable schema: {err}");
                    None
                }
            })
            .collect(),
    )
}

pub(crate) fn object(value: Option<&Value>) -> Map<String, Value> {
    value.and_then(Value::as_object).cloned().unwrap_or_default()
}

pub(crate) fn string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}
