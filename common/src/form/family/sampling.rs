use serde_json::{Map, Value, json};

use super::{FormFamily, ModalMode, PayloadError, Prefill, object, string};
use crate::api::endpoints::{self, Resource};
use crate::api::ApiRequest;
use crate::form::field::{FormField, build_fields};
use crate::form::values::FormValues;
use crate::model::schema::ResourceSchema;

/// Record members the backend manages itself; never echoed back on update.
const SERVER_MANAGED: &[&str] = &["key", "create_date", "modified_date", "sample"];

/// Sampling configuration of an existing dataset. The dataset schema lists
/// sampling methods under `properties.sampling.anyOf`; each one carries its
/// parameters under `sampling_kwargs`.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingFamily {
    pub dataset_key: String,
    /// The dataset as last fetched. Sampling is merged into it on submit.
    pub dataset: Map<String, Value>,
    pub sample_columns: Option<Vec<String>>,
}

impl SamplingFamily {
    pub fn new(dataset: &Value) -> Result<Self, PayloadError> {
        let record = object(Some(dataset));
        let dataset_key = string(record.get("key")).ok_or(PayloadError::MissingKey("dataset key"))?;
        let sample_columns = record
            .get("sample")
            .and_then(|s| s.get("columns"))
            .and_then(Value::as_array)
            .map(|columns| {
                columns
                    .iter()
                    .filter_map(|c| c.as_str().map(str::to_string))
                    .collect()
            });
        Ok(Self {
            dataset_key,
            dataset: record,
            sample_columns,
        })
    }
}

impl FormFamily for SamplingFamily {
    fn noun(&self) -> &'static str {
        "Sampling"
    }

    fn schema_request(&self) -> ApiRequest {
        endpoints::json_schema(Resource::Datasets)
    }

    fn variants(&self, body: &Value) -> Option<Vec<ResourceSchema>> {
        let dataset: ResourceSchema = serde_json::from_value(body.clone()).ok()?;
        Some(dataset.property("sampling")?.any_of.clone())
    }

    fn variant_key(&self, schema: &ResourceSchema) -> Option<String> {
        schema.property("sampling_method")?.literal()
    }

    fn variant_fields(&self, schema: &ResourceSchema) -> Vec<FormField> {
        let Some(kwargs) = schema.property("sampling_kwargs") else {
            return Vec::new();
        };
        build_fields(&kwargs.properties, &kwargs.required, &[], self.sample_columns.as_deref())
    }

    fn variant_required_message(&self) -> &'static str {
        "Select a Sampling Method."
    }

    fn build_payload(&self, variant: &str, values: &FormValues) -> Result<Value, PayloadError> {
        let mut payload: Map<String, Value> = self
            .dataset
            .iter()
            .filter(|(name, _)| !SERVER_MANAGED.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        payload.insert(
            "sampling".to_string(),
            json!({"sampling_method": variant, "sampling_kwargs": values.clean()}),
        );
        Ok(Value::Object(payload))
    }

    fn submit_request(&self, _mode: &ModalMode, _variant: &str, payload: Value) -> Result<ApiRequest, PayloadError> {
        Ok(endpoints::update(Resource::Datasets, &self.dataset_key, payload))
    }

    fn prefill(&self, record: &Value) -> Prefill {
        let sampling = record.get("sampling");
        let mut values = FormValues::new();
        values.extend_from(&object(sampling.and_then(|s| s.get("sampling_kwargs"))));
        Prefill {
            variant: string(sampling.and_then(|s| s.get("sampling_method"))),
            values,
        }
    }

    fn schema_error_message(&self) -> String {
        "An error occurred while getting dataset json schema.".to_string()
    }

    fn title(&self, _mode: &ModalMode) -> String {
        "Configure Sampling".to_string()
    }
}
