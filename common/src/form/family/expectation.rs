use serde_json::{Value, json};

use super::{FormFamily, ModalMode, PayloadError, Prefill, object, schema_list, string};
use crate::api::endpoints::{self, Resource};
use crate::api::ApiRequest;
use crate::form::field::{FormField, build_fields};
use crate::form::values::FormValues;
use crate::form::widget::FieldWidget;
use crate::model::dataset::Dataset;
use crate::model::schema::ResourceSchema;

const IGNORED: &[&str] = &["catch_exceptions", "include_config", "result_format"];

/// Expectations of one dataset. Variants are expectation types; their
/// editable fields live under `properties.kwargs`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectationFamily {
    pub datasource_id: String,
    pub dataset_id: String,
    pub sample_columns: Option<Vec<String>>,
}

impl ExpectationFamily {
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            datasource_id: dataset.datasource_id.clone(),
            dataset_id: dataset.key.clone(),
            sample_columns: dataset.sample_columns().map(<[String]>::to_vec),
        }
    }
}

impl FormFamily for ExpectationFamily {
    fn noun(&self) -> &'static str {
        "Expectation"
    }

    fn schema_request(&self) -> ApiRequest {
        endpoints::json_schema(Resource::Expectations)
    }

    fn variants(&self, body: &Value) -> Option<Vec<ResourceSchema>> {
        schema_list(body)
    }

    fn variant_key(&self, schema: &ResourceSchema) -> Option<String> {
        schema.property("expectation_type")?.literal()
    }

    fn variant_fields(&self, schema: &ResourceSchema) -> Vec<FormField> {
        let Some(kwargs) = schema.property("kwargs") else {
            return Vec::new();
        };
        build_fields(
            &kwargs.properties,
            &kwargs.required,
            IGNORED,
            self.sample_columns.as_deref(),
        )
        .into_iter()
        .map(|mut field| {
            // success ratio
            if field.name == "objective" {
                if let FieldWidget::Number { min, max, .. } = &mut field.widget {
                    *min = Some(0.0);
                    *max = Some(1.0);
                }
            }
            field
        })
        .collect()
    }

    fn variant_required_message(&self) -> &'static str {
        "Select an expectation."
    }

    fn build_payload(&self, variant: &str, values: &FormValues) -> Result<Value, PayloadError> {
        Ok(json!({
            "datasource_id": self.datasource_id,
            "dataset_id": self.dataset_id,
            "expectation_type": variant,
            "kwargs": values.clean(),
        }))
    }

    fn submit_request(&self, mode: &ModalMode, _variant: &str, payload: Value) -> Result<ApiRequest, PayloadError> {
        Ok(match mode {
            ModalMode::Create => endpoints::create(Resource::Expectations, payload),
            ModalMode::Update { key, .. } => endpoints::update(Resource::Expectations, key, payload),
        })
    }

    fn prefill(&self, record: &Value) -> Prefill {
        let mut values = FormValues::new();
        values.extend_from(&object(record.get("kwargs")));
        Prefill {
            variant: string(record.get("expectation_type")),
            values,
        }
    }
}
