use serde_json::Value;

use super::{FormFamily, ModalMode, PayloadError, Prefill, object, schema_list, string};
use crate::api::endpoints::{self, Resource};
use crate::api::ApiRequest;
use crate::form::field::{FormField, build_fields};
use crate::form::values::FormValues;
use crate::model::datasource::Engine;
use crate::model::schema::ResourceSchema;

const IGNORED: &[&str] = &[
    "key",
    "create_date",
    "created_by",
    "modified_date",
    "datasource_name",
    "engine",
    "description",
];

/// Database connections. Variants are engines keyed by schema title; the
/// body is flat and the engine goes into the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasourceFamily;

impl FormFamily for DatasourceFamily {
    fn noun(&self) -> &'static str {
        "Datasource"
    }

    fn schema_request(&self) -> ApiRequest {
        endpoints::json_schema(Resource::Datasources)
    }

    fn variants(&self, body: &Value) -> Option<Vec<ResourceSchema>> {
        schema_list(body)
    }

    fn variant_key(&self, schema: &ResourceSchema) -> Option<String> {
        Some(schema.title.clone())
    }

    fn variant_fields(&self, schema: &ResourceSchema) -> Vec<FormField> {
        build_fields(&schema.properties, &schema.required, IGNORED, None)
            .into_iter()
            .map(|field| field.with_required_message("required field."))
            .collect()
    }

    fn base_fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("datasource_name", "Data Source Name", "Enter a data source name"),
            FormField::text("description", "Description", "Enter a description"),
        ]
    }

    fn variant_required_message(&self) -> &'static str {
        "Select an engine."
    }

    fn build_payload(&self, _variant: &str, values: &FormValues) -> Result<Value, PayloadError> {
        Ok(Value::Object(values.clean()))
    }

    fn submit_request(&self, mode: &ModalMode, variant: &str, payload: Value) -> Result<ApiRequest, PayloadError> {
        let engine =
            Engine::from_name(variant).ok_or_else(|| PayloadError::UnknownVariant(variant.to_string()))?;
        Ok(match mode {
            ModalMode::Create => endpoints::create_datasource(engine, payload),
            ModalMode::Update { key, .. } => endpoints::update_datasource(engine, key, payload),
        })
    }

    fn prefill(&self, record: &Value) -> Prefill {
        let mut values = FormValues::new();
        values.extend_from(&object(Some(record)));
        Prefill {
            variant: string(record.get("engine")),
            values,
        }
    }

    fn success_message(&self) -> &'static str {
        "Connection looks good!"
    }

    fn schema_error_message(&self) -> String {
        "An error occurred while retrieving data sources schema.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use serde_json::json;

    #[test]
    fn create_posts_to_engine_path_with_connection_test() {
        let req = DatasourceFamily
            .submit_request(&ModalMode::Create, "PostgreSQL", json!({"host": "db"}))
            .unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/datasources/postgresql");
        assert_eq!(req.url("http://api").unwrap(), "http://api/datasources/postgresql?test=true");
    }

    #[test]
    fn unknown_engine_is_rejected() {
        let err = DatasourceFamily
            .submit_request(&ModalMode::Create, "Oracle", json!({}))
            .unwrap_err();
        assert_eq!(err, PayloadError::UnknownVariant("Oracle".into()));
    }

    #[test]
    fn payload_is_flat() {
        let mut values = FormValues::new();
        values.set("datasource_name", Some(json!("warehouse")));
        values.set("description", Some(json!("prod")));
        values.set("port", Some(json!(5432)));
        assert_eq!(
            DatasourceFamily.build_payload("PostgreSQL", &values).unwrap(),
            json!({"datasource_name": "warehouse", "description": "prod", "port": 5432})
        );
    }
}
