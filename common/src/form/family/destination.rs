use serde_json::{Map, Value};

use super::{FormFamily, ModalMode, PayloadError, Prefill, object, schema_list};
use crate::api::endpoints::{self, Resource};
use crate::api::ApiRequest;
use crate::form::field::{FormField, build_fields};
use crate::form::values::FormValues;
use crate::model::schema::ResourceSchema;

const IGNORED: &[&str] = &[
    "key",
    "create_date",
    "created_by",
    "modified_date",
    "destination_name",
    "destination_type",
];
const NAME: &str = "destination_name";
const TYPE: &str = "destination_type";

/// Notification targets. Variants are destination types keyed by title;
/// everything but the name is sent under `kwargs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestinationFamily;

impl FormFamily for DestinationFamily {
    fn noun(&self) -> &'static str {
        "Destination"
    }

    fn schema_request(&self) -> ApiRequest {
        endpoints::json_schema(Resource::Destinations)
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
        vec![FormField::text(NAME, "Destination Name", "Enter a destination name")]
    }

    fn variant_required_message(&self) -> &'static str {
        "Select the destination type"
    }

    fn build_payload(&self, variant: &str, values: &FormValues) -> Result<Value, PayloadError> {
        let mut cleaned = values.clean();
        let name = cleaned.remove(NAME).ok_or(PayloadError::MissingKey(NAME))?;

        let mut kwargs = Map::new();
        kwargs.insert(TYPE.to_string(), Value::String(variant.to_string()));
        kwargs.extend(cleaned);

        let mut payload = Map::new();
        payload.insert(NAME.to_string(), name);
        payload.insert("kwargs".to_string(), Value::Object(kwargs));
        Ok(Value::Object(payload))
    }

    fn submit_request(&self, mode: &ModalMode, _variant: &str, payload: Value) -> Result<ApiRequest, PayloadError> {
        Ok(match mode {
            ModalMode::Create => endpoints::create(Resource::Destinations, payload),
            ModalMode::Update { key, .. } => endpoints::update(Resource::Destinations, key, payload),
        })
    }

    fn prefill(&self, record: &Value) -> Prefill {
        let mut kwargs = object(record.get("kwargs"));
        let variant = kwargs
            .remove(TYPE)
            .and_then(|t| t.as_str().map(str::to_string));
        let mut values = FormValues::new();
        values.set(NAME, record.get(NAME).cloned());
        values.extend_from(&kwargs);
        Prefill { variant, values }
    }

    fn variant_locked_on_update(&self) -> bool {
        true
    }

    fn success_message(&self) -> &'static str {
        "Destination looks good!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn slack() -> ResourceSchema {
        serde_json::from_value(json!({
            "title": "Slack",
            "properties": {
                "key": {"type": "string"},
                "destination_name": {"type": "string"},
                "destination_type": {"enum": ["Slack"], "type": "string"},
                "webhook": {"title": "Webhook", "type": "string", "format": "password"}
            },
            "required": ["destination_type", "webhook"]
        }))
        .unwrap()
    }

    #[test]
    fn only_webhook_is_editable() {
        let fields = DestinationFamily.variant_fields(&slack());
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "webhook");
        assert_eq!(fields[0].required_message, "required field.");
    }

    #[test]
    fn payload_nests_everything_but_the_name() {
        let mut values = FormValues::new();
        values.set("destination_name", Some(json!("alerts")));
        values.set("webhook", Some(json!("https://hooks.slack.com/x")));
        assert_eq!(
            DestinationFamily.build_payload("Slack", &values).unwrap(),
            json!({
                "destination_name": "alerts",
                "kwargs": {"destination_type": "Slack", "webhook": "https://hooks.slack.com/x"}
            })
        );
    }

    #[test]
    fn prefill_reads_type_from_kwargs() {
        let prefill = DestinationFamily.prefill(&json!({
            "key": "d-1",
            "destination_name": "alerts",
            "kwargs": {"destination_type": "Slack", "webhook": "https://x"}
        }));
        assert_eq!(prefill.variant.as_deref(), Some("Slack"));
        assert_eq!(prefill.values.get("destination_name"), Some(&json!("alerts")));
        assert_eq!(prefill.values.get("destination_type"), None);
    }
}
