//! JSON-Schema-like documents served by the `/{resource}/json-schema`
//! endpoints.
//!
//! The backend generates these from its pydantic models. Only the keywords the
//! form renderer interprets are typed; every other keyword is kept verbatim in
//! `extra` so a descriptor can be handed back to the validator unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One editable resource variant, e.g. a single expectation type or a single
/// destination type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, FieldDescriptor>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceSchema {
    pub fn property(&self, name: &str) -> Option<&FieldDescriptor> {
        self.properties.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// JSON-Schema primitive type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

/// Renderer hint attached by the backend to fields whose value is one (or
/// several) of the sampled dataset's column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    ColumnSelect,
    MultiColumnSelect,
    #[serde(other)]
    Unknown,
}

/// Describes a single property of a `ResourceSchema`.
///
/// Object-typed descriptors (e.g. an expectation's `kwargs`) carry their own
/// `properties` and `required`, which lets a family treat them as the field
/// set of the variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_type: Option<FormType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, FieldDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<ResourceSchema>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldDescriptor {
    /// Label shown next to the widget. Falls back to the property name.
    pub fn label(&self, name: &str) -> String {
        self.title.clone().unwrap_or_else(|| name.to_string())
    }

    pub fn is_boolean(&self) -> bool {
        self.field_type == Some(FieldType::Boolean)
    }

    pub fn is_array(&self) -> bool {
        self.field_type == Some(FieldType::Array)
    }

    pub fn placeholder_text(&self) -> Option<String> {
        match &self.placeholder {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }

    /// The descriptor as a standalone JSON Schema document, suitable for the
    /// validator. Nested `properties` are kept so object fields validate too.
    pub fn to_schema(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// The value a literal-typed discriminator property pins, taken from its
    /// `default`, `const` or single-entry `enum`.
    pub fn literal(&self) -> Option<String> {
        let literal = self
            .default
            .as_ref()
            .or_else(|| self.extra.get("const"))
            .or_else(|| self.enum_values.as_ref().and_then(|e| e.first()))?;
        literal.as_str().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_property_order_and_unknown_keywords() {
        let schema: ResourceSchema = serde_json::from_value(json!({
            "title": "Slack",
            "properties": {
                "webhook": {"title": "Webhook", "type": "string", "format": "password", "placeholder": "https://hooks.slack.com"},
                "destination_type": {"title": "Destination Type", "enum": ["Slack"], "type": "string"},
                "notify_on": {"enum": ["all", "failure", "success"], "type": "string", "writeOnly": true}
            },
            "required": ["destination_type", "webhook"],
            "additionalProperties": false
        }))
        .unwrap();

        let names: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["webhook", "destination_type", "notify_on"]);
        assert!(schema.is_required("webhook"));
        assert!(!schema.is_required("notify_on"));
        assert_eq!(schema.additional_properties, Some(false));

        let notify_on = schema.property("notify_on").unwrap();
        assert_eq!(notify_on.extra.get("writeOnly"), Some(&json!(true)));
        assert_eq!(notify_on.to_schema()["writeOnly"], json!(true));
    }

    #[test]
    fn unknown_form_type_does_not_reject_the_schema() {
        let field: FieldDescriptor =
            serde_json::from_value(json!({"type": "string", "form_type": "date_picker"})).unwrap();
        assert_eq!(field.form_type, Some(FormType::Unknown));
    }

    #[test]
    fn literal_reads_default_then_enum() {
        let by_default: FieldDescriptor =
            serde_json::from_value(json!({"type": "string", "default": "expect_column_to_exist"}))
                .unwrap();
        let by_enum: FieldDescriptor =
            serde_json::from_value(json!({"enum": ["sample_using_limit"], "type": "string"}))
                .unwrap();
        assert_eq!(by_default.literal().as_deref(), Some("expect_column_to_exist"));
        assert_eq!(by_enum.literal().as_deref(), Some("sample_using_limit"));
    }

    #[test]
    fn serialized_descriptor_omits_absent_keywords() {
        let field: FieldDescriptor =
            serde_json::from_value(json!({"title": "Port", "type": "integer"})).unwrap();
        assert_eq!(field.to_schema(), json!({"title": "Port", "type": "integer"}));
    }
}
