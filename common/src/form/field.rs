use indexmap::IndexMap;
use serde_json::Value;

use super::values::{FormValues, is_blank};
use super::widget::FieldWidget;
use crate::model::schema::FieldDescriptor;
use crate::validator::{self, FieldError};

/// One rendered input.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub tooltip: Option<String>,
    pub widget: FieldWidget,
    pub required: bool,
    /// Message shown when a required value is missing.
    pub required_message: String,
    /// Checked with the validator wrapper; `None` for form-level inputs.
    pub descriptor: Option<FieldDescriptor>,
}

impl FormField {
    pub fn from_descriptor(
        name: &str,
        descriptor: &FieldDescriptor,
        required: bool,
        sample_columns: Option<&[String]>,
    ) -> Self {
        let widget = FieldWidget::for_descriptor(descriptor, sample_columns);
        let label = descriptor.label(name);
        Self {
            name: name.to_string(),
            required_message: format!("{label} is required"),
            label,
            tooltip: descriptor.description.clone(),
            // a checkbox always has a value
            required: required && !widget.is_checkbox(),
            widget,
            descriptor: Some(descriptor.clone()),
        }
    }

    /// A plain text input that is not described by the schema, such as a
    /// resource name.
    pub fn text(name: &str, label: &str, required_message: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            tooltip: None,
            widget: FieldWidget::Text { placeholder: None },
            required: true,
            required_message: required_message.to_string(),
            descriptor: None,
        }
    }

    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }

    /// Value the field starts with: `false` for checkboxes, otherwise nothing.
    /// Schema defaults are shown as placeholders, not submitted.
    pub fn initial_value(&self) -> Option<Value> {
        match self.widget {
            FieldWidget::Checkbox => Some(
                self.descriptor
                    .as_ref()
                    .and_then(|d| d.default.clone())
                    .filter(Value::is_boolean)
                    .unwrap_or(Value::Bool(false)),
            ),
            _ => None,
        }
    }

    pub fn coerce(&self, raw: &str) -> Option<Value> {
        self.widget.coerce_input(raw)
    }

    pub fn coerce_selection(&self, picked: Vec<String>) -> Option<Value> {
        self.widget.coerce_selection(picked)
    }

    /// Required rule first, then the schema rule on whatever is present.
    pub fn check(&self, value: Option<&Value>) -> Result<(), FieldError> {
        if self.required && is_blank(value) {
            return Err(FieldError(self.required_message.clone()));
        }
        match (&self.descriptor, value) {
            (Some(descriptor), Some(value)) if !value.is_null() => {
                validator::validate(&descriptor.to_schema(), Some(value))
            }
            _ => Ok(()),
        }
    }
}

/// Builds one field per property, skipping `ignored` names.
pub fn build_fields(
    properties: &IndexMap<String, FieldDescriptor>,
    required: &[String],
    ignored: &[&str],
    sample_columns: Option<&[String]>,
) -> Vec<FormField> {
    properties
        .iter()
        .filter(|(name, _)| !ignored.contains(&name.as_str()))
        .map(|(name, descriptor)| {
            let is_required = required.iter().any(|r| r == name);
            FormField::from_descriptor(name, descriptor, is_required, sample_columns)
        })
        .collect()
}

/// Runs every field's rules. An empty map means the form may be submitted.
pub fn validate_form(fields: &[FormField], values: &FormValues) -> IndexMap<String, String> {
    fields
        .iter()
        .filter_map(|field| {
            field
                .check(values.get(&field.name))
                .err()
                .map(|err| (field.name.clone(), err.0))
        })
        .collect()
}
