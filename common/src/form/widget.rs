use serde_json::Value;

use crate::model::schema::{FieldDescriptor, FieldType, FormType};

pub const TAGS_PLACEHOLDER: &str = "Type values followed by \"Enter\"";

/// The closed set of controls a descriptor can be rendered as.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    Select { options: Vec<String> },
    MultiSelect { options: Vec<String> },
    Tags,
    Checkbox,
    Number {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    Password { placeholder: Option<String> },
    Text { placeholder: Option<String> },
}

impl FieldWidget {
    /// Picks the control for `descriptor`. Column hints use the dataset
    /// sample when there is one and degrade to free input otherwise.
    pub fn for_descriptor(descriptor: &FieldDescriptor, sample_columns: Option<&[String]>) -> Self {
        if let Some(values) = &descriptor.enum_values {
            return FieldWidget::Select {
                options: values.iter().map(option_label).collect(),
            };
        }

        match (descriptor.form_type, sample_columns) {
            (Some(FormType::ColumnSelect), Some(columns)) => {
                return FieldWidget::Select {
                    options: columns.to_vec(),
                };
            }
            (Some(FormType::ColumnSelect), None) => {
                return FieldWidget::Text {
                    placeholder: descriptor.title.clone(),
                };
            }
            (Some(FormType::MultiColumnSelect), Some(columns)) => {
                return FieldWidget::MultiSelect {
                    options: columns.to_vec(),
                };
            }
            _ => {}
        }

        match descriptor.field_type {
            Some(FieldType::Boolean) => FieldWidget::Checkbox,
            Some(FieldType::Array) => match item_enum(descriptor) {
                Some(options) => FieldWidget::MultiSelect { options },
                None => FieldWidget::Tags,
            },
            Some(FieldType::Number) | Some(FieldType::Integer) => FieldWidget::Number {
                min: descriptor.minimum,
                max: descriptor.maximum,
                integer: descriptor.field_type == Some(FieldType::Integer),
            },
            _ if descriptor.format.as_deref() == Some("password") => FieldWidget::Password {
                placeholder: descriptor.placeholder_text(),
            },
            _ => FieldWidget::Text {
                placeholder: descriptor.placeholder_text().or_else(|| descriptor.title.clone()),
            },
        }
    }

    /// Turns raw text typed into the control into the JSON value submitted.
    /// Empty input clears the value.
    pub fn coerce_input(&self, raw: &str) -> Option<Value> {
        let trimmed = raw.trim();
        match self {
            FieldWidget::Number { integer, .. } => {
                if trimmed.is_empty() {
                    return None;
                }
                if *integer {
                    trimmed
                        .parse::<i64>()
                        .map(Value::from)
                        .ok()
                        .or_else(|| Some(Value::String(raw.to_string())))
                } else {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .and_then(|n| {
                            if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                                Some(Value::from(n as i64))
                            } else {
                                serde_json::Number::from_f64(n).map(Value::Number)
                            }
                        })
                        .or_else(|| Some(Value::String(raw.to_string())))
                }
            }
            FieldWidget::Checkbox => Some(Value::Bool(matches!(trimmed, "true" | "on" | "1"))),
            FieldWidget::Tags => Some(Value::Array(
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            )),
            _ if raw.is_empty() => None,
            _ => Some(Value::String(raw.to_string())),
        }
    }

    /// Options picked in a multi-select, kept verbatim. An empty pick clears
    /// the value.
    pub fn coerce_selection(&self, picked: Vec<String>) -> Option<Value> {
        match self {
            FieldWidget::MultiSelect { .. } | FieldWidget::Tags if !picked.is_empty() => {
                Some(Value::Array(picked.into_iter().map(Value::String).collect()))
            }
            FieldWidget::MultiSelect { .. } | FieldWidget::Tags => None,
            _ => {
                let first = picked.into_iter().next().unwrap_or_default();
                self.coerce_input(&first)
            }
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self, FieldWidget::Checkbox)
    }
}

fn option_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn item_enum(descriptor: &FieldDescriptor) -> Option<Vec<String>> {
    let values = descriptor.extra.get("items")?.get("enum")?.as_array()?;
    Some(values.iter().map(option_label).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(value: Value) -> FieldDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn enum_wins_over_type() {
        let d = descriptor(json!({"type": "string", "enum": ["all", "failure"]}));
        assert_eq!(
            FieldWidget::for_descriptor(&d, None),
            FieldWidget::Select { options: vec!["all".into(), "failure".into()] }
        );
    }

    #[test]
    fn column_select_uses_sample_or_falls_back_to_text() {
        let d = descriptor(json!({"title": "Column", "type": "string", "form_type": "column_select"}));
        let columns = vec!["id".to_string(), "age".to_string()];
        assert_eq!(
            FieldWidget::for_descriptor(&d, Some(&columns)),
            FieldWidget::Select { options: columns.clone() }
        );
        assert_eq!(
            FieldWidget::for_descriptor(&d, None),
            FieldWidget::Text { placeholder: Some("Column".into()) }
        );
    }

    #[test]
    fn multi_column_select_without_sample_is_tags() {
        let d = descriptor(json!({"type": "array", "form_type": "multi_column_select"}));
        assert_eq!(FieldWidget::for_descriptor(&d, None), FieldWidget::Tags);
    }

    #[test]
    fn primitive_types() {
        let boolean = descriptor(json!({"type": "boolean"}));
        let integer = descriptor(json!({"type": "integer", "minimum": 1}));
        let password = descriptor(json!({"type": "string", "format": "password", "placeholder": "secret"}));
        assert_eq!(FieldWidget::for_descriptor(&boolean, None), FieldWidget::Checkbox);
        assert_eq!(
            FieldWidget::for_descriptor(&integer, None),
            FieldWidget::Number { min: Some(1.0), max: None, integer: true }
        );
        assert_eq!(
            FieldWidget::for_descriptor(&password, None),
            FieldWidget::Password { placeholder: Some("secret".into()) }
        );
    }

    #[test]
    fn coerces_numbers() {
        let number = FieldWidget::Number { min: None, max: None, integer: false };
        assert_eq!(number.coerce_input("120"), Some(json!(120)));
        assert_eq!(number.coerce_input("0.95"), Some(json!(0.95)));
        assert_eq!(number.coerce_input(""), None);
        // left as text so the validator reports it
        assert_eq!(number.coerce_input("abc"), Some(json!("abc")));

        let port = FieldWidget::Number { min: None, max: None, integer: true };
        assert_eq!(port.coerce_input(" 5432 "), Some(json!(5432)));
    }

    #[test]
    fn coerces_tags() {
        assert_eq!(FieldWidget::Tags.coerce_input("a, b,,c"), Some(json!(["a", "b", "c"])));
    }

    #[test]
    fn selected_columns_keep_their_commas() {
        let columns = FieldWidget::MultiSelect {
            options: vec!["id".into(), "city, state".into()],
        };
        assert_eq!(
            columns.coerce_selection(vec!["city, state".into(), "id".into()]),
            Some(json!(["city, state", "id"]))
        );
        assert_eq!(columns.coerce_selection(Vec::new()), None);
    }
}
