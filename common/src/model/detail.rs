//! The backend's error envelope: `{"detail": "..."}` or
//! `{"detail": [{"loc": [...], "msg": "..."}]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single field-level issue of a 422 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
}

impl FieldIssue {
    /// The last segment of `loc`, i.e. the offending field name.
    pub fn field(&self) -> String {
        match self.loc.last() {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    Message(String),
    Fields(Vec<FieldIssue>),
    Other(Value),
}

impl Detail {
    /// Extracts the `detail` member of a response body, if any.
    pub fn from_body(body: &Value) -> Option<Detail> {
        let detail = body.get("detail")?;
        serde_json::from_value(detail.clone()).ok()
    }

    /// Human-readable lines. Field issues become `field: msg`; a plain message
    /// is split on newlines so multi-line SQL errors keep their shape.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Detail::Message(msg) => msg.split('\n').map(str::to_string).collect(),
            Detail::Fields(issues) => issues
                .iter()
                .map(|issue| format!("{}: {}", issue.field(), issue.msg))
                .collect(),
            Detail::Other(value) => vec![value.to_string()],
        }
    }
}

/// Formats the `detail` list of a 422 body as `field: msg` lines joined with
/// newlines. Bodies without a detail member format to an empty string.
pub fn format_error_msg(body: &Value) -> String {
    Detail::from_body(body)
        .map(|detail| detail.lines().join("\n"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_field_issue_with_last_loc_segment() {
        let body = json!({
            "detail": [{
                "loc": ["body", "trigger", "end_date"],
                "msg": "end_date should not be before start_date",
                "type": "value_error"
            }]
        });
        assert_eq!(
            format_error_msg(&body),
            "end_date: end_date should not be before start_date"
        );
    }

    #[test]
    fn numeric_loc_segment_is_rendered() {
        let issue = FieldIssue {
            loc: vec![json!("body"), json!("value_list"), json!(2)],
            msg: "str type expected".into(),
        };
        assert_eq!(issue.field(), "2");
    }

    #[test]
    fn string_detail_is_split_on_newlines() {
        let detail = Detail::from_body(&json!({"detail": "syntax error\nLINE 1: selec"})).unwrap();
        assert_eq!(detail, Detail::Message("syntax error\nLINE 1: selec".into()));
        assert_eq!(detail.lines(), vec!["syntax error", "LINE 1: selec"]);
    }

    #[test]
    fn missing_detail() {
        assert_eq!(Detail::from_body(&json!({"key": "abc"})), None);
        assert_eq!(format_error_msg(&json!({})), "");
    }
}
