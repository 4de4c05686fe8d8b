use serde_json::Value;

use crate::api::ApiResponse;

pub const API_DOWN: &str = "API appears to be down.";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient toast, as opposed to a message rendered inside the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// How a create/update response is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Success(Option<Value>),
    /// Server-side validation, shown inline; the user can fix and resubmit.
    Inline(Vec<String>),
    Toast(Notice),
    /// The session expired. The client has already redirected to the login
    /// screen, so nothing is reported here.
    Unauthorized,
}

pub fn classify_response(response: &ApiResponse) -> SubmitOutcome {
    match response.status {
        Some(200) | Some(201) => {
            let has_key = response
                .data
                .as_ref()
                .is_some_and(|data| data.get("key").is_some() || data.get("id").is_some());
            if !has_key {
                log::warn!("success response without a key, accepting it");
            }
            SubmitOutcome::Success(response.data.clone())
        }
        None => SubmitOutcome::Toast(Notice::error(API_DOWN)),
        Some(401) => SubmitOutcome::Unauthorized,
        Some(_) => match response.detail() {
            Some(detail) => SubmitOutcome::Inline(detail.lines()),
            None => SubmitOutcome::Toast(Notice::error(UNKNOWN_ERROR)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: Option<u16>, data: Option<Value>) -> ApiResponse {
        ApiResponse { status, data }
    }

    #[test]
    fn created_is_success_even_without_key() {
        let outcome = classify_response(&response(Some(201), Some(json!({"key": "k"}))));
        assert!(matches!(outcome, SubmitOutcome::Success(Some(_))));
        let outcome = classify_response(&response(Some(200), None));
        assert_eq!(outcome, SubmitOutcome::Success(None));
    }

    #[test]
    fn string_detail_is_inline() {
        let outcome = classify_response(&response(
            Some(400),
            Some(json!({"detail": "could not connect\nhost unreachable"})),
        ));
        assert_eq!(
            outcome,
            SubmitOutcome::Inline(vec!["could not connect".into(), "host unreachable".into()])
        );
    }

    #[test]
    fn unauthorized_is_left_to_the_redirect() {
        let outcome = classify_response(&response(Some(401), Some(json!({"detail": "Unauthorized"}))));
        assert_eq!(outcome, SubmitOutcome::Unauthorized);
    }

    #[test]
    fn no_status_is_api_down() {
        assert_eq!(
            classify_response(&ApiResponse::no_response()),
            SubmitOutcome::Toast(Notice::error(API_DOWN))
        );
    }

    #[test]
    fn bare_error_is_unknown() {
        assert_eq!(
            classify_response(&response(Some(500), Some(json!("Internal Server Error")))),
            SubmitOutcome::Toast(Notice::error(UNKNOWN_ERROR))
        );
    }
}
