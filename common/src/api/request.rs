use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::model::detail::Detail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// `application/x-www-form-urlencoded`, used by the login endpoint.
    Form(Vec<(String, String)>),
}

/// A request relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the pair only when `value` is present.
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(fields));
        self
    }

    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Full URL including the encoded query string.
    pub fn url(&self, base_url: &str) -> Result<String, url::ParseError> {
        let mut url = Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), self.path))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url.into())
    }
}

/// Normalized result of every API call.
///
/// `status == None` means no response was received; `data` is then `None`
/// as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: Option<u16>,
    pub data: Option<Value>,
}

impl ApiResponse {
    pub fn no_response() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }

    pub fn is_unreachable(&self) -> bool {
        self.status.is_none()
    }

    pub fn detail(&self) -> Option<Detail> {
        self.data.as_ref().and_then(Detail::from_body)
    }

    /// Deserializes `data`, if any, into `T`.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        let data = self.data.clone()?;
        match serde_json::from_value(data) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::warn!("unexpected response shape: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_encodes_query() {
        let request = ApiRequest::get("/expectations")
            .query("dataset_id", "a b")
            .query("include_history", true);
        assert_eq!(
            request.url("http://localhost:8000/api/v1/").unwrap(),
            "http://localhost:8000/api/v1/expectations?dataset_id=a+b&include_history=true"
        );
    }

    #[test]
    fn url_escapes_reserved_characters() {
        let request = ApiRequest::get("/introspect/tables")
            .query("datasource_id", "ds/1")
            .query("schema", "a&b=c");
        assert_eq!(
            request.url("http://api").unwrap(),
            "http://api/introspect/tables?datasource_id=ds%2F1&schema=a%26b%3Dc"
        );
        assert!(ApiRequest::get("/datasets").url("not a base").is_err());
    }

    #[test]
    fn success_range() {
        let ok = ApiResponse { status: Some(201), data: Some(json!({})) };
        let bad = ApiResponse { status: Some(422), data: None };
        assert!(ok.is_success());
        assert!(!bad.is_success());
        assert!(ApiResponse::no_response().is_unreachable());
    }
}
