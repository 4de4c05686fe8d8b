//! Request builders for the REST contract of the backend.
//!
//! These are plain functions so that the form families and the client build
//! the same requests; [`ApiClient`](super::ApiClient) wraps each one in an
//! `async` method.

use serde_json::Value;

use super::ApiRequest;
use crate::model::datasource::Engine;

/// Top-level collections of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Datasources,
    Datasets,
    Expectations,
    Schedules,
    Destinations,
    Actions,
    Users,
    Validations,
    Suggestions,
    Introspect,
    Dashboard,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Datasources => "/datasources",
            Resource::Datasets => "/datasets",
            Resource::Expectations => "/expectations",
            Resource::Schedules => "/schedules",
            Resource::Destinations => "/destinations",
            Resource::Actions => "/actions",
            Resource::Users => "/user",
            Resource::Validations => "/validations",
            Resource::Suggestions => "/suggestions",
            Resource::Introspect => "/introspect",
            Resource::Dashboard => "/dashboard",
        }
    }

    pub fn item(self, id: &str) -> String {
        format!("{}/{}", self.path(), id)
    }
}

pub fn list(resource: Resource, filters: &[(&str, &str)]) -> ApiRequest {
    filters
        .iter()
        .fold(ApiRequest::get(resource.path()), |req, (k, v)| req.query(k, v))
}

pub fn get(resource: Resource, id: &str) -> ApiRequest {
    ApiRequest::get(resource.item(id))
}

pub fn create(resource: Resource, payload: Value) -> ApiRequest {
    ApiRequest::post(resource.path()).json(payload)
}

pub fn update(resource: Resource, id: &str, payload: Value) -> ApiRequest {
    ApiRequest::put(resource.item(id)).json(payload)
}

pub fn delete(resource: Resource, id: &str) -> ApiRequest {
    ApiRequest::delete(resource.item(id))
}

pub fn json_schema(resource: Resource) -> ApiRequest {
    ApiRequest::get(format!("{}/json-schema", resource.path()))
}

// datasources

pub fn create_datasource(engine: Engine, payload: Value) -> ApiRequest {
    ApiRequest::post(Resource::Datasources.item(engine.path_segment()))
        .query("test", true)
        .json(payload)
}

pub fn update_datasource(engine: Engine, key: &str, payload: Value) -> ApiRequest {
    ApiRequest::put(format!(
        "{}/{}",
        Resource::Datasources.item(engine.path_segment()),
        key
    ))
    .query("test", true)
    .json(payload)
}

// datasets

pub fn list_datasets(datasource_id: Option<&str>) -> ApiRequest {
    ApiRequest::get(Resource::Datasets.path()).query_opt("datasource_id", datasource_id)
}

pub fn query_sample(payload: Value) -> ApiRequest {
    ApiRequest::post(format!("{}/sample", Resource::Datasets.path())).json(payload)
}

pub fn refresh_sample(key: &str) -> ApiRequest {
    ApiRequest::put(format!("{}/sample", Resource::Datasets.item(key)))
}

pub fn validate_dataset(key: &str) -> ApiRequest {
    ApiRequest::post(format!("{}/validate", Resource::Datasets.item(key)))
}

// expectations

pub fn list_expectations(
    dataset_id: Option<&str>,
    include_history: bool,
    datasource_id: Option<&str>,
) -> ApiRequest {
    ApiRequest::get(Resource::Expectations.path())
        .query_opt("dataset_id", dataset_id)
        .query("include_history", include_history)
        .query_opt("datasource_id", datasource_id)
}

// schedules

pub fn list_schedules(dataset_id: Option<&str>) -> ApiRequest {
    ApiRequest::get(Resource::Schedules.path()).query_opt("dataset_id", dataset_id)
}

pub fn create_schedule(dataset_id: &str, payload: Value) -> ApiRequest {
    create(Resource::Schedules, payload).query("dataset_id", dataset_id)
}

pub fn next_run_times(payload: Value) -> ApiRequest {
    ApiRequest::post(format!("{}/next-run-times", Resource::Schedules.path())).json(payload)
}

// introspection

pub fn introspect_schemas(datasource_id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/schemas", Resource::Introspect.path()))
        .query("datasource_id", datasource_id)
}

pub fn introspect_tables(datasource_id: &str, schema: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/tables", Resource::Introspect.path()))
        .query("datasource_id", datasource_id)
        .query("schema", schema)
}

pub fn introspect_columns(datasource_id: &str, schema: &str, table: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/columns", Resource::Introspect.path()))
        .query("datasource_id", datasource_id)
        .query("schema", schema)
        .query("table", table)
}

// validations, suggestions, dashboard

pub fn validation_statistics(dataset_id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/statistics", Resource::Validations.path()))
        .query("dataset_id", dataset_id)
}

pub fn list_suggestions(dataset_id: &str) -> ApiRequest {
    ApiRequest::get(Resource::Suggestions.path()).query("dataset_id", dataset_id)
}

pub fn enable_suggestion(key: &str) -> ApiRequest {
    ApiRequest::put(format!("{}/enable", Resource::Suggestions.item(key)))
}

pub fn dashboard_metrics() -> ApiRequest {
    ApiRequest::get(format!("{}/metrics", Resource::Dashboard.path()))
}

pub fn dashboard_issues() -> ApiRequest {
    ApiRequest::get(format!("{}/issue", Resource::Dashboard.path()))
}

// auth

pub fn login(username: &str, password: &str) -> ApiRequest {
    ApiRequest::post("/auth/login").form(vec![
        ("username".to_string(), username.to_string()),
        ("password".to_string(), password.to_string()),
    ])
}

pub fn logout() -> ApiRequest {
    ApiRequest::post("/auth/logout")
}

pub fn auth_methods() -> ApiRequest {
    ApiRequest::get("/auth/methods")
}

pub fn authorize(provider: &str) -> ApiRequest {
    ApiRequest::get(format!("/auth/{provider}/authorize"))
        .query("authentication_backend", "cookie")
}

pub fn oauth_callback(provider: &str, code: &str, state: &str) -> ApiRequest {
    ApiRequest::get(format!("/auth/{provider}/callback"))
        .query("code", code)
        .query("state", state)
}

// users

pub fn me() -> ApiRequest {
    ApiRequest::get(Resource::Users.item("me"))
}

pub fn list_users() -> ApiRequest {
    ApiRequest::get(Resource::Users.path())
}

pub fn create_user(payload: Value) -> ApiRequest {
    create(Resource::Users, payload)
}

pub fn update_user(id: &str, payload: Value) -> ApiRequest {
    ApiRequest::patch(Resource::Users.item(id)).json(payload)
}

pub fn delete_user(id: &str) -> ApiRequest {
    delete(Resource::Users, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Method, RequestBody};
    use serde_json::json;

    #[test]
    fn datasource_paths_carry_engine_and_test_flag() {
        let req = update_datasource(Engine::Postgresql, "ds-1", json!({}));
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.path, "/datasources/postgresql/ds-1");
        assert_eq!(req.query, vec![("test".to_string(), "true".to_string())]);
    }

    #[test]
    fn login_is_form_encoded() {
        let req = login("admin@example.com", "hunter2");
        assert_eq!(
            req.body,
            Some(RequestBody::Form(vec![
                ("username".into(), "admin@example.com".into()),
                ("password".into(), "hunter2".into()),
            ]))
        );
    }

    #[test]
    fn schema_discovery_path() {
        assert_eq!(json_schema(Resource::Destinations).path, "/destinations/json-schema");
        assert_eq!(
            authorize("github").url("http://api").unwrap(),
            "http://api/auth/github/authorize?authentication_backend=cookie"
        );
    }

    #[test]
    fn expectation_filters_skip_missing_ids() {
        let req = list_expectations(Some("ds"), false, None);
        assert_eq!(
            req.query,
            vec![
                ("dataset_id".to_string(), "ds".to_string()),
                ("include_history".to_string(), "false".to_string()),
            ]
        );
    }
}
