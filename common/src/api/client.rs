use serde_json::Value;

use super::endpoints::{self, Resource};
use super::{
    ApiRequest, ApiResponse, ClientError, LOGIN_PATH, Navigator, RawResponse, Transport,
    TransportError,
};
use crate::model::datasource::Engine;

/// Talks to one backend, identified by `base_url`.
#[derive(Debug, Clone)]
pub struct ApiClient<T, N> {
    base_url: String,
    transport: T,
    navigator: N,
}

impl<T: Transport, N: Navigator> ApiClient<T, N> {
    pub fn new(base_url: impl Into<String>, transport: T, navigator: N) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Sends `request` and normalizes the outcome.
    ///
    /// A 401 redirects to the login screen (unless already there) and is still
    /// handed back to the caller. Only a request that cannot be built is an
    /// `Err`.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        if !request.path.starts_with('/') {
            return Err(ClientError::InvalidPath(request.path.clone()));
        }
        log::debug!("{} {}", request.method.as_str(), request.path);

        match self.transport.send(request, &self.base_url).await {
            Ok(raw) => {
                if raw.status == 401 && self.navigator.current_path() != LOGIN_PATH {
                    log::info!("session expired, redirecting to {LOGIN_PATH}");
                    self.navigator.redirect(LOGIN_PATH);
                }
                Ok(normalize(raw))
            }
            Err(TransportError::NoResponse(reason)) => {
                log::warn!("{} {}: {reason}", request.method.as_str(), request.path);
                Ok(ApiResponse::no_response())
            }
            Err(TransportError::InvalidRequest(reason)) => Err(ClientError::InvalidRequest(reason)),
        }
    }

    pub async fn list(&self, resource: Resource, filters: &[(&str, &str)]) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::list(resource, filters)).await
    }

    pub async fn get(&self, resource: Resource, id: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::get(resource, id)).await
    }

    pub async fn create(&self, resource: Resource, payload: Value) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::create(resource, payload)).await
    }

    pub async fn update(&self, resource: Resource, id: &str, payload: Value) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::update(resource, id, payload)).await
    }

    pub async fn delete(&self, resource: Resource, id: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::delete(resource, id)).await
    }

    pub async fn json_schema(&self, resource: Resource) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::json_schema(resource)).await
    }

    pub async fn create_datasource(&self, engine: Engine, payload: Value) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::create_datasource(engine, payload)).await
    }

    pub async fn update_datasource(
        &self,
        engine: Engine,
        key: &str,
        payload: Value,
    ) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::update_datasource(engine, key, payload)).await
    }

    pub async fn list_datasets(&self, datasource_id: Option<&str>) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::list_datasets(datasource_id)).await
    }

    pub async fn query_sample(&self, payload: Value) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::query_sample(payload)).await
    }

    pub async fn refresh_sample(&self, key: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::refresh_sample(key)).await
    }

    pub async fn validate_dataset(&self, key: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::validate_dataset(key)).await
    }

    pub async fn list_expectations(
        &self,
        dataset_id: Option<&str>,
        include_history: bool,
        datasource_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::list_expectations(dataset_id, include_history, datasource_id))
            .await
    }

    pub async fn list_schedules(&self, dataset_id: Option<&str>) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::list_schedules(dataset_id)).await
    }

    pub async fn create_schedule(&self, dataset_id: &str, payload: Value) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::create_schedule(dataset_id, payload)).await
    }

    pub async fn next_run_times(&self, payload: Value) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::next_run_times(payload)).await
    }

    pub async fn introspect_schemas(&self, datasource_id: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::introspect_schemas(datasource_id)).await
    }

    pub async fn introspect_tables(&self, datasource_id: &str, schema: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::introspect_tables(datasource_id, schema)).await
    }

    pub async fn introspect_columns(
        &self,
        datasource_id: &str,
        schema: &str,
        table: &str,
    ) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::introspect_columns(datasource_id, schema, table))
            .await
    }

    pub async fn validation_statistics(&self, dataset_id: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::validation_statistics(dataset_id)).await
    }

    pub async fn list_suggestions(&self, dataset_id: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::list_suggestions(dataset_id)).await
    }

    pub async fn enable_suggestion(&self, key: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::enable_suggestion(key)).await
    }

    pub async fn dashboard_metrics(&self) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::dashboard_metrics()).await
    }

    pub async fn dashboard_issues(&self) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::dashboard_issues()).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::login(username, password)).await
    }

    pub async fn logout(&self) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::logout()).await
    }

    pub async fn auth_methods(&self) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::auth_methods()).await
    }

    pub async fn authorize(&self, provider: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::authorize(provider)).await
    }

    pub async fn oauth_callback(&self, provider: &str, code: &str, state: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::oauth_callback(provider, code, state)).await
    }

    pub async fn me(&self) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::me()).await
    }

    pub async fn list_users(&self) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::list_users()).await
    }

    pub async fn create_user(&self, payload: Value) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::create_user(payload)).await
    }

    pub async fn update_user(&self, id: &str, payload: Value) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::update_user(id, payload)).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<ApiResponse, ClientError> {
        self.execute(&endpoints::delete_user(id)).await
    }
}

/// Parses the body as JSON; anything else is kept as a plain string and an
/// empty body becomes `None`.
fn normalize(raw: RawResponse) -> ApiResponse {
    let data = if raw.body.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str(&raw.body).unwrap_or(Value::String(raw.body)))
    };
    ApiResponse {
        status: Some(raw.status),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    struct Fixed(Result<RawResponse, TransportError>);

    impl Transport for Fixed {
        async fn send(&self, _: &ApiRequest, _: &str) -> Result<RawResponse, TransportError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct Recorder {
        path: String,
        redirects: RefCell<Vec<String>>,
    }

    impl Navigator for Recorder {
        fn current_path(&self) -> String {
            self.path.clone()
        }

        fn redirect(&self, path: &str) {
            self.redirects.borrow_mut().push(path.to_string());
        }
    }

    fn raw(status: u16, body: &str) -> Fixed {
        Fixed(Ok(RawResponse { status, body: body.to_string() }))
    }

    #[test]
    fn parses_json_bodies() {
        let client = ApiClient::new("http://api", raw(200, r#"{"key":"a"}"#), Recorder::default());
        let resp = block_on(client.get(Resource::Datasets, "a")).unwrap();
        assert_eq!(resp.status, Some(200));
        assert_eq!(resp.data, Some(json!({"key": "a"})));
    }

    #[test]
    fn keeps_non_json_bodies_as_text() {
        let client = ApiClient::new("http://api", raw(500, "Internal Server Error"), Recorder::default());
        let resp = block_on(client.list(Resource::Datasources, &[])).unwrap();
        assert_eq!(resp.data, Some(Value::String("Internal Server Error".into())));
    }

    #[test]
    fn no_response_is_normalized() {
        let transport = Fixed(Err(TransportError::NoResponse("offline".into())));
        let client = ApiClient::new("http://api", transport, Recorder::default());
        let resp = block_on(client.list(Resource::Datasources, &[])).unwrap();
        assert_eq!(resp, ApiResponse { status: None, data: None });
    }

    #[test]
    fn unbuildable_request_is_an_error() {
        let transport = Fixed(Err(TransportError::InvalidRequest("bad url".into())));
        let client = ApiClient::new("http://api", transport, Recorder::default());
        assert!(block_on(client.me()).is_err());

        let client = ApiClient::new("http://api", raw(200, "{}"), Recorder::default());
        let err = block_on(client.execute(&ApiRequest::get("datasets"))).unwrap_err();
        assert_eq!(err, ClientError::InvalidPath("datasets".into()));
    }

    #[test]
    fn unauthorized_on_login_page_does_not_redirect() {
        let navigator = Recorder { path: LOGIN_PATH.into(), ..Default::default() };
        let client = ApiClient::new("http://api", raw(401, r#"{"detail":"Unauthorized"}"#), &navigator);
        let resp = block_on(client.me()).unwrap();
        assert_eq!(resp.status, Some(401));
        assert!(navigator.redirects.borrow().is_empty());
    }
}
