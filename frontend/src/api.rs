//! Browser side of the gateway client: `fetch` with the session cookie and
//! `window.location` for navigation.

use std::ops::Deref;
use std::rc::Rc;

use common::api::{
    ApiClient, ApiRequest, DEFAULT_API_DOMAIN, LOGIN_PATH, Method, Navigator, RawResponse, RequestBody,
    Transport, TransportError,
};
use common::routes::login_href;
use gloo_net::http::{Request, RequestBuilder};
use serde::Deserialize;
use web_sys::{RequestCredentials, UrlSearchParams};

pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: &ApiRequest, base_url: &str) -> Result<RawResponse, TransportError> {
        let url = request
            .url(base_url)
            .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;
        let builder = RequestBuilder::new(&url)
            .method(method(request.method))
            .credentials(RequestCredentials::Include);

        let prepared = match &request.body {
            None => builder.build(),
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Form(fields)) => {
                let params = UrlSearchParams::new()
                    .map_err(|_| TransportError::InvalidRequest("form body".to_string()))?;
                for (key, value) in fields {
                    params.append(key, value);
                }
                builder.body(params)
            }
        }
        .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|err| TransportError::NoResponse(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::NoResponse(err.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

fn method(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Patch => gloo_net::http::Method::PATCH,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let target = if path == LOGIN_PATH {
            let search = window.location().search().unwrap_or_default();
            login_href(&format!("{}{search}", self.current_path()))
        } else {
            path.to_string()
        };
        log::info!("redirecting to {target}");
        if let Err(err) = window.location().set_href(&target) {
            log::error!("redirect failed: {err:?}");
        }
    }
}

pub type BrowserClient = ApiClient<BrowserTransport, BrowserNavigator>;

/// Shared handle to the client, cheap to clone into props and futures.
#[derive(Clone)]
pub struct Api(Rc<BrowserClient>);

impl Api {
    pub fn new(api_domain: &str) -> Self {
        Self(Rc::new(ApiClient::new(api_domain, BrowserTransport, BrowserNavigator)))
    }
}

impl PartialEq for Api {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Api {
    type Target = BrowserClient;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Runtime settings served by the host next to the bundle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    pub api_domain: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_domain: option_env!("API_DOMAIN").unwrap_or(DEFAULT_API_DOMAIN).to_string(),
        }
    }
}

/// Reads `/config.json`; falls back to the build-time domain.
pub async fn load_config() -> ApiConfig {
    let response = match Request::get("/config.json").send().await {
        Ok(response) if response.ok() => response,
        Ok(response) => {
            log::warn!("config.json answered {}", response.status());
            return ApiConfig::default();
        }
        Err(err) => {
            log::warn!("config.json unavailable: {err}");
            return ApiConfig::default();
        }
    };
    match response.json::<ApiConfig>().await {
        Ok(config) => config,
        Err(err) => {
            log::warn!("config.json unreadable: {err}");
            ApiConfig::default()
        }
    }
}
