//! API Gateway Client.
//!
//! Every call goes through [`ApiClient::execute`], which turns whatever the
//! [`Transport`] produced into an [`ApiResponse`]. UI code branches on
//! `status` and never sees a network error.

mod client;
pub mod endpoints;
mod error;
mod request;
mod transport;

pub use client::ApiClient;
pub use endpoints::Resource;
pub use error::{ClientError, TransportError};
pub use request::{ApiRequest, ApiResponse, Method, RequestBody};
pub use transport::{Navigator, RawResponse, Transport};

pub const DEFAULT_API_DOMAIN: &str = "http://localhost:8000/api/v1";
pub const LOGIN_PATH: &str = "/login";
