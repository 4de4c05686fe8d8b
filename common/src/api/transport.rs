use super::{ApiRequest, TransportError};

/// What came back over the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one request with session credentials attached.
///
/// The browser implementation is not `Send`; neither are the futures it
/// returns.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &ApiRequest, base_url: &str) -> Result<RawResponse, TransportError>;
}

/// The piece of the host that knows where the user is.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: &ApiRequest, base_url: &str) -> Result<RawResponse, TransportError> {
        (**self).send(request, base_url).await
    }
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn redirect(&self, path: &str) {
        (**self).redirect(path)
    }
}
