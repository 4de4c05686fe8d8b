#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use swiple_common::api::{
    ApiClient, ApiRequest, Navigator, RawResponse, Transport, TransportError,
};
use swiple_common::form::{Effect, FormFamily, ModalEvent, ModalState};

pub const BASE_URL: &str = "http://localhost:8000/api/v1";

/// Replays scripted answers in order and records every request it sees.
#[derive(Default)]
pub struct MockTransport {
    script: RefCell<VecDeque<Result<RawResponse, TransportError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        self.script.borrow_mut().push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(&self) -> &Self {
        self.script
            .borrow_mut()
            .push_back(Err(TransportError::NoResponse("connection refused".into())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest, _base_url: &str) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::NoResponse("nothing scripted".into())))
    }
}

pub struct RecordingNavigator {
    pub path: RefCell<String>,
    pub redirects: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            path: RefCell::new(path.to_string()),
            redirects: RefCell::new(Vec::new()),
        }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_string());
        *self.path.borrow_mut() = path.to_string();
    }
}

pub type TestClient<'a> = ApiClient<&'a MockTransport, &'a RecordingNavigator>;

pub fn client<'a>(transport: &'a MockTransport, navigator: &'a RecordingNavigator) -> TestClient<'a> {
    ApiClient::new(BASE_URL, transport, navigator)
}

/// Plays the host: feeds effects that need the network back into the modal
/// until none are left. Returns every effect the host saw.
pub async fn drive<F: FormFamily>(
    modal: &mut ModalState<F>,
    client: &TestClient<'_>,
    event: ModalEvent,
) -> Vec<Effect> {
    let mut seen = Vec::new();
    let mut queue: VecDeque<Effect> = modal.handle(event).into();
    while let Some(effect) = queue.pop_front() {
        let next = match &effect {
            Effect::FetchSchemas { ticket, request } => Some(ModalEvent::SchemasLoaded {
                ticket: *ticket,
                response: client.execute(request).await,
            }),
            Effect::Send { ticket, request } => Some(ModalEvent::Response {
                ticket: *ticket,
                response: client.execute(request).await,
            }),
            _ => None,
        };
        seen.push(effect);
        if let Some(next) = next {
            queue.extend(modal.handle(next));
        }
    }
    seen
}
