//! Test harness for the TomatoMall client.
//!
//! Provides an in-process mock of the TomatoMall backend built on `axum`,
//! bound to an ephemeral port, plus recording implementations of the
//! client's navigation and notice seams.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tomato-mall-integration-tests
//! ```
//!
//! No external services are needed.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tomato_mall_client::{
    ApiClient, ClientConfig, ClientContext, NavigationError, Navigator, Notice, Notifier, Session,
};

// =============================================================================
// Mock backend
// =============================================================================

/// A request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    /// Value of the `token` header, if sent.
    pub token: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Body parsed as JSON (`Null` if empty or not JSON).
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

/// A canned reply.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: String,
    pub content_type: &'static str,
}

impl MockResponse {
    /// HTTP 200 with a success envelope around `data`.
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self::json(StatusCode::OK, &json!({"code": "200", "msg": null, "data": data}))
    }

    /// Error status with a failure envelope carrying `msg`.
    #[must_use]
    pub fn error(status: StatusCode, msg: &str) -> Self {
        Self::json(
            status,
            &json!({"code": status.as_u16().to_string(), "msg": msg, "data": null}),
        )
    }

    /// The backend's reply to a missing or invalid token.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::error(StatusCode::UNAUTHORIZED, "鉴权错误!")
    }

    #[must_use]
    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
        }
    }

    #[must_use]
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "text/plain; charset=utf-8",
        }
    }
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    routes: Mutex<HashMap<(Method, String), MockResponse>>,
}

/// In-process TomatoMall backend.
///
/// Replies are registered per method and path (query ignored); anything
/// unregistered gets a 404 envelope.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to an ephemeral port and start serving.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Base URL of the server.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Register (or replace) the reply for `method path`.
    pub fn on(&self, method: Method, path: &str, response: MockResponse) -> &Self {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), response);
        self
    }

    /// All requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request received")
    }

    /// Forget recorded requests.
    pub fn clear_requests(&self) {
        self.state.requests.lock().unwrap().clear();
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(ToString::to_string),
        token: header_text("token"),
        content_type: header_text(header::CONTENT_TYPE.as_str()),
        body,
    });

    let reply = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.clone(), path.clone()))
        .cloned()
        .unwrap_or_else(|| {
            MockResponse::error(StatusCode::NOT_FOUND, &format!("no mock for {method} {path}"))
        });

    (
        reply.status,
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response()
}

// =============================================================================
// Recording seams
// =============================================================================

/// Records navigations and notices. Navigations can be held open until
/// [`Recorder::release`] is called.
#[derive(Default)]
pub struct Recorder {
    navigations: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
    gate: Option<Semaphore>,
}

impl Recorder {
    /// Recorder whose navigations complete immediately.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Recorder whose navigations wait for [`Recorder::release`].
    #[must_use]
    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        })
    }

    /// Let one held navigation finish.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Navigator for Recorder {
    fn navigate<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<(), NavigationError>> {
        Box::pin(async move {
            self.navigations.lock().unwrap().push(path.to_string());
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            Ok(())
        })
    }
}

impl Notifier for Recorder {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// =============================================================================
// Client construction
// =============================================================================

/// Client pointed at `backend`, with a fresh in-memory session.
#[must_use]
pub fn client_for(backend: &MockBackend, recorder: &Arc<Recorder>) -> ApiClient {
    client_with_session(backend, recorder, Session::in_memory())
}

/// Client pointed at `backend` using `session`.
#[must_use]
pub fn client_with_session(
    backend: &MockBackend,
    recorder: &Arc<Recorder>,
    session: Session,
) -> ApiClient {
    let config = ClientConfig::new(&backend.url()).unwrap();
    let context = ClientContext::builder()
        .session(session)
        .navigator(Arc::clone(recorder) as Arc<dyn Navigator>)
        .notifier(Arc::clone(recorder) as Arc<dyn Notifier>)
        .build();
    ApiClient::new(config, context).unwrap()
}
