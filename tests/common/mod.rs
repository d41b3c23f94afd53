//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

use wallet_api_client::auth::sign;
use wallet_api_client::config::{ApiConfig, Credentials};
use wallet_api_client::ApiClient;

pub const SECRET: &str = "test-secret";

/// A request as the mock exchange received it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Path plus query string, exactly as sent.
    pub path: String,
    /// Lower-cased header name → value.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Query parameter value, if present.
    #[allow(dead_code)]
    pub fn query_param(&self, name: &str) -> Option<String> {
        let (_, query) = self.path.split_once('?')?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Assert the signature header matches a recomputation over what was received.
    pub fn assert_signed(&self) {
        let timestamp = self.header("OK-ACCESS-TIMESTAMP").expect("timestamp header");
        let expected = sign(SECRET, timestamp, &self.method, &self.path, &self.body).unwrap();
        assert_eq!(self.header("OK-ACCESS-SIGN"), Some(expected.as_str()), "bad signature for {}", self.path);
    }
}

type Responder = dyn Fn(&CapturedRequest) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    responder: Arc<Responder>,
}

/// Handle to a running mock exchange.
pub struct MockExchange {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockExchange {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let captured = CapturedRequest {
        method: method.to_string(),
        path: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body,
    };

    let (status, body) = (state.responder)(&captured);
    state.requests.lock().unwrap().push(captured);
    (StatusCode::from_u16(status).unwrap(), body)
}

/// Start a programmable mock exchange on an ephemeral port.
pub async fn start_mock_exchange<F>(responder: F) -> MockExchange
where
    F: Fn(&CapturedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = MockState {
        requests: requests.clone(),
        responder: Arc::new(responder),
    };
    let app = Router::new().fallback(handle).with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockExchange {
        base_url: format!("http://{}", addr),
        requests,
    }
}

/// Start a server that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_stalled_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    });

    format!("http://{}", addr)
}

/// Success envelope around `data`.
#[allow(dead_code)]
pub fn ok_body(data: serde_json::Value) -> String {
    serde_json::json!({"code": "0", "msg": "", "data": data}).to_string()
}

pub fn test_client(base_url: &str, project: Option<&str>) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 1,
        ..ApiConfig::default()
    };
    let credentials = Credentials::new(
        "test-key",
        SECRET,
        "test-passphrase",
        project.map(str::to_string),
    )
    .unwrap();
    ApiClient::new(&config, credentials).unwrap()
}
