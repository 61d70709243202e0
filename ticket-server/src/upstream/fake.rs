//! In-memory ticket source for tests.

use std::sync::Mutex;
use std::time::Duration;

use axum::{Router, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use super::client::TicketSource;
use super::error::UpstreamError;
use super::request::TicketRequest;

/// Serves a canned response instead of calling upstream.
#[derive(Debug)]
pub(crate) struct FakeSource {
    reply: Reply,
    /// Query strings of every request seen, in order.
    pub(crate) seen: Mutex<Vec<String>>,
}

#[derive(Debug)]
enum Reply {
    Body(Vec<u8>),
    Status(u16),
    Hang,
}

impl FakeSource {
    /// Respond with `body` verbatim.
    pub(crate) fn body(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Reply::Body(body.into()))
    }

    /// Respond with a successful envelope around `records`.
    pub(crate) fn records(records: Vec<Value>) -> Self {
        Self::body(envelope(records))
    }

    /// Fail as if upstream returned `status`.
    pub(crate) fn status(status: u16) -> Self {
        Self::new(Reply::Status(status))
    }

    /// Never respond.
    pub(crate) fn hang() -> Self {
        Self::new(Reply::Hang)
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl TicketSource for FakeSource {
    async fn fetch(&self, request: &TicketRequest) -> Result<Vec<u8>, UpstreamError> {
        self.seen.lock().unwrap().push(request.query_string());

        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status) => Err(UpstreamError::Status {
                status: *status,
                message: "busy".into(),
            }),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(UpstreamError::EmptyBody)
            }
        }
    }
}

/// Serialize a successful query envelope.
pub(crate) fn envelope(records: Vec<Value>) -> Vec<u8> {
    json!({
        "httpstatus": 200,
        "status": true,
        "messages": [],
        "data": { "result": records },
    })
    .to_string()
    .into_bytes()
}

/// A well-formed 40-field record.
pub(crate) fn record(train: &str, from: &str, to: &str, departure: &str, duration: &str) -> Value {
    let mut fields = vec![""; 40];
    fields[3] = train;
    fields[6] = from;
    fields[7] = to;
    fields[8] = departure;
    fields[10] = duration;
    fields[39] = "O055300213M093500005";
    Value::String(fields.join("|"))
}

/// A local endpoint that accepts connections and never answers.
pub(crate) async fn silent_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}/query")
}

/// A local endpoint that answers every request with `body`.
pub(crate) async fn serving_endpoint(body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route(
        "/query",
        get(move || {
            let body = body.clone();
            async move { body }
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/query")
}
