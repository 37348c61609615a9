//! Shared fixtures for the integration tests: a scripted stand-in for the
//! ORCID, embedding and chat services, served over real HTTP.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use infrastructure::config::Config;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Embedding returned for the user's profile text.
pub const USER_VECTOR: [f32; 2] = [1.0, 0.0];

/// What the mock upstream answers.
#[derive(Clone)]
pub struct UpstreamScript {
    pub orcid_status: StatusCode,
    pub researchers: Value,
    pub embedding_status: StatusCode,
    /// Cosine similarity every researcher text gets against the user text.
    pub candidate_similarity: f32,
    pub synthesis: String,
    pub narrative: String,
}

impl Default for UpstreamScript {
    fn default() -> Self {
        Self {
            orcid_status: StatusCode::OK,
            researchers: json!([researcher("0000-0002-1825-0097", "Ada Lovelace")]),
            embedding_status: StatusCode::OK,
            candidate_similarity: 0.92,
            synthesis: "[]".to_string(),
            narrative: "Graduates move into applied research roles.".to_string(),
        }
    }
}

/// Requests seen by the mock, for assertions.
#[derive(Default)]
pub struct Recorded {
    pub searches: Vec<String>,
    pub embeddings: Vec<String>,
    pub chat_requests: Vec<Value>,
}

struct Upstream {
    script: UpstreamScript,
    recorded: Arc<Mutex<Recorded>>,
}

pub struct MockUpstream {
    pub base_url: String,
    pub recorded: Arc<Mutex<Recorded>>,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    pub async fn start(script: UpstreamScript) -> anyhow::Result<Self> {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = Arc::new(Upstream {
            script,
            recorded: recorded.clone(),
        });
        let app = Router::new()
            .route("/search/", get(search))
            .route("/v1/embeddings", post(embeddings))
            .route("/v1/chat/completions", post(chat))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            base_url,
            recorded,
            handle,
        })
    }

    /// Config pointing every client at this server.
    pub fn config(&self, api_key: Option<&str>) -> Config {
        Config {
            orcid_base_url: self.base_url.clone(),
            llm_api_key: api_key.map(str::to_string),
            llm_base_url: self.base_url.clone(),
            ..Config::default()
        }
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A search result entry in the ORCID expanded-search shape.
pub fn researcher(orcid: &str, name: &str) -> Value {
    json!({
        "orcid-identifier": { "path": orcid, "uri": format!("https://orcid.org/{orcid}") },
        "name": { "value": name },
        "summary": [{ "value": "Program synthesis and neural code models" }],
        "keywords": { "value": "machine learning" }
    })
}

async fn search(
    State(upstream): State<Arc<Upstream>>,
    axum::extract::Query(params): axum::extract::Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Value>) {
    let query = params
        .into_iter()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value)
        .unwrap_or_default();
    upstream.recorded.lock().unwrap().searches.push(query);

    let script = &upstream.script;
    if !script.orcid_status.is_success() {
        return (script.orcid_status, Json(json!({ "error": "unavailable" })));
    }
    (
        StatusCode::OK,
        Json(json!({ "result": script.researchers, "num-found": 1 })),
    )
}

async fn embeddings(
    State(upstream): State<Arc<Upstream>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let text = body["input"][0].as_str().unwrap_or_default().to_string();
    let status = upstream.script.embedding_status;
    if !status.is_success() {
        upstream.recorded.lock().unwrap().embeddings.push(text);
        return (status, Json(json!({ "error": "embedding backend down" })));
    }
    let vector = if text.starts_with("Computer Science") {
        USER_VECTOR.to_vec()
    } else {
        let s = upstream.script.candidate_similarity;
        vec![s, (1.0 - s * s).max(0.0).sqrt()]
    };
    upstream.recorded.lock().unwrap().embeddings.push(text);
    (
        StatusCode::OK,
        Json(json!({ "data": [{ "embedding": vector }] })),
    )
}

async fn chat(State(upstream): State<Arc<Upstream>>, Json(body): Json<Value>) -> Json<Value> {
    let content = if body.get("response_format").is_some() {
        upstream.script.synthesis.clone()
    } else {
        upstream.script.narrative.clone()
    };
    upstream.recorded.lock().unwrap().chat_requests.push(body);
    Json(json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }))
}
