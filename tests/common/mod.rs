#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use axum::body::{to_bytes, Body};
use axum::extract::{Path, Request, State};
use axum::http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const HELLO_DIGEST: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// One request as seen by the fixture store.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct StoreState {
    hashes: HashMap<String, (String, Value)>,
    publishers: HashMap<String, Value>,
    selves: HashMap<String, Value>,
    raw: HashMap<String, String>,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<StoreState>>;

/// In-process metadata store speaking the hashref HTTP protocol.
pub struct FixtureStore {
    addr: SocketAddr,
    state: Shared,
}

impl FixtureStore {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture store");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let addr = listener.local_addr().expect("fixture addr");
        let state: Shared = Arc::default();
        let app = router(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("fixture runtime");
            rt.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("fixture listener");
                let _ = axum::serve(listener, app).await;
            });
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().expect("store lock").requests.clone()
    }

    pub fn put_hash(&self, digest: &str, publisher: &str, doc: Value) {
        self.state
            .lock()
            .expect("store lock")
            .hashes
            .insert(digest.to_string(), (publisher.to_string(), doc));
    }

    /// Serve `body` verbatim with status 200 for `GET path`.
    pub fn put_raw(&self, path: &str, body: &str) {
        self.state
            .lock()
            .expect("store lock")
            .raw
            .insert(path.to_string(), body.to_string());
    }

    pub fn hash_doc(&self, digest: &str) -> Option<Value> {
        self.state
            .lock()
            .expect("store lock")
            .hashes
            .get(digest)
            .map(|(_, doc)| doc.clone())
    }

    pub fn publisher_doc(&self, id: &str) -> Option<Value> {
        self.state
            .lock()
            .expect("store lock")
            .publishers
            .get(id)
            .cloned()
    }

    pub fn self_doc(&self, publisher: &str) -> Option<Value> {
        self.state
            .lock()
            .expect("store lock")
            .selves
            .get(publisher)
            .cloned()
    }
}

/// Address nothing listens on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}

fn router(state: Shared) -> Router {
    Router::new()
        .route(
            "/api/hash/:digest",
            get(get_hash).post(set_hash).delete(delete_hash),
        )
        .route(
            "/api/hash/:digest/publisher/:publisher",
            get(get_hash_for_publisher),
        )
        .route("/api/publisher/:id", post(set_publisher))
        .route("/api/self", get(get_self).post(set_self))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

/// Record every request, serve raw overrides, and reject missing credentials.
async fn record(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body: String::from_utf8_lossy(&bytes).to_string(),
    };
    let missing_auth = recorded.authorization.as_deref().unwrap_or("").is_empty();
    let raw = {
        let mut st = state.lock().expect("store lock");
        let raw = (parts.method == Method::GET)
            .then(|| st.raw.get(&recorded.path).cloned())
            .flatten();
        st.requests.push(recorded);
        raw
    };
    if let Some(raw) = raw {
        return (StatusCode::OK, raw).into_response();
    }
    if missing_auth {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "missing authorization"})),
        )
            .into_response();
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn credential(headers: &HeaderMap) -> String {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response()
}

fn bad_json() -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({"error": "bad json"}))).into_response()
}

fn stored() -> Response {
    Json(json!({})).into_response()
}

async fn get_hash(State(state): State<Shared>, Path(digest): Path<String>) -> Response {
    match state.lock().expect("store lock").hashes.get(&digest) {
        Some((_, doc)) => Json(doc.clone()).into_response(),
        None => not_found(),
    }
}

async fn get_hash_for_publisher(
    State(state): State<Shared>,
    Path((digest, publisher)): Path<(String, String)>,
) -> Response {
    match state.lock().expect("store lock").hashes.get(&digest) {
        Some((owner, doc)) if *owner == publisher => Json(doc.clone()).into_response(),
        _ => not_found(),
    }
}

async fn set_hash(
    State(state): State<Shared>,
    Path(digest): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let Ok(doc) = serde_json::from_str::<Value>(&body) else {
        return bad_json();
    };
    state
        .lock()
        .expect("store lock")
        .hashes
        .insert(digest, (credential(&headers), doc));
    stored()
}

async fn delete_hash(State(state): State<Shared>, Path(digest): Path<String>) -> Response {
    match state.lock().expect("store lock").hashes.remove(&digest) {
        Some(_) => stored(),
        None => not_found(),
    }
}

async fn set_publisher(
    State(state): State<Shared>,
    Path(id): Path<String>,
    body: String,
) -> Response {
    let Ok(doc) = serde_json::from_str::<Value>(&body) else {
        return bad_json();
    };
    state.lock().expect("store lock").publishers.insert(id, doc);
    stored()
}

async fn get_self(State(state): State<Shared>, headers: HeaderMap) -> Response {
    match state
        .lock()
        .expect("store lock")
        .selves
        .get(&credential(&headers))
    {
        Some(doc) => Json(doc.clone()).into_response(),
        None => not_found(),
    }
}

async fn set_self(State(state): State<Shared>, headers: HeaderMap, body: String) -> Response {
    let Ok(doc) = serde_json::from_str::<Value>(&body) else {
        return bad_json();
    };
    state
        .lock()
        .expect("store lock")
        .selves
        .insert(credential(&headers), doc);
    stored()
}

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work).expect("create work dir");

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            work,
            cargo_home,
            rustup_home,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("hashref");
        cmd.current_dir(&self.work)
            .env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env_remove("HASHREF_PUBLISHER")
            .env_remove("HASHREF_DEFAULT_META")
            .env_remove("HASHREF_SERVER")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write `~/.hashref` pointing at `server`.
    pub fn write_config(&self, server: &str, publisher: &str, default_meta: Value) {
        let cfg = serde_json::json!({
            "HASHREF_PUBLISHER": publisher,
            "HASHREF_DEFAULT_META": default_meta,
            "HASHREF_SERVER": server,
        });
        fs::write(
            self.home.join(".hashref"),
            serde_json::to_string_pretty(&cfg).expect("serialize config"),
        )
        .expect("write config");
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let p = self.work.join(name);
        fs::write(&p, content).expect("write work file");
        p
    }

    /// Run with `-o -` so results land on stdout.
    pub fn run_stdout(&self, args: &[&str]) -> (bool, String) {
        let out = self
            .cmd()
            .args(["-o", "-"])
            .args(args)
            .output()
            .expect("run hashref");
        (
            out.status.success(),
            String::from_utf8(out.stdout).expect("utf8 stdout"),
        )
    }
}
