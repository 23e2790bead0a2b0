//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port with a temporary
//! knowledge directory, a temporary static directory, and an
//! `httpmock::MockServer` standing in for the OpenAI API.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use cjm_builder_server::{
    config::AppConfig,
    router,
    state::{build_app_state, AppState},
};
use cjm_builder_test_utils::write_docx;
use httpmock::{Method, MockServer};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::{fs, net::SocketAddr, path::PathBuf};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const TEST_PASSWORD: &str = "open-sesame";
pub const CHAT_PATH: &str = "/v1/chat/completions";

/// Knobs for `TestApp::spawn_with`.
#[derive(Clone, Debug)]
pub struct TestOptions {
    pub password: Option<&'static str>,
    pub api_key: bool,
    pub index_html: Option<&'static str>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            password: None,
            api_key: true,
            index_html: Some("<!doctype html><title>CJM Builder</title>"),
        }
    }
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    /// A client with a cookie store, so sessions persist across requests.
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _knowledge_dir: TempDir,
    _static_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application with no password and a configured API key.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(TestOptions::default()).await
    }

    pub async fn spawn_with(options: TestOptions) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();

        let knowledge_dir = tempdir()?;
        write_docx(
            &knowledge_dir.path().join("interviews.docx"),
            &["요금제가 너무 많아요"],
            &[vec![vec!["단계", "불편"], vec!["방문", "대기 시간"]]],
        )?;
        let static_dir = tempdir()?;
        if let Some(html) = options.index_html {
            fs::write(static_dir.path().join("index.html"), html)?;
        }

        let config = AppConfig {
            port: 0,
            public: false,
            openai_api_key: options.api_key.then(|| "sk-test".to_string()),
            openai_api_url: mock_server.url(CHAT_PATH),
            openai_model: "gpt-4o".to_string(),
            site_password: options.password.map(String::from),
            session_secret: "test-session-secret".to_string(),
            railway_environment: None,
            knowledge_dir: knowledge_dir.path().to_path_buf(),
            static_dir: static_dir.path().to_path_buf(),
        };
        let app_state = build_app_state(config)?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::builder().cookie_store(true).build()?,
            mock_server,
            app_state: app_state_for_harness,
            _knowledge_dir: knowledge_dir,
            _static_dir: static_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post_json(&self, path: &str, body: Value) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(&body).send().await?)
    }

    pub async fn status(&self) -> Result<Value> {
        Ok(self.get("/api/status").await?.json().await?)
    }

    pub async fn login(&self, password: &str) -> Result<Response> {
        self.post_json("/api/login", json!({ "password": password }))
            .await
    }

    /// Programs the mock OpenAI endpoint to answer with `content`.
    pub fn mock_completion(&self, content: &str, finish_reason: &str) -> httpmock::Mock<'_> {
        let body = json!({
            "choices": [{
                "message": {"role": "assistant", "content": content},
                "finish_reason": finish_reason
            }]
        });
        self.mock_server.mock(|when, then| {
            when.method(Method::POST).path(CHAT_PATH);
            then.status(200).json_body(body);
        })
    }

    /// Programs the mock OpenAI endpoint to fail with an error envelope.
    pub fn mock_failure(&self, status: u16, kind: &str, code: &str) -> httpmock::Mock<'_> {
        let body = json!({
            "error": {"message": format!("upstream {code}"), "type": kind, "code": code}
        });
        self.mock_server.mock(|when, then| {
            when.method(Method::POST).path(CHAT_PATH);
            then.status(status).json_body(body);
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Asserts the response is a JSON error with the given status and returns its message.
pub async fn expect_error(response: Response, status: u16) -> Result<String> {
    assert_eq!(response.status().as_u16(), status);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content type: {content_type}"
    );
    let body: Value = response.json().await?;
    Ok(body["error"]
        .as_str()
        .expect("error field should be a string")
        .to_string())
}
