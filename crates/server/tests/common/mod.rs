//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port. It can be wired to an
//! `httpmock::MockServer` speaking the OpenAI wire format, or directly to a
//! scripted `MockAiProvider`.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use licensescan::LicenseExtractorBuilder;
use licensescan_server::{
    config::{self, AppConfig},
    router,
    state::{build_app_state, AppState},
};
use licensescan_test_utils::MockAiProvider;
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const CHAT_PATH: &str = "/v1/chat/completions";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// Writes a config file pointing the OpenAI provider at the mock server and loads it.
fn load_test_config(mock_server: &MockServer) -> Result<(AppConfig, TempDir)> {
    let config_dir = tempdir()?;
    let config_path = config_dir.path().join("config.yml");
    let config_content = format!(
        r#"
port: 0
ai_provider: "openai"
ai_api_url: "{}"
ai_model: "gpt-4o"
ai_api_key: "test-key"
request_timeout_secs: 5
"#,
        mock_server.url(CHAT_PATH)
    );
    let mut file = File::create(&config_path)?;
    file.write_all(config_content.as_bytes())?;

    let config = config::get_config(Some(config_path.to_str().unwrap()))?;
    Ok((config, config_dir))
}

impl TestApp {
    /// Spawns the server with the OpenAI provider pointed at a fresh mock server.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start();
        let (config, config_dir) = load_test_config(&mock_server)?;
        let app_state = build_app_state(config)?;
        Self::spawn_with_state(app_state, mock_server, config_dir).await
    }

    /// Spawns the server around a scripted provider.
    pub async fn spawn_with_provider(provider: MockAiProvider) -> Result<Self> {
        Self::spawn_with_provider_and_config(provider, |_| {}).await
    }

    /// Spawns the server around a scripted provider after adjusting the loaded config.
    pub async fn spawn_with_provider_and_config(
        provider: MockAiProvider,
        configure: impl FnOnce(&mut AppConfig),
    ) -> Result<Self> {
        let mock_server = MockServer::start();
        let (mut config, config_dir) = load_test_config(&mock_server)?;
        configure(&mut config);
        let extractor = LicenseExtractorBuilder::new()
            .ai_provider(Box::new(provider))
            .max_tokens(config.max_tokens)
            .build()?;
        let app_state = AppState::new(config, extractor);
        Self::spawn_with_state(app_state, mock_server, config_dir).await
    }

    async fn spawn_with_state(
        app_state: AppState,
        mock_server: MockServer,
        config_dir: TempDir,
    ) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

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

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Posts a JSON value to `/extract` and returns the status code and parsed body.
    pub async fn post_extract(&self, payload: &Value) -> Result<(u16, Value)> {
        self.post_extract_raw(payload.to_string()).await
    }

    /// Posts a raw body to `/extract` with a JSON content type.
    pub async fn post_extract_raw(&self, body: impl Into<reqwest::Body>) -> Result<(u16, Value)> {
        let response = self
            .client
            .post(format!("{}/extract", self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await?;
        Ok((status, body))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// An OpenAI chat completion body with a single assistant message.
pub fn chat_completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}
