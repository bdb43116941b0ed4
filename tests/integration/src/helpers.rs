//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use notes_api::{create_app, create_app_state, create_in_memory_app_state};
use notes_common::{AppConfig, HasherConfig};
use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    /// Start a test server backed by in-memory stores
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start an in-memory test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_in_memory_app_state(config)?;
        Self::serve(create_app(state)).await
    }

    /// Start a test server backed by PostgreSQL at `DATABASE_URL`
    pub async fn start_postgres() -> Result<Self> {
        let mut config = test_config();
        config.database.url = Some(std::env::var("DATABASE_URL")?);
        let state = create_app_state(config).await?;
        Self::serve(create_app(state)).await
    }

    async fn serve(app: axum::Router) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request carrying the refresh cookie
    pub async fn put_with_refresh_cookie(&self, path: &str, refresh_token: &str) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .header(header::COOKIE, format!("refresh-token={refresh_token}"))
            .send()
            .await?)
    }
}

/// Create a test configuration
///
/// Uses a fixed secret and a cheap argon2 work factor.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.jwt.secret = "integration-test-secret".to_string();
    config.hasher = HasherConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    config
}

/// Helper to check if a database is available for Postgres-backed tests
pub fn check_database_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Value of the `refresh-token` cookie set by a response, if any
pub fn refresh_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("refresh-token="))
        .and_then(|rest| rest.split(';').next())
        .map(str::to_string)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
