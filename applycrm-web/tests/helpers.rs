//! Integration test helpers: spawn the app on an ephemeral port

#![allow(dead_code)]

use applycrm_web::{AppState, WebConfig};
use serde_json::{json, Value};
use std::sync::LazyLock;
use tokio::net::TcpListener;

// Ensure tracing is only initialized once
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

/// A running server seen through one cookie-carrying client
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Same server, but a separate browser with an empty cookie jar
    pub fn another_client(&self) -> TestApp {
        TestApp {
            address: self.address.clone(),
            port: self.port,
            api_client: build_client(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(&self, email: &str, password: &str, portal: &str) -> reqwest::Response {
        self.post_json(
            "/api/auth/login",
            &json!({"email": email, "password": password, "portal": portal}),
        )
        .await
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/auth/logout", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn session_state(&self) -> Value {
        self.get("/api/auth/session")
            .await
            .json()
            .await
            .expect("Session response is JSON")
    }
}

/// Start a test application with the demo directory
pub async fn spawn_app() -> TestApp {
    spawn_app_with_config(WebConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        dev_mode: true,
        config_path: None,
    })
    .await
}

pub async fn spawn_app_with_config(config: WebConfig) -> TestApp {
    LazyLock::force(&TRACING);

    let state = AppState::new(config).unwrap();
    let app = applycrm_web::create_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        port,
        api_client: build_client(),
    }
}

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap()
}

/// Assert the response redirects to the login page
pub fn assert_is_redirect_to_login(response: &reqwest::Response) {
    assert_eq!(response.status().as_u16(), 307, "{}", response.url());
    assert_eq!(response.headers().get("Location").unwrap(), "/login");
}
