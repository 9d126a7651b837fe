use std::sync::Arc;

use auth::Authenticator;
use auth::SigningSecret;
use auth::TokenCodec;
use session_service::domain::session::guard::AccessGuard;
use session_service::domain::session::models::Role;
use session_service::domain::session::service::AuthService;
use session_service::inbound::http::router::create_router;
use session_service::inbound::http::session::CookieSettings;
use session_service::outbound::repositories::InMemoryUserStore;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application with the default five minute session lifetime
    pub async fn spawn() -> Self {
        Self::spawn_with_ttl(chrono::Duration::minutes(5)).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_ttl(ttl: chrono::Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let secret = SigningSecret::new(TEST_SECRET).expect("Test secret is not empty");
        let authenticator = Arc::new(Authenticator::new(&secret, ttl));

        let store = Arc::new(InMemoryUserStore::new());
        let auth_service = Arc::new(AuthService::new(store, Arc::clone(&authenticator)));
        let guard = Arc::new(AccessGuard::new(authenticator, Role::ALL));

        let router = create_router(auth_service, guard, CookieSettings::new("token", false));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: Self::client(),
            token_codec: TokenCodec::new(&secret),
        }
    }

    /// Fresh client with its own cookie jar
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create reqwest client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Register a user, panicking unless the server answers 201
    pub async fn register(&self, name: &str, email: &str, password: &str, role: Option<&str>) {
        let mut body = serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        });
        if let Some(role) = role {
            body["role"] = serde_json::Value::from(role);
        }

        let response = self
            .post("/api/v1/register")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in through the shared client, which keeps the session cookie
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Extract the session token from a login response's Set-Cookie header
pub fn session_token(response: &reqwest::Response) -> String {
    let cookie = response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("Missing Set-Cookie header")
        .to_str()
        .expect("Set-Cookie is not ASCII");

    cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("token="))
        .expect("Set-Cookie does not carry the session token")
        .to_string()
}
