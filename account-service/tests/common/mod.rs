use std::sync::Arc;

use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::cors_layer;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::session::SessionCookiePolicy;
use account_service::outbound::repositories::InMemoryAccountRepository;
use auth::Authenticator;
use auth::ManualClock;
use auth::PasswordHasher;
use auth::TokenConfig;
use chrono::DateTime;
use reqwest::header::COOKIE;
use reqwest::header::SET_COOKIE;
use serde_json::json;
use serde_json::Value;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-for-jwt-signing-32-bytes";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-for-jwt-signing-32-bytes";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub repository: InMemoryAccountRepository,
    pub clock: Arc<ManualClock>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = InMemoryAccountRepository::new();
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));

        // Low bcrypt cost keeps the suite fast
        let account_service = Arc::new(AccountService::new(
            Arc::new(repository.clone()),
            PasswordHasher::bcrypt(4),
        ));
        let authenticator = Arc::new(Authenticator::new(
            TokenConfig::new(ACCESS_SECRET, REFRESH_SECRET).unwrap(),
            clock.clone(),
        ));

        let router = create_router(
            account_service,
            authenticator,
            SessionCookiePolicy::new(false),
            cors_layer("http://localhost:3000").unwrap(),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            clock,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request carrying the session cookie
    pub fn get_with_cookie(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(COOKIE, format!("token={}", token))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register an account and return the token from the session cookie
    pub async fn register(&self, resource: &str, body: &Value) -> String {
        let response = self
            .post(&format!("/api/v1/{}/register", resource))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        session_token(&response).expect("No session cookie on registration")
    }

    pub async fn register_user(&self, email: &str) -> String {
        self.register("user", &user_body(email, "secret1")).await
    }

    pub async fn register_captain(&self, email: &str) -> String {
        self.register("captain", &captain_body(email, "secret1")).await
    }
}

pub fn user_body(email: &str, password: &str) -> Value {
    json!({
        "fullname": { "firstname": "Alice", "lastname": "Smith" },
        "email": email,
        "password": password
    })
}

pub fn captain_body(email: &str, password: &str) -> Value {
    json!({
        "fullname": { "firstname": "Carol" },
        "email": email,
        "password": password,
        "vehicle": {
            "color": "black",
            "plate": "KA01AB1234",
            "capacity": 4,
            "vehicleType": "car"
        }
    })
}

/// Raw `Set-Cookie` header for the session cookie, if the response set one
pub fn session_set_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("token="))
        .map(str::to_string)
}

/// Value of the session cookie set by the response
pub fn session_token(response: &reqwest::Response) -> Option<String> {
    session_set_cookie(response).map(|header| {
        header
            .trim_start_matches("token=")
            .split(';')
            .next()
            .unwrap_or_default()
            .to_string()
    })
}

/// Change the last character of a token
pub fn tamper(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    if let Some(last) = chars.last_mut() {
        *last = if *last == 'A' { 'B' } else { 'A' };
    }
    chars.into_iter().collect()
}
