#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module provides test infrastructure that uses the REAL kernel code,
//! not mock implementations. Each [`TestApp`] owns its own in-memory session
//! store, so tests never share login state.

#![allow(dead_code)]

use std::sync::LazyLock;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use adminlte_kernel::models::{AdminUser, UserDirectory, hash_password};
use adminlte_kernel::theme::ThemeEngine;
use adminlte_kernel::{AppState, Config, routes, views};

/// Password shared by every test account that has one.
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Number of filler accounts after the three named ones.
pub const FILLER_USERS: usize = 25;

/// Argon2 hashing is slow in debug builds; hash once per test binary.
static PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password(TEST_PASSWORD).expect("Failed to hash test password"));

/// Accounts: `admin` (staff), `viewer` (not staff), `retired` (staff but
/// inactive), then `user01`..`user25` without passwords.
pub fn test_users() -> UserDirectory {
    let mut admin = AdminUser::new("admin");
    admin.first_name = "Ada".to_string();
    admin.last_name = "Lovelace".to_string();
    admin.is_staff = true;
    admin.date_joined = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single();
    admin.password = PASSWORD_HASH.clone();

    let mut viewer = AdminUser::new("viewer");
    viewer.password = PASSWORD_HASH.clone();

    let mut retired = AdminUser::new("retired");
    retired.is_staff = true;
    retired.is_active = false;
    retired.password = PASSWORD_HASH.clone();

    let mut users = vec![admin, viewer, retired];
    users.extend((1..=FILLER_USERS).map(|i| AdminUser::new(format!("user{i:02}"))));

    UserDirectory::new(users).expect("Failed to build test users")
}

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application mounted at `/admin`.
    pub fn new() -> Self {
        Self::with_config(Config {
            secure_cookies: false,
            ..Config::default()
        })
    }

    /// Create a test application from `config`, with the test users and the
    /// built-in views and templates.
    pub fn with_config(config: Config) -> Self {
        let registry = views::builtin_views().expect("Failed to register views");
        let theme = ThemeEngine::builtin().expect("Failed to load templates");
        let state = AppState::from_parts(config, registry, test_users(), theme)
            .expect("Failed to initialize AppState");

        // Build the REAL router (same as main.rs)
        let router = routes::app(state.clone());

        Self { router, state }
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn request_with_cookies(
        &self,
        mut request: Request<Body>,
        cookies: &str,
    ) -> Response {
        if !cookies.is_empty() {
            request.headers_mut().insert(
                header::COOKIE,
                cookies.parse().expect("Invalid cookie header"),
            );
        }
        self.request(request).await
    }

    pub async fn get(&self, uri: &str, cookies: &str) -> Response {
        self.request_with_cookies(Request::get(uri).body(Body::empty()).unwrap(), cookies)
            .await
    }

    /// Submit the login form.
    pub async fn post_login(&self, uri: &str, username: &str, password: &str) -> Response {
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("username", username)
            .append_pair("password", password)
            .finish();

        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
    }

    /// Log in and return the session cookie.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self.post_login("/admin/login", username, password).await;

        assert_eq!(
            response.status(),
            StatusCode::SEE_OTHER,
            "Login failed for user '{username}' (status {})",
            response.status()
        );

        extract_cookies(&response)
    }

    /// Log in as the staff account.
    pub async fn login_staff(&self) -> String {
        self.login("admin", TEST_PASSWORD).await
    }
}

/// Extract the `name=value` part of every Set-Cookie header.
pub fn extract_cookies(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| {
            // Extract just the cookie name=value, ignoring attributes
            cookie.split(';').next()
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// The `Location` header of a redirect.
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response has no Location header")
        .to_str()
        .unwrap()
}

pub async fn response_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}

pub async fn response_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        let text = String::from_utf8_lossy(&body);
        panic!("Failed to parse JSON: {text}");
    })
}
