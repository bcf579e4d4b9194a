//! Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use tempfile::TempDir;

use lg_api::{AppState, HttpSettings};
use lg_core::repositories::{InMemoryCourseRepository, InMemoryUserRepository};
use lg_infra::{LocalFileStorage, MockEmailService};
use lg_shared::{AppConfig, UploadConfig};

pub type TestState =
    AppState<InMemoryUserRepository, InMemoryCourseRepository, MockEmailService, LocalFileStorage>;

pub const ADMIN_EMAIL: &str = "admin@learngate.test";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const BOUNDARY: &str = "----learngate-test";
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub email: Arc<MockEmailService>,
    pub settings: HttpSettings,
    pub uploads: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let uploads = tempfile::tempdir().unwrap();

        let mut config = AppConfig::development();
        config.auth.bcrypt_cost = 4;
        config.upload = UploadConfig::new(uploads.path()).with_max_file_bytes(64 * 1024);

        let email = Arc::new(MockEmailService::new());
        let storage = Arc::new(LocalFileStorage::new(&config.upload).await.unwrap());
        let state = web::Data::new(AppState::new(
            &config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryCourseRepository::new()),
            Arc::clone(&email),
            storage,
            "memory",
        ));

        let settings = HttpSettings {
            environment: config.environment,
            cors: config.cors.clone(),
            max_payload_size: config.server.max_payload_size,
        };

        Self {
            state,
            email,
            settings,
            uploads,
        }
    }

    /// Provision the administrator account directly through the service
    pub async fn create_admin(&self) {
        self.state
            .auth_service
            .ensure_admin("Admin", ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
    }
}

/// Build a multipart body. Files are `(field, file name, content type, bytes)`.
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (name, value) in fields {
        out.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        out.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
        out.extend_from_slice(value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    for (name, file_name, content_type, data) in files {
        out.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        out.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                name, file_name, content_type
            )
            .as_bytes(),
        );
        out.extend_from_slice(data);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    out
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (actix_web::http::header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Send a request and decode the JSON body: `(status, body)`
#[macro_export]
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}

/// Log in and return the session token taken from the cookie
#[macro_export]
macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(serde_json::json!({ "email": $email, "password": $password }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "jwt")
            .expect("session cookie");
        cookie.value().to_string()
    }};
}

/// Register, verify with the mailed code and return `(user id, token)`
#[macro_export]
macro_rules! sign_up {
    ($app:expr, $ctx:expr, $name:expr, $email:expr, $password:expr) => {{
        let (status, _) = $crate::call_json!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/users/register")
                .set_json(serde_json::json!({
                    "name": $name,
                    "email": $email,
                    "password": $password,
                }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED);

        let otp = $ctx.email.last_code_for($email).expect("verification code");
        let (status, body) = $crate::call_json!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/users/verify-otp")
                .set_json(serde_json::json!({ "email": $email, "otp": otp }))
        );
        assert_eq!(status, actix_web::http::StatusCode::OK);
        let user_id = body["user"]["_id"].as_str().unwrap().to_string();
        let token = $crate::login!($app, $email, $password);
        (user_id, token)
    }};
}

/// `POST /api/courses` with a PNG cover and one ten-minute chapter
pub fn course_form(token: &str, title: &str, category: &str) -> actix_web::test::TestRequest {
    let chapters = r#"[{"title":"Introduction","videoUrl":"https://videos.example.com/intro.mp4","duration":10}]"#;
    let body = multipart_body(
        &[
            ("title", title),
            ("description", "A complete walkthrough"),
            ("instructor", "Tigist"),
            ("category", category),
            ("chapters", chapters),
        ],
        &[("coverImage", "cover.png", "image/png", PNG_BYTES)],
    );
    actix_web::test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(bearer(token))
        .insert_header((actix_web::http::header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(body)
}
