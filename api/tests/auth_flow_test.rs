//! Integration tests for registration, verification, login and password reset

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{bearer, TestContext};
use lg_api::create_app;

#[actix_web::test]
async fn test_register_verify_and_login_sets_session_cookie() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(json!({
            "name": "Abebe",
            "email": "abebe@example.com",
            "password": "secret123",
            "freshOrRemedial": "Fresh Man",
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "abebe@example.com");
    assert_eq!(ctx.email.count(), 1);

    let otp = ctx.email.last_code_for("abebe@example.com").unwrap();
    let req = test::TestRequest::post()
        .uri("/api/users/verify-otp")
        .set_json(json!({ "email": "abebe@example.com", "otp": otp }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp.response().cookies().find(|c| c.name() == "jwt").unwrap();
    assert_eq!(cookie.http_only(), Some(true));
    assert!(!cookie.value().is_empty());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email verified successfully");
    assert_eq!(body["user"]["isVerified"], true);
    assert_eq!(body["user"]["subscriptionStatus"], "trial");
    assert!(body["user"].get("password").is_none());

    let token = login!(app, "abebe@example.com", "secret123");
    let (status, body) = call_json!(
        app,
        test::TestRequest::get().uri("/api/users/me").insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "abebe@example.com");
}

#[actix_web::test]
async fn test_session_cookie_authenticates_requests() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    let (_, token) = sign_up!(app, ctx, "Hana", "hana@example.com", "secret123");

    let (status, body) = call_json!(
        app,
        test::TestRequest::get()
            .uri("/api/users/me")
            .cookie(actix_web::cookie::Cookie::new("jwt", token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Hana");
}

#[actix_web::test]
async fn test_duplicate_registration_is_rejected() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    let request = json!({ "name": "Sara", "email": "sara@example.com", "password": "secret123" });

    let (status, _) = call_json!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(&request)
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(&request)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DUPLICATE_VALUE");
}

#[actix_web::test]
async fn test_login_before_verification_is_unauthorized() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;

    let (status, _) = call_json!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(json!({
            "name": "Lidya",
            "email": "lidya@example.com",
            "password": "secret123",
        }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "lidya@example.com", "password": "secret123" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "EMAIL_NOT_VERIFIED");
}

#[actix_web::test]
async fn test_wrong_password_and_unknown_email_share_a_message() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    sign_up!(app, ctx, "Kebede", "kebede@example.com", "secret123");

    let (status, wrong_password) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "kebede@example.com", "password": "not-it" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, unknown) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "nobody@example.com", "password": "secret123" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password["message"], unknown["message"]);
    assert_eq!(unknown["message"], "Invalid email or password");
}

#[actix_web::test]
async fn test_wrong_otp_is_rejected() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;

    call_json!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(json!({
            "name": "Dawit",
            "email": "dawit@example.com",
            "password": "secret123",
        }))
    );
    let real = ctx.email.last_code_for("dawit@example.com").unwrap();
    let wrong = if real == "000000" { "111111" } else { "000000" };

    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users/verify-otp")
            .set_json(json!({ "email": "dawit@example.com", "otp": wrong }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP_INVALID");
}

#[actix_web::test]
async fn test_repeated_wrong_otp_burns_the_code() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;

    call_json!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(json!({
            "name": "Selam",
            "email": "selam@example.com",
            "password": "secret123",
        }))
    );
    let real = ctx.email.last_code_for("selam@example.com").unwrap();
    let wrong = if real == "000000" { "111111" } else { "000000" };
    let attempt = |otp: &str| {
        test::TestRequest::post()
            .uri("/api/users/verify-otp")
            .set_json(json!({ "email": "selam@example.com", "otp": otp }))
    };

    for _ in 0..4 {
        let (status, body) = call_json!(app, attempt(wrong));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "OTP_INVALID");
    }
    let (status, body) = call_json!(app, attempt(wrong));
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "OTP_ATTEMPTS_EXCEEDED");

    let (status, _) = call_json!(app, attempt(real.as_str()));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_logout_clears_cookie() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;

    let req = test::TestRequest::post().uri("/api/users/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(actix_web::http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("jwt=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logged out successfully");
}

#[actix_web::test]
async fn test_password_reset_flow() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    sign_up!(app, ctx, "Meron", "meron@example.com", "secret123");

    let (status, _) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users/send-otp")
            .set_json(json!({ "email": "meron@example.com" }))
    );
    assert_eq!(status, StatusCode::OK);

    // Resetting before the code is verified is refused
    let (status, _) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users/reset-password")
            .set_json(json!({ "email": "meron@example.com", "newPassword": "brand-new-1" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let otp = ctx.email.last_code_for("meron@example.com").unwrap();
    let (status, _) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users/verify-otp-reset")
            .set_json(json!({ "email": "meron@example.com", "otp": otp }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users/reset-password")
            .set_json(json!({ "email": "meron@example.com", "newPassword": "brand-new-1" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset successfully");

    login!(app, "meron@example.com", "brand-new-1");
    let (status, _) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "meron@example.com", "password": "secret123" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_users_cannot_read_each_other() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    let (first_id, first_token) = sign_up!(app, ctx, "First", "first@example.com", "secret123");
    let (second_id, _) = sign_up!(app, ctx, "Second", "second@example.com", "secret123");

    let (status, _) = call_json!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/users/{}", first_id))
            .insert_header(bearer(&first_token))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call_json!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/users/{}", second_id))
            .insert_header(bearer(&first_token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/api/users/me"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, _) = call_json!(
        app,
        test::TestRequest::get().uri("/api/users/me").insert_header(bearer("not-a-token"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
