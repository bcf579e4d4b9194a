//! Integration tests for the course catalogue and admin course management

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{bearer, course_form, TestContext, ADMIN_EMAIL, ADMIN_PASSWORD};
use lg_api::create_app;

#[actix_web::test]
async fn test_admin_creates_course_from_multipart_form() {
    let ctx = TestContext::new().await;
    ctx.create_admin().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    let admin = login!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let (status, course) = call_json!(app, course_form(&admin, "Physics 101", "Natural-FreshMan"));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(course["title"], "Physics 101");
    assert_eq!(course["category"], "Natural-FreshMan");
    assert_eq!(course["chapters"].as_array().unwrap().len(), 1);
    assert_eq!(course["totalDuration"], 10);

    // The stored cover is served from the uploads prefix
    let cover = course["coverImage"].as_str().unwrap();
    assert!(cover.starts_with("/uploads/"));
    let req = test::TestRequest::get().uri(cover).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, fetched) = call_json!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/courses/{}", course["_id"].as_str().unwrap()))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["_id"], course["_id"]);
}

#[actix_web::test]
async fn test_course_creation_requires_admin() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    let (_, token) = sign_up!(app, ctx, "Student", "student@example.com", "secret123");

    let (status, body) = call_json!(app, course_form(&token, "Chemistry", "Common"));
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, _) = call_json!(app, course_form("missing", "Chemistry", "Common"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_duplicate_title_is_rejected() {
    let ctx = TestContext::new().await;
    ctx.create_admin().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    let admin = login!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let (status, _) = call_json!(app, course_form(&admin, "Biology", "Common"));
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = call_json!(app, course_form(&admin, "Biology", "Common"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DUPLICATE_VALUE");
}

#[actix_web::test]
async fn test_course_listing_paginates_and_filters() {
    let ctx = TestContext::new().await;
    ctx.create_admin().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    let admin = login!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    for (title, category) in [
        ("Algebra", "Natural-FreshMan"),
        ("Geometry", "Natural-FreshMan"),
        ("History", "Social-Remedial"),
    ] {
        let (status, _) = call_json!(app, course_form(&admin, title, category));
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = call_json!(
        app,
        test::TestRequest::get().uri("/api/courses?page=1&limit=2").insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["courses"].as_array().unwrap().len(), 2);

    let (_, second) = call_json!(
        app,
        test::TestRequest::get().uri("/api/courses?page=2&limit=2").insert_header(bearer(&admin))
    );
    assert_eq!(second["courses"].as_array().unwrap().len(), 1);

    let (_, filtered) = call_json!(
        app,
        test::TestRequest::get()
            .uri("/api/courses?category=Natural-FreshMan")
            .insert_header(bearer(&admin))
    );
    assert_eq!(filtered["total"], 2);

    let (status, count) = call_json!(
        app,
        test::TestRequest::get()
            .uri("/api/courses/count-by-category/Social-Remedial")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count["count"], 1);

    let (status, _) = call_json!(
        app,
        test::TestRequest::get()
            .uri("/api/courses/count-by-category/Astrology")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_add_chapter_and_delete_course() {
    let ctx = TestContext::new().await;
    ctx.create_admin().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    let admin = login!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let (_, course) = call_json!(app, course_form(&admin, "Economics", "Social-FreshMan"));
    let id = course["_id"].as_str().unwrap().to_string();

    let (status, chapter) = call_json!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/courses/{}/chapters", id))
            .insert_header(bearer(&admin))
            .set_json(json!({
                "title": "Supply and demand",
                "videoUrl": "https://videos.example.com/supply.mp4",
                "duration": 25,
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(chapter["title"], "Supply and demand");
    assert_eq!(chapter["videoUrl"], "https://videos.example.com/supply.mp4");

    let (_, updated) = call_json!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/courses/{}", id))
            .insert_header(bearer(&admin))
    );
    assert_eq!(updated["chapters"].as_array().unwrap().len(), 2);
    assert_eq!(updated["totalDuration"], 35);

    let (status, body) = call_json!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/courses/{}", id))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Course deleted successfully");

    let (status, _) = call_json!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/courses/{}", id))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_id_and_unknown_route_return_json_404() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.settings)).await;
    let (_, token) = sign_up!(app, ctx, "Reader", "reader@example.com", "secret123");

    let (status, body) = call_json!(
        app,
        test::TestRequest::get().uri("/api/courses/not-an-id").insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Resource not found");

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/api/nothing-here"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
