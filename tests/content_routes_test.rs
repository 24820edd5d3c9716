mod common;

use actix_web::test;
use serde_json::{json, Value};

use common::TestApp;
use travelbook_api::http::api_client::HttpMethod;

#[actix_rt::test]
async fn test_health_reports_backend() {
    let test_app = TestApp::new();
    test_app
        .backend
        .respond(HttpMethod::Get, "health", json!({"status": "ok"}));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "development");
    assert_eq!(body["services"]["backend"]["status"], "ok");
}

#[actix_rt::test]
async fn test_health_degrades_when_backend_errors() {
    let test_app = TestApp::new();
    test_app.backend.fail(HttpMethod::Get, "health", 502, "");
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["status"], "degraded");
}

#[actix_rt::test]
async fn test_transport_options_load_independently() {
    let test_app = TestApp::new();
    test_app.backend.respond(
        HttpMethod::Get,
        "transport/companies",
        json!({"data": [{"name": "Phương Trang"}, {"name": "Thành Bưởi"}]}),
    );
    test_app.backend.respond(
        HttpMethod::Get,
        "transport/available-dates",
        json!(["2025-02-01", "2025-02-02"]),
    );
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/options/transport")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body["companies"], json!(["Phương Trang", "Thành Bưởi"]));
    assert_eq!(body["available_dates"], json!(["2025-02-01", "2025-02-02"]));
    assert_eq!(body["vehicle_names"], json!([]));
    assert_eq!(body["available_times"], json!([]));
}

#[actix_rt::test]
async fn test_blog_create_requires_title() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/blogs")
        .set_json(json!({"content": "..."}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    assert!(test_app.backend.requests().is_empty());
}

#[actix_rt::test]
async fn test_blog_list_and_update() {
    let test_app = TestApp::new();
    test_app.backend.respond(
        HttpMethod::Get,
        "blogs",
        json!({"blogs": [{"id": 1, "title": "Mùa lúa chín Mù Cang Chải", "tags": "[\"mùa thu\",\"tây bắc\"]", "status": "published"}]}),
    );
    test_app
        .backend
        .respond(HttpMethod::Put, "blogs/1", json!({"id": 1}));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/blogs?category=travel-tips")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body[0]["tags"], json!(["mùa thu", "tây bắc"]));
    assert_eq!(
        test_app.backend.requests_to("blogs")[0].params.get("category"),
        Some("travel-tips")
    );

    let req = test::TestRequest::put()
        .uri("/api/blogs/1")
        .set_json(json!({"title": "Mùa lúa chín", "content": "Tháng 9...", "status": "published"}))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
}

#[actix_rt::test]
async fn test_reviews_forward_authorization() {
    let test_app = TestApp::new();
    test_app.backend.respond(
        HttpMethod::Get,
        "reviews/user",
        json!({"reviews": [{"id": 5, "service_type": "hotel", "service_name": "Vinpearl", "rating": "4", "comment": "Tốt"}]}),
    );
    test_app
        .backend
        .respond(HttpMethod::Delete, "reviews/5", Value::Null);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/reviews/user")
        .insert_header(("Authorization", "Bearer abc.def"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body[0]["rating"], 4);

    let req = test::TestRequest::delete()
        .uri("/api/reviews/5")
        .insert_header(("Authorization", "Bearer abc.def"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    for call in test_app.backend.requests() {
        assert_eq!(call.auth.as_deref(), Some("Bearer abc.def"));
    }
}

#[actix_rt::test]
async fn test_reviews_pass_backend_status_through() {
    let test_app = TestApp::new();
    test_app.backend.fail(
        HttpMethod::Get,
        "reviews/user",
        401,
        r#"{"message":"Vui lòng đăng nhập"}"#,
    );
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/reviews/user").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Vui lòng đăng nhập");
}

#[actix_rt::test]
async fn test_non_numeric_ids_never_reach_backend() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    for uri in ["/api/reviews/..", "/api/reviews/5%2F..%2F..", "/api/reviews/abc"] {
        let req = test::TestRequest::delete()
            .uri(uri)
            .insert_header(("Authorization", "Bearer abc.def"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404, "{}", uri);
    }

    let req = test::TestRequest::put()
        .uri("/api/blogs/..")
        .set_json(json!({"title": "Sa Pa mùa đông"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
    assert!(test_app.backend.requests().is_empty());
}
