mod common;

use actix_web::test;
use serde_json::{json, Value};

use common::TestApp;
use travelbook_api::http::api_client::HttpMethod;

fn destination_rows(count: usize) -> Value {
    let rows: Vec<Value> = (1..=count)
        .map(|i| json!({"id": i, "name": format!("Điểm đến {}", i), "location": "Việt Nam"}))
        .collect();
    json!({ "destinations": rows })
}

#[actix_rt::test]
async fn test_tour_search_forwards_only_chosen_filters() {
    let test_app = TestApp::new();
    test_app.backend.respond(
        HttpMethod::Get,
        "tours",
        json!({
            "tours": [
                {"id": 1, "name": "Hà Giang Loop", "type": "culture", "image_url": "uploads/ha-giang.jpg"},
                {"id": 2, "name": "Mai Châu", "type": "culture"}
            ],
            "pagination": {"page": 1, "total_pages": 10, "total": 88}
        }),
    );
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/search/tours?region=north&type=culture&season=all")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total_pages"], 10);
    assert_eq!(body["error"], Value::Null);
    assert_eq!(
        body["items"][0]["image_url"],
        "http://localhost:5000/uploads/ha-giang.jpg"
    );
    assert_eq!(body["page_window"].as_array().unwrap().len(), 5);

    let calls = test_app.backend.requests_to("tours");
    assert_eq!(calls.len(), 1);
    let params = &calls[0].params;
    assert!(params
        .to_query_string()
        .starts_with("region=north&type=culture"));
    assert_eq!(params.get("page"), Some("1"));
    assert_eq!(params.get("limit"), Some("9"));
    for omitted in ["season", "price_range", "rating", "popularity"] {
        assert!(!params.contains_key(omitted), "{} leaked", omitted);
    }
}

#[actix_rt::test]
async fn test_backend_failure_is_retryable_not_fatal() {
    let test_app = TestApp::new();
    test_app
        .backend
        .fail(HttpMethod::Get, "hotels", 500, r#"{"message":"db down"}"#);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/search/hotels?location=%C4%90%C3%A0%20N%E1%BA%B5ng")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["retryable"], true);
    assert_eq!(body["empty"], false);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(
        body["error"],
        "Không thể tải dữ liệu. Vui lòng thử lại sau."
    );
    let calls = test_app.backend.requests_to("hotels");
    assert_eq!(calls[0].params.get("location"), Some("Đà Nẵng"));
}

#[actix_rt::test]
async fn test_unknown_domain_and_bad_sort_are_rejected() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/search/cruises")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::get()
        .uri("/api/search/hotels?sort=departure_asc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert!(test_app.backend.requests().is_empty());
}

#[actix_rt::test]
async fn test_destinations_paginate_locally() {
    let test_app = TestApp::new();
    test_app
        .backend
        .respond(HttpMethod::Get, "destinations", destination_rows(20));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/search/destinations?page=3&region=central")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["pagination"]["page"], 3);
    assert_eq!(body["pagination"]["total_pages"], 3);
    assert_eq!(body["pagination"]["total"], 20);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Điểm đến 19");

    let calls = test_app.backend.requests_to("destinations");
    assert_eq!(calls[0].params.get("region"), Some("central"));
    assert!(!calls[0].params.contains_key("page"));
}

#[actix_rt::test]
async fn test_destination_text_search_matches_locally() {
    let test_app = TestApp::new();
    test_app.backend.respond(
        HttpMethod::Get,
        "destinations",
        json!([
            {"id": 1, "name": "Văn Miếu", "location": "Hà Nội, Việt Nam"},
            {"id": 2, "name": "Phố cổ Hội An", "location": "Quảng Nam, Việt Nam"}
        ]),
    );
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/search/destinations?q=H%C3%A0%20N%E1%BB%99i")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["location"], "Hà Nội, Việt Nam");
}

#[actix_rt::test]
async fn test_promotions_fall_back_to_service_list() {
    let test_app = TestApp::new();
    test_app
        .backend
        .fail(HttpMethod::Get, "promotions/global", 503, "");
    test_app.backend.respond(
        HttpMethod::Get,
        "promotions/services",
        json!({"services": [
            {"id": 1, "name": "Combo Phú Quốc", "service_type": "tour", "discount_percent": 15},
            {"id": 2, "name": "Khách sạn Sapa", "service_type": "hotel", "discount_percent": 30}
        ]}),
    );
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/search/promotions")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body["error"], Value::Null);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Khách sạn Sapa");
}

#[actix_rt::test]
async fn test_empty_result_is_flagged() {
    let test_app = TestApp::new();
    test_app.backend.respond(
        HttpMethod::Get,
        "transport",
        json!({"transports": [], "pagination": {"page": 1, "total_pages": 0, "total": 0}}),
    );
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/search/transport?from_location=H%C3%A0%20N%E1%BB%99i")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body["empty"], true);
    assert_eq!(body["pagination"]["total_pages"], 1);
    assert_eq!(body["page_window"], json!([{"kind": "page", "page": 1}]));
}

#[actix_rt::test]
async fn test_failed_page_keeps_its_number_for_retry() {
    let test_app = TestApp::new();
    test_app.backend.fail(HttpMethod::Get, "tours", 500, "");
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/search/tours?page=3")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body["retryable"], true);
    assert_eq!(body["pagination"]["page"], 3);
    assert_eq!(
        test_app.backend.requests_to("tours")[0].params.get("page"),
        Some("3")
    );
}

#[actix_rt::test]
async fn test_promotions_start_on_active_deals_until_all_is_chosen() {
    let test_app = TestApp::new();
    test_app.backend.respond(
        HttpMethod::Get,
        "promotions/global",
        json!({"services": []}),
    );
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/search/promotions")
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::get()
        .uri("/api/search/promotions?status=all")
        .to_request();
    test::call_service(&app, req).await;

    let calls = test_app.backend.requests_to("promotions/global");
    assert_eq!(calls[0].params.get("status"), Some("active"));
    assert!(!calls[1].params.contains_key("status"));
}
