use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

use crate::http::api_client::ApiClient;
use crate::routes::api_error_response;
use crate::services::review_service::ReviewService;

fn authorization(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

pub async fn list_user_reviews(
    req: HttpRequest,
    client: web::Data<Arc<dyn ApiClient>>,
) -> impl Responder {
    let service = ReviewService::new(client.get_ref().clone());
    match service.list_user_reviews(authorization(&req)).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => api_error_response(&err),
    }
}

pub async fn delete_review(
    req: HttpRequest,
    path: web::Path<u64>,
    client: web::Data<Arc<dyn ApiClient>>,
) -> impl Responder {
    let service = ReviewService::new(client.get_ref().clone());
    match service.delete_review(*path, authorization(&req)).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => api_error_response(&err),
    }
}
