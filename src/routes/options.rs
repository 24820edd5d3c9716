use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::sync::Arc;

use crate::http::api_client::ApiClient;
use crate::models::domain::Domain;
use crate::services::filter_options_service::load_filter_options;

/// `GET /api/options/{domain}`: sidebar option lists (dates, types, companies...).
pub async fn get_options(
    path: web::Path<String>,
    client: web::Data<Arc<dyn ApiClient>>,
) -> impl Responder {
    match Domain::parse(&path) {
        Some(domain) => {
            let options = load_filter_options(client.get_ref().clone(), domain.spec()).await;
            HttpResponse::Ok().json(options)
        }
        None => HttpResponse::NotFound().json(json!({ "error": "Trang bạn tìm không tồn tại." })),
    }
}
