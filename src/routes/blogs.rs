use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

use crate::http::api_client::ApiClient;
use crate::models::blog::BlogForm;
use crate::routes::{admin_error_response, api_error_response, query_params};
use crate::services::blog_service::BlogService;

pub async fn list_posts(req: HttpRequest, client: web::Data<Arc<dyn ApiClient>>) -> impl Responder {
    let service = BlogService::new(client.get_ref().clone());
    match service.list_posts(&query_params(&req)).await {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(err) => api_error_response(&err),
    }
}

pub async fn create_post(
    client: web::Data<Arc<dyn ApiClient>>,
    form: web::Json<BlogForm>,
) -> impl Responder {
    let service = BlogService::new(client.get_ref().clone());
    match service.create_post(&form).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => admin_error_response(&err),
    }
}

pub async fn update_post(
    path: web::Path<u64>,
    client: web::Data<Arc<dyn ApiClient>>,
    form: web::Json<BlogForm>,
) -> impl Responder {
    let service = BlogService::new(client.get_ref().clone());
    match service.update_post(*path, &form).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(err) => admin_error_response(&err),
    }
}
