use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::http::api_client::ApiClient;
use crate::models::flight::{RouteForm, ScheduleForm};
use crate::routes::{admin_error_response, api_error_response};
use crate::services::flight_admin_service::{DeleteOutcome, FlightAdminService};

#[derive(Deserialize)]
pub struct RouteListParams {
    page: Option<u32>,
    search: Option<String>,
}

fn service(client: &web::Data<Arc<dyn ApiClient>>) -> FlightAdminService {
    FlightAdminService::new(client.get_ref().clone())
}

pub async fn list_routes(
    client: web::Data<Arc<dyn ApiClient>>,
    params: web::Query<RouteListParams>,
) -> impl Responder {
    match service(&client)
        .list_routes(params.page.unwrap_or(1), params.search.as_deref())
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => api_error_response(&err),
    }
}

pub async fn create_route(
    client: web::Data<Arc<dyn ApiClient>>,
    form: web::Json<RouteForm>,
) -> impl Responder {
    match service(&client).create_route(&form).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => admin_error_response(&err),
    }
}

pub async fn update_route(
    path: web::Path<u64>,
    client: web::Data<Arc<dyn ApiClient>>,
    form: web::Json<RouteForm>,
) -> impl Responder {
    match service(&client).update_route(*path, &form).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(err) => admin_error_response(&err),
    }
}

/// A route with future schedules answers 409 and offers deactivation instead.
pub async fn delete_route(
    path: web::Path<u64>,
    client: web::Data<Arc<dyn ApiClient>>,
) -> impl Responder {
    match service(&client).delete_route(*path).await {
        Ok(DeleteOutcome::Deleted) => HttpResponse::Ok().json(DeleteOutcome::Deleted),
        Ok(outcome @ DeleteOutcome::HasFutureSchedules { .. }) => HttpResponse::Conflict().json(json!({
            "result": outcome,
            "alternative": format!("/api/admin/flights/routes/{}/deactivate", *path),
        })),
        Err(err) => api_error_response(&err),
    }
}

pub async fn deactivate_route(
    path: web::Path<u64>,
    client: web::Data<Arc<dyn ApiClient>>,
) -> impl Responder {
    match service(&client).deactivate_route(*path).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(err) => api_error_response(&err),
    }
}

pub async fn update_schedule(
    path: web::Path<u64>,
    client: web::Data<Arc<dyn ApiClient>>,
    form: web::Json<ScheduleForm>,
) -> impl Responder {
    match service(&client).update_schedule(*path, &form).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(err) => admin_error_response(&err),
    }
}

pub async fn generate_schedules(client: web::Data<Arc<dyn ApiClient>>) -> impl Responder {
    match service(&client).generate_schedules().await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => api_error_response(&err),
    }
}
