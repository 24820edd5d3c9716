use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::http::api_client::{ApiClient, ApiError, QueryParams};

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(
    client: web::Data<Arc<dyn ApiClient>>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: config.environment.as_str().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let backend = check_backend(client.get_ref().as_ref(), &config).await;
    if backend.status != "ok" {
        health.status = "degraded".to_string();
    }
    health.services.insert("backend".to_string(), backend);

    HttpResponse::Ok().json(health)
}

async fn check_backend(client: &dyn ApiClient, config: &AppConfig) -> ServiceStatus {
    match client.get_json("health", &QueryParams::new()).await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Reachable at {}", config.api_base_url)),
        },
        // Any HTTP answer means the backend is up, even without a health route
        Err(ApiError::Status { code, .. }) if code < 500 => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Reachable at {} (status {})", config.api_base_url, code)),
        },
        Err(e) => {
            log::warn!("Backend health check failed: {}", e);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to reach backend: {}", e)),
            }
        }
    }
}
