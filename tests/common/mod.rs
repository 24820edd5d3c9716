#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use travelbook_api::config::AppConfig;
use travelbook_api::http::api_client::{ApiClient, ApiError, HttpMethod, QueryParams};
use travelbook_api::routes;
use travelbook_api::services::debounce::DebounceRegistry;

/// One call the handlers made against the backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub params: QueryParams,
    pub body: Option<Value>,
    pub auth: Option<String>,
}

/// Backend stand-in: canned answers per `METHOD path`, every call recorded.
/// Unknown paths answer 404.
#[derive(Default)]
pub struct MockApiClient {
    responses: Mutex<HashMap<String, Result<Value, ApiError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: HttpMethod, path: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(format!("{} {}", method.as_str(), path), Ok(body));
    }

    pub fn fail(&self, method: HttpMethod, path: &str, code: u16, body: &str) {
        self.responses.lock().unwrap().insert(
            format!("{} {}", method.as_str(), path),
            Err(ApiError::Status {
                code,
                body: body.to_string(),
            }),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &QueryParams,
        body: Option<&Value>,
        auth: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            params: params.clone(),
            body: body.cloned(),
            auth: auth.map(str::to_string),
        });
        self.responses
            .lock()
            .unwrap()
            .get(&format!("{} {}", method.as_str(), path))
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Status {
                    code: 404,
                    body: r#"{"message":"Not found"}"#.to_string(),
                })
            })
    }
}

pub struct TestApp {
    pub backend: Arc<MockApiClient>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            backend: Arc::new(MockApiClient::new()),
            config: AppConfig::local(),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let client: Arc<dyn ApiClient> = self.backend.clone();
        App::new()
            .app_data(web::Data::new(client))
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(DebounceRegistry::new(Duration::from_millis(
                10,
            ))))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    }
}
