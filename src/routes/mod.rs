use actix_web::{web, HttpRequest, HttpResponse};
use log::error;
use serde_json::json;
use url::form_urlencoded;

use crate::error::AdminError;
use crate::http::api_client::{ApiError, QueryParams};

pub mod admin;
pub mod blogs;
pub mod health;
pub mod options;
pub mod reviews;
pub mod search;
pub mod suggest;

/// Mounts everything under `/api`; `/health` sits at the root.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api")
            .route("/search/{domain}", web::get().to(search::search))
            .route("/suggest/{domain}", web::get().to(suggest::suggest))
            .route("/suggest/{domain}", web::delete().to(suggest::close_session))
            .route("/options/{domain}", web::get().to(options::get_options))
            .service(
                web::scope("/blogs")
                    .route("", web::get().to(blogs::list_posts))
                    .route("", web::post().to(blogs::create_post))
                    .route("/{id}", web::put().to(blogs::update_post)),
            )
            .service(
                web::scope("/reviews")
                    .route("/user", web::get().to(reviews::list_user_reviews))
                    .route("/{id}", web::delete().to(reviews::delete_review)),
            )
            .configure(admin::config),
    );
}

/// Query string as ordered pairs, repeated keys kept.
pub fn query_params(req: &HttpRequest) -> QueryParams {
    let mut params = QueryParams::new();
    for (key, value) in form_urlencoded::parse(req.query_string().as_bytes()) {
        params.push(key.into_owned(), value.into_owned());
    }
    params
}

/// Backend failures keep their status when they have one; transport errors become 502.
pub fn api_error_response(err: &ApiError) -> HttpResponse {
    error!("Backend call failed: {}", err);
    let message = err
        .backend_message()
        .unwrap_or_else(|| "Không thể kết nối tới máy chủ. Vui lòng thử lại sau.".to_string());
    let status = err
        .status_code()
        .and_then(|code| actix_web::http::StatusCode::from_u16(code).ok())
        .unwrap_or(actix_web::http::StatusCode::BAD_GATEWAY);
    HttpResponse::build(status).json(json!({ "error": message }))
}

pub fn admin_error_response(err: &AdminError) -> HttpResponse {
    match err {
        AdminError::Validation(errors) => HttpResponse::UnprocessableEntity().json(errors),
        AdminError::Api(err) => api_error_response(err),
    }
}
