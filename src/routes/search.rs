use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::info;
use serde_json::json;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::SearchError;
use crate::http::api_client::{ApiClient, QueryParams};
use crate::models::destination::Destination;
use crate::models::domain::Domain;
use crate::models::hotel::Hotel;
use crate::models::listing::ListingItem;
use crate::models::promotion::PromotedService;
use crate::models::tour::Tour;
use crate::models::transport::TransportTrip;
use crate::routes::query_params;
use crate::services::filter_state::FilterStateStore;
use crate::services::sfp_controller::SfpController;

/// `GET /api/search/{domain}`: one page of a listing plus everything the pager needs.
///
/// Backend failures still answer 200 with `error` and `retryable` set; only
/// malformed input (unknown listing, disallowed sort) is a 400.
pub async fn search(
    req: HttpRequest,
    path: web::Path<String>,
    client: web::Data<Arc<dyn ApiClient>>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let domain_name = path.into_inner();
    let Some(domain) = Domain::parse(&domain_name) else {
        return bad_request(&SearchError::UnknownDomain(domain_name));
    };
    let params = query_params(&req);
    let client = client.get_ref().clone();

    match domain {
        Domain::Tours => run_listing::<Tour>(client, &config, &params).await,
        Domain::Hotels => run_listing::<Hotel>(client, &config, &params).await,
        Domain::Transport => run_listing::<TransportTrip>(client, &config, &params).await,
        Domain::Destinations => run_listing::<Destination>(client, &config, &params).await,
        Domain::Promotions => run_listing::<PromotedService>(client, &config, &params).await,
    }
}

async fn run_listing<T: ListingItem>(
    client: Arc<dyn ApiClient>,
    config: &AppConfig,
    params: &QueryParams,
) -> HttpResponse {
    let mut store = FilterStateStore::new(T::DOMAIN.spec());
    if let Err(err) = store.hydrate(params) {
        return bad_request(&err);
    }

    let mut controller = SfpController::<T>::with_store(store, client, config.host_base_url.clone());
    controller.refresh().await;
    let view = controller.view();
    info!(
        "{} page {}/{}: {} items",
        T::DOMAIN.as_str(),
        view.pagination.page,
        view.pagination.total_pages,
        view.items.len()
    );
    HttpResponse::Ok().json(view)
}

fn bad_request(err: &SearchError) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "error": err.user_message(),
        "detail": err.to_string(),
    }))
}
