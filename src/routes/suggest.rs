use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::debug;
use serde_json::json;
use std::sync::Arc;

use crate::http::api_client::ApiClient;
use crate::models::domain::Domain;
use crate::models::suggestion::SuggestionItem;
use crate::routes::query_params;
use crate::services::debounce::DebounceRegistry;
use crate::services::suggestion_service::SuggestionFetcher;

/// Clients that send this header get their keystrokes debounced server-side.
pub const SESSION_HEADER: &str = "X-Suggest-Session";

/// `GET /api/suggest/{domain}?field=&q=`. Always 200; anything that goes
/// wrong yields an empty list.
///
/// For from/to pairs, passing the already chosen opposite value (e.g.
/// `from_location=Hà Nội` while typing `to_location`) restricts the
/// suggestions to reachable places.
pub async fn suggest(
    req: HttpRequest,
    path: web::Path<String>,
    client: web::Data<Arc<dyn ApiClient>>,
    debouncers: web::Data<DebounceRegistry>,
) -> impl Responder {
    let Some(domain) = Domain::parse(&path) else {
        return HttpResponse::Ok().json(Vec::<SuggestionItem>::new());
    };
    let spec = domain.spec();
    let params = query_params(&req);
    let text = params.get("q").unwrap_or_default().to_string();
    let field = params
        .get("field")
        .or_else(|| spec.location_fields.first().copied())
        .unwrap_or_default()
        .to_string();

    let mut fetcher = SuggestionFetcher::new(client.get_ref().clone(), spec);
    if !fetcher.accepts(&text) {
        return HttpResponse::Ok().json(Vec::<SuggestionItem>::new());
    }

    let session = session_prefix(&req, domain).map(|prefix| format!("{}{}", prefix, field));

    let partial = text.clone();
    let work = move || async move {
        if let Some(narrowing) = spec.narrowing.iter().find(|n| n.opposite == field) {
            if let Some(chosen) = params.get(narrowing.field).filter(|v| !v.trim().is_empty()) {
                fetcher.select_location(narrowing.field, chosen).await;
            }
        }
        fetcher.suggest(&partial, &field).await
    };

    let items = match session {
        Some(key) => match debouncers.run(&key, work).await {
            Some(items) => items,
            None => {
                debug!("Suggestion for '{}' superseded", text);
                Vec::new()
            }
        },
        None => work().await,
    };
    HttpResponse::Ok().json(items)
}

/// `DELETE /api/suggest/{domain}` with the session header: the page is gone,
/// so its pending suggestions are dropped.
pub async fn close_session(
    req: HttpRequest,
    path: web::Path<String>,
    debouncers: web::Data<DebounceRegistry>,
) -> impl Responder {
    let Some(domain) = Domain::parse(&path) else {
        return HttpResponse::NotFound().finish();
    };
    match session_prefix(&req, domain) {
        Some(prefix) => {
            let closed = debouncers.close(&prefix);
            debug!("Closed {} suggestion session(s) for {}", closed, prefix);
            HttpResponse::NoContent().finish()
        }
        None => HttpResponse::BadRequest().json(json!({
            "error": format!("Thiếu header {}", SESSION_HEADER),
        })),
    }
}

/// Registry key prefix shared by every field of one page's session.
fn session_prefix(req: &HttpRequest, domain: Domain) -> Option<String> {
    req.headers()
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("{}/{}/", s, domain.as_str()))
}
