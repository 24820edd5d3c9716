use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::domain::Domain;

/// Accessors the client-side refiner reads. Defaults describe an item that
/// carries none of the optional attributes, which makes it match every
/// "inclusive default" rule.
pub trait Refinable {
    /// Fields the free-text search looks into.
    fn search_fields(&self) -> Vec<&str>;

    fn best_time_to_visit(&self) -> Option<&str> {
        None
    }

    fn opening_hours(&self) -> (Option<&str>, Option<&str>) {
        (None, None)
    }

    fn rating(&self) -> Option<f64> {
        None
    }

    fn rating_count(&self) -> u32 {
        0
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn price(&self) -> Option<f64> {
        None
    }

    fn discount(&self) -> Option<f64> {
        None
    }

    fn name(&self) -> &str {
        self.search_fields().first().copied().unwrap_or_default()
    }
}

/// A row one of the listing endpoints returns.
pub trait ListingItem: Refinable + DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    const DOMAIN: Domain;

    /// Rewrites relative image paths against the backend host.
    fn normalize_images(&mut self, _host: &Url) {}
}
