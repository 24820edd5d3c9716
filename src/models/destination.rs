use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::domain::Domain;
use super::lenient;
use super::listing::{ListingItem, Refinable};
use crate::services::image_url::{normalize_all, normalize_in_place};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
    /// Free text such as "Tháng 3 - tháng 5" or "mùa thu".
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub best_time_to_visit: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub open_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub close_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub entrance_fee: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, alias = "review_count", deserialize_with = "lenient::count")]
    pub rating_count: u32,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::json_column")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Refinable for Destination {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str(), self.location.as_str()]
    }

    fn best_time_to_visit(&self) -> Option<&str> {
        self.best_time_to_visit.as_deref()
    }

    fn opening_hours(&self) -> (Option<&str>, Option<&str>) {
        (self.open_time.as_deref(), self.close_time.as_deref())
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }

    fn rating_count(&self) -> u32 {
        self.rating_count
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn price(&self) -> Option<f64> {
        self.entrance_fee
    }
}

impl ListingItem for Destination {
    const DOMAIN: Domain = Domain::Destinations;

    fn normalize_images(&mut self, host: &Url) {
        normalize_in_place(host, &mut self.image_url);
        normalize_all(host, &mut self.images);
    }
}
