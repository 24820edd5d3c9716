use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::domain::Domain;
use super::lenient;
use super::listing::{ListingItem, Refinable};
use crate::services::image_url::{normalize_all, normalize_in_place};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "destination")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub region: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_string")]
    pub tour_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub discount_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, alias = "review_count", deserialize_with = "lenient::count")]
    pub rating_count: u32,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub best_time_to_visit: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::json_column")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::json_column")]
    pub itinerary: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Refinable for Tour {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str(), self.location.as_str()]
    }

    fn best_time_to_visit(&self) -> Option<&str> {
        self.best_time_to_visit.as_deref()
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
        self.tour_type.as_deref()
    }

    fn price(&self) -> Option<f64> {
        self.discount_price.or(self.price)
    }
}

impl ListingItem for Tour {
    const DOMAIN: Domain = Domain::Tours;

    fn normalize_images(&mut self, host: &Url) {
        normalize_in_place(host, &mut self.image_url);
        normalize_all(host, &mut self.images);
    }
}
