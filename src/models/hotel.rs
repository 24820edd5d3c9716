use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::domain::Domain;
use super::lenient;
use super::listing::{ListingItem, Refinable};
use crate::services::image_url::{normalize_all, normalize_in_place};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub star_rating: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub hotel_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price_per_night: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, alias = "review_count", deserialize_with = "lenient::count")]
    pub rating_count: u32,
    #[serde(default, deserialize_with = "lenient::json_column")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::json_column")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Refinable for Hotel {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.location.as_str(),
            self.address.as_str(),
        ]
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
        self.hotel_type.as_deref()
    }

    fn price(&self) -> Option<f64> {
        self.price_per_night
    }
}

impl ListingItem for Hotel {
    const DOMAIN: Domain = Domain::Hotels;

    fn normalize_images(&mut self, host: &Url) {
        normalize_in_place(host, &mut self.image_url);
        normalize_all(host, &mut self.images);
    }
}
