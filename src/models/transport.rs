use serde::{Deserialize, Serialize};
use url::Url;

use super::domain::Domain;
use super::lenient;
use super::listing::{ListingItem, Refinable};
use crate::services::image_url::normalize_in_place;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportTrip {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    #[serde(default)]
    pub vehicle_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub from_location: String,
    #[serde(default)]
    pub to_location: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub departure_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub departure_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub arrival_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub available_seats: Option<u32>,
    #[serde(default, deserialize_with = "lenient::json_column")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
}

impl Refinable for TransportTrip {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.vehicle_name.as_str(),
            self.company.as_str(),
            self.from_location.as_str(),
            self.to_location.as_str(),
        ]
    }

    fn category(&self) -> Option<&str> {
        self.vehicle_type.as_deref()
    }

    fn price(&self) -> Option<f64> {
        self.price
    }
}

impl ListingItem for TransportTrip {
    const DOMAIN: Domain = Domain::Transport;

    fn normalize_images(&mut self, host: &Url) {
        normalize_in_place(host, &mut self.image_url);
    }
}
