use serde::{Deserialize, Serialize};
use url::Url;

use super::domain::Domain;
use super::lenient;
use super::listing::{ListingItem, Refinable};
use crate::services::image_url::normalize_in_place;

/// A tour, hotel or transport offer currently carrying a promotion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotedService {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub promotion_code: Option<String>,
    #[serde(default, alias = "discount", deserialize_with = "lenient::opt_f64")]
    pub discount_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub original_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub discounted_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub valid_until: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
}

impl Refinable for PromotedService {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.description.as_str()];
        if let Some(code) = self.promotion_code.as_deref() {
            fields.push(code);
        }
        fields
    }

    fn category(&self) -> Option<&str> {
        self.service_type.as_deref()
    }

    fn price(&self) -> Option<f64> {
        self.discounted_price.or(self.original_price)
    }

    fn discount(&self) -> Option<f64> {
        self.discount_percent
    }
}

impl ListingItem for PromotedService {
    const DOMAIN: Domain = Domain::Promotions;

    fn normalize_images(&mut self, host: &Url) {
        normalize_in_place(host, &mut self.image_url);
    }
}
