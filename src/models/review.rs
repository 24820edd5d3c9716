use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// A review the signed-in user wrote, as listed on their reviews page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReview {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub rating: Option<u32>,
    #[serde(default)]
    pub comment: String,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}
