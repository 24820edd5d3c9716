use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;

use crate::http::api_client::{ApiClient, ApiError, HttpMethod, QueryParams};
use crate::models::review::UserReview;

/// The signed-in user's reviews. The caller's `Authorization` header is
/// forwarded as-is; the backend decides who the user is.
pub struct ReviewService {
    client: Arc<dyn ApiClient>,
}

impl ReviewService {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_user_reviews(&self, auth: Option<&str>) -> Result<Vec<UserReview>, ApiError> {
        let body = self
            .client
            .request(HttpMethod::Get, "reviews/user", &QueryParams::new(), None, auth)
            .await?;
        let rows = body
            .get("reviews")
            .or_else(|| body.get("data"))
            .and_then(Value::as_array)
            .or_else(|| body.as_array())
            .cloned()
            .unwrap_or_default();
        Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(review) => Some(review),
                Err(e) => {
                    warn!("Skipping undecodable review: {}", e);
                    None
                }
            })
            .collect())
    }

    pub async fn delete_review(&self, id: u64, auth: Option<&str>) -> Result<(), ApiError> {
        let path = format!("reviews/{}", id);
        self.client
            .request(HttpMethod::Delete, &path, &QueryParams::new(), None, auth)
            .await?;
        info!("Deleted review {}", id);
        Ok(())
    }
}
