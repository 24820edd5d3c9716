use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;

use crate::error::{AdminError, ValidationErrors};
use crate::http::api_client::{ApiClient, ApiError, HttpMethod, QueryParams};
use crate::models::blog::{BlogForm, BlogPost, PostStatus};

const BLOGS_PATH: &str = "blogs";
const TITLE_MAX_CHARS: usize = 200;

pub struct BlogService {
    client: Arc<dyn ApiClient>,
}

impl BlogService {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_posts(&self, params: &QueryParams) -> Result<Vec<BlogPost>, ApiError> {
        let body = self.client.get_json(BLOGS_PATH, params).await?;
        let rows = match &body {
            Value::Array(rows) => rows.as_slice(),
            other => other
                .get("blogs")
                .or_else(|| other.get("data"))
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        };
        Ok(rows
            .iter()
            .filter_map(|row| match serde_json::from_value(row.clone()) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!("Skipping undecodable blog post: {}", e);
                    None
                }
            })
            .collect())
    }

    pub async fn create_post(&self, form: &BlogForm) -> Result<Value, AdminError> {
        validate_post(form)?;
        let body = serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))?;
        let created = self
            .client
            .send_json(HttpMethod::Post, BLOGS_PATH, Some(&body))
            .await?;
        info!("Created blog post '{}'", form.title.trim());
        Ok(created)
    }

    pub async fn update_post(&self, id: u64, form: &BlogForm) -> Result<Value, AdminError> {
        validate_post(form)?;
        let body = serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))?;
        let path = format!("{}/{}", BLOGS_PATH, id);
        Ok(self.client.send_json(HttpMethod::Put, &path, Some(&body)).await?)
    }
}

/// Drafts only need a title; published posts also need content.
pub fn validate_post(form: &BlogForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("title", &form.title, "Vui lòng nhập tiêu đề");
    if form.title.trim().chars().count() > TITLE_MAX_CHARS {
        errors.add("title", "Tiêu đề quá dài");
    }
    if form.status == PostStatus::Published {
        errors.require("content", &form.content, "Bài viết đã xuất bản cần có nội dung");
    }
    errors.into_result()
}
