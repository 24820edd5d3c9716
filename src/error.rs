use std::fmt;

use crate::http::api_client::ApiError;

/// Shown when a listing fetch fails; the renderer offers a retry button next to it.
pub const LISTING_LOAD_FAILED: &str = "Không thể tải dữ liệu. Vui lòng thử lại sau.";

#[derive(Debug)]
pub enum SearchError {
    UnknownDomain(String),
    UnknownField { domain: String, field: String },
    InvalidSort(String),
    InvalidValue { field: String, value: String },
    Api(ApiError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::UnknownDomain(domain) => write!(f, "Unknown listing domain: {}", domain),
            SearchError::UnknownField { domain, field } => {
                write!(f, "Unknown filter field '{}' for {}", field, domain)
            }
            SearchError::InvalidSort(key) => write!(f, "Sort key not allowed: {}", key),
            SearchError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{}' for field '{}'", value, field)
            }
            SearchError::Api(err) => write!(f, "Backend request failed: {}", err),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<ApiError> for SearchError {
    fn from(err: ApiError) -> Self {
        SearchError::Api(err)
    }
}

impl SearchError {
    /// Message safe to hand to the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::Api(_) => LISTING_LOAD_FAILED,
            SearchError::UnknownDomain(_) => "Trang bạn tìm không tồn tại.",
            _ => "Bộ lọc không hợp lệ.",
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{} must be set", name),
            ConfigError::InvalidVar { name, value } => {
                write!(f, "{} has an invalid value: {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// One rejected form field, with the message shown under it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Collected form problems; submission is blocked while any exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.errors.iter().map(|e| e.field).collect();
        write!(f, "Invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Failure of an admin write: either the form never left, or the backend refused it.
#[derive(Debug)]
pub enum AdminError {
    Validation(ValidationErrors),
    Api(ApiError),
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminError::Validation(errors) => write!(f, "{}", errors),
            AdminError::Api(err) => write!(f, "Backend rejected the request: {}", err),
        }
    }
}

impl std::error::Error for AdminError {}

impl From<ValidationErrors> for AdminError {
    fn from(errors: ValidationErrors) -> Self {
        AdminError::Validation(errors)
    }
}

impl From<ApiError> for AdminError {
    fn from(err: ApiError) -> Self {
        AdminError::Api(err)
    }
}
