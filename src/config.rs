use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

const DEFAULT_DEV_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    /// Base URL of the travel-booking REST API (ends with `/api`).
    pub api_base_url: Url,
    /// Same backend without the `/api` suffix; static assets and images live here.
    pub host_base_url: Url,
    pub host: String,
    pub port: u16,
    pub http_timeout: Duration,
    pub suggest_debounce: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("RUST_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let raw_api_url = match env::var("BACKEND_API_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ if environment == Environment::Production => {
                return Err(ConfigError::MissingVar("BACKEND_API_URL"))
            }
            _ => DEFAULT_DEV_API_URL.to_string(),
        };
        let api_base_url = parse_url("BACKEND_API_URL", &raw_api_url)?;

        let host_base_url = match env::var("BACKEND_HOST_URL") {
            Ok(url) if !url.trim().is_empty() => parse_url("BACKEND_HOST_URL", &url)?,
            _ => derive_host_url(&api_base_url),
        };

        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_var("PORT", DEFAULT_PORT)?;
        let http_timeout = Duration::from_secs(parse_var("HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);
        let suggest_debounce =
            Duration::from_millis(parse_var("SUGGEST_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?);

        Ok(Self {
            environment,
            api_base_url,
            host_base_url,
            host,
            port,
            http_timeout,
            suggest_debounce,
        })
    }

    /// Development defaults without touching the environment.
    pub fn local() -> Self {
        let api_base_url =
            parse_url("BACKEND_API_URL", DEFAULT_DEV_API_URL).expect("default API URL is valid");
        Self {
            environment: Environment::Development,
            host_base_url: derive_host_url(&api_base_url),
            api_base_url,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            suggest_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    // Url::join drops the last segment unless the base ends with '/'
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|_| ConfigError::InvalidVar {
        name,
        value: raw.to_string(),
    })
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}

fn derive_host_url(api_base_url: &Url) -> Url {
    let mut host = api_base_url.clone();
    let path = api_base_url.path().trim_end_matches('/');
    let stripped = path.strip_suffix("/api").unwrap_or(path);
    host.set_path(&format!("{}/", stripped));
    host
}
