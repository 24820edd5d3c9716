pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod routes;
pub mod services;
