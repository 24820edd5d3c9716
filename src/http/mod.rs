pub mod api_client;
pub mod reqwest_client;
