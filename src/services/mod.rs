pub mod blog_service;
pub mod debounce;
pub mod filter_options_service;
pub mod filter_state;
pub mod flight_admin_service;
pub mod image_url;
pub mod json_decode;
pub mod pagination_service;
pub mod query_executor;
pub mod refiner;
pub mod review_service;
pub mod sfp_controller;
pub mod suggestion_service;
