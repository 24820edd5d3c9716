use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travelbook_api::config::AppConfig;
use travelbook_api::http::api_client::ApiClient;
use travelbook_api::http::reqwest_client::ReqwestApiClient;
use travelbook_api::routes;
use travelbook_api::services::debounce::DebounceRegistry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    log::info!(
        "Environment: {}, backend: {}",
        config.environment.as_str(),
        config.api_base_url
    );

    let client: Arc<dyn ApiClient> = Arc::new(
        ReqwestApiClient::new(config.api_base_url.clone(), config.http_timeout)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );
    let debouncers = web::Data::new(DebounceRegistry::new(config.suggest_debounce));

    let bind = (config.host.clone(), config.port);
    println!("Attempting to bind to {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(debouncers.clone())
            .configure(routes::config)
    })
    .bind(bind)?
    .run()
    .await
}
