use std::sync::Arc;

use dotenvy::dotenv;
use order_analytics::application::dashboard_service::DashboardService;
use order_analytics::config::DashboardConfig;
use order_analytics::infrastructure::dashboard_source::WarehouseSource;
use order_analytics::{build_server, create_pool};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let pool = match create_pool(&config.warehouse.database_url, &config.warehouse.schema) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let source = Arc::new(WarehouseSource::new(pool, config.cache_ttl));
    log::info!(
        "Starting dashboard at http://{}:{} (cache TTL {}s)",
        config.host,
        config.port,
        source.cache_ttl().as_secs()
    );
    let service = DashboardService::new(source, Some(config.default_window));

    build_server(service, &config.host, config.port)?.await
}
