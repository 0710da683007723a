//! Headline totals straight from the warehouse, for the default window and overall.

use dotenvy::dotenv;
use order_analytics::application::pipeline::log_summary;
use order_analytics::config::{self, WarehouseConfig};
use order_analytics::connect;
use order_analytics::db::set_search_path;
use order_analytics::domain::errors::DomainError;
use order_analytics::infrastructure::warehouse;

fn run() -> Result<(), DomainError> {
    let settings = WarehouseConfig::from_env()?;
    let window = config::default_window()?;
    let mut conn = connect(&settings.database_url)?;
    set_search_path(&mut conn, &settings.schema)?;

    let windowed = warehouse::verify(&mut conn, Some(window))?;
    log_summary(&format!("{} to {}", window.start, window.end), &windowed);
    let overall = warehouse::verify(&mut conn, None)?;
    log_summary("All dates", &overall);
    Ok(())
}

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run() {
        log::error!("Verification failed: {}", e);
        std::process::exit(1);
    }
}
