//! Source database to intermediate CSV files.

use dotenvy::dotenv;
use order_analytics::application::pipeline;
use order_analytics::config::{self, SourceConfig};
use order_analytics::connect;
use order_analytics::domain::errors::DomainError;

fn run() -> Result<(), DomainError> {
    let source = SourceConfig::from_env()?;
    let dir = config::data_dir();
    let mut conn = connect(&source.database_url)?;
    let report = pipeline::extract_to_dir(&mut conn, &dir)?;
    log::info!(
        "Extraction finished: {} order details, {} products, {} suppliers",
        report.order_details,
        report.products,
        report.suppliers
    );
    Ok(())
}

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run() {
        log::error!("Extraction failed: {}", e);
        std::process::exit(1);
    }
}
