//! Intermediate CSV files to warehouse tables and view.

use dotenvy::dotenv;
use order_analytics::application::pipeline;
use order_analytics::config::{self, WarehouseConfig};
use order_analytics::connect;
use order_analytics::domain::errors::DomainError;

fn run() -> Result<(), DomainError> {
    let warehouse = WarehouseConfig::from_env()?;
    let dir = config::data_dir();
    let mut conn = connect(&warehouse.database_url)?;
    let report = pipeline::load_from_dir(&mut conn, &warehouse.schema, &dir, None)?;
    log::info!(
        "Load finished: {} order details, {} products, {} suppliers in schema {}",
        report.order_details,
        report.products,
        report.suppliers,
        warehouse.schema
    );
    Ok(())
}

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run() {
        log::error!("Load failed: {}", e);
        std::process::exit(1);
    }
}
