//! Lists the source tables with row counts and column definitions.

use dotenvy::dotenv;
use order_analytics::config::SourceConfig;
use order_analytics::connect;
use order_analytics::domain::errors::DomainError;
use order_analytics::infrastructure::source;

const SOURCE_SCHEMA: &str = "public";

fn run() -> Result<(), DomainError> {
    let settings = SourceConfig::from_env()?;
    let mut conn = connect(&settings.database_url)?;
    let tables = source::inspect_schema(&mut conn, SOURCE_SCHEMA)?;
    log::info!("{} tables in schema {}", tables.len(), SOURCE_SCHEMA);
    for table in tables {
        log::info!("{} ({} rows)", table.name, table.row_count);
        for column in table.columns {
            log::info!(
                "    {:<24} {:<28} {}",
                column.name,
                column.data_type,
                if column.nullable { "NULL" } else { "NOT NULL" }
            );
        }
    }
    Ok(())
}

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run() {
        log::error!("Analysis failed: {}", e);
        std::process::exit(1);
    }
}
