//! The batch steps: source database to intermediate files, and files to warehouse.

use std::path::{Path, PathBuf};

use diesel::pg::PgConnection;

use crate::domain::errors::DomainError;
use crate::domain::filter::DateWindow;
use crate::domain::format;
use crate::domain::layout::{ORDER_DETAILS, PRODUCTS, SUPPLIERS};
use crate::domain::metrics::{self, SummaryMetrics};
use crate::infrastructure::models::{FactRow, ProductRow, SupplierRow};
use crate::infrastructure::{flatfile, source, warehouse};

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractReport {
    pub files: Vec<PathBuf>,
    pub order_details: usize,
    pub products: usize,
    pub suppliers: usize,
    pub summary: SummaryMetrics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub order_details: usize,
    pub products: usize,
    pub suppliers: usize,
    pub verification: SummaryMetrics,
}

pub fn log_summary(label: &str, m: &SummaryMetrics) {
    log::info!(
        "{}: orders={} gross={} discount={} net={} quantity={} avg_days_to_ship={}",
        label,
        format::count(m.orders),
        m.gross_revenue,
        m.discount_amount,
        m.net_revenue,
        m.quantity,
        format::days(m.avg_days_to_ship)
    );
}

/// Runs the three source queries and writes one file per table under `dir`.
pub fn extract_to_dir(conn: &mut PgConnection, dir: &Path) -> Result<ExtractReport, DomainError> {
    log::info!("Extracting order details");
    let facts = source::extract_order_details(conn)?;
    log::info!("Extracting products");
    let products = source::extract_products(conn)?;
    log::info!("Extracting suppliers");
    let suppliers = source::extract_suppliers(conn)?;

    let files = vec![
        flatfile::write_table(dir, &ORDER_DETAILS, &facts)?,
        flatfile::write_table(dir, &PRODUCTS, &products)?,
        flatfile::write_table(dir, &SUPPLIERS, &suppliers)?,
    ];
    for (path, rows) in files.iter().zip([facts.len(), products.len(), suppliers.len()]) {
        log::info!("Wrote {} rows to {}", rows, path.display());
    }

    let summary = metrics::summarize(&facts);
    log_summary("Extracted", &summary);

    Ok(ExtractReport {
        files,
        order_details: facts.len(),
        products: products.len(),
        suppliers: suppliers.len(),
        summary,
    })
}

/// Loads the three files under `dir` into the warehouse and rebuilds the view.
///
/// Every file is read and validated before the first table is touched, so a
/// malformed file leaves the warehouse as it was.
pub fn load_from_dir(
    conn: &mut PgConnection,
    schema: &str,
    dir: &Path,
    window: Option<DateWindow>,
) -> Result<LoadReport, DomainError> {
    let facts: Vec<FactRow> = flatfile::read_table(dir, &ORDER_DETAILS)?;
    let products: Vec<ProductRow> = flatfile::read_table(dir, &PRODUCTS)?;
    let suppliers: Vec<SupplierRow> = flatfile::read_table(dir, &SUPPLIERS)?;
    log::info!(
        "Read {} order details, {} products, {} suppliers from {}",
        facts.len(),
        products.len(),
        suppliers.len(),
        dir.display()
    );

    warehouse::prepare(conn, schema)?;
    let order_details = warehouse::overwrite_order_details(conn, &facts)?;
    let products = warehouse::overwrite_products(conn, &products)?;
    let suppliers = warehouse::overwrite_suppliers(conn, &suppliers)?;
    warehouse::create_order_details_view(conn)?;

    let verification = warehouse::verify(conn, window)?;
    log_summary("Warehouse", &verification);

    Ok(LoadReport {
        order_details,
        products,
        suppliers,
        verification,
    })
}
