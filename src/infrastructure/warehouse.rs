use bigdecimal::{BigDecimal, ToPrimitive};
use diesel::connection::SimpleConnection;
use diesel::dsl::{avg, count_distinct, sum};
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel_migrations::MigrationHarness;

use crate::db::{quote_ident, set_search_path};
use crate::domain::errors::DomainError;
use crate::domain::filter::DateWindow;
use crate::domain::layout::{ORDER_DETAILS, ORDER_DETAILS_VIEW, PRODUCTS, SUPPLIERS};
use crate::domain::metrics::SummaryMetrics;
use crate::schema::{order_details_fact, product_dim, suppliers_dim};
use crate::MIGRATIONS;

use super::models::{FactRow, ProductRow, SupplierRow};

/// Rows per INSERT statement; keeps the fact table well under the bind limit.
const INSERT_CHUNK: usize = 1000;

/// Table DDL shared with the embedded migration; every statement is
/// `CREATE TABLE IF NOT EXISTS`.
const WAREHOUSE_TABLES_DDL: &str =
    include_str!("../../migrations/2024-01-01-000000_create_warehouse_tables/up.sql");

fn order_details_view_ddl() -> String {
    format!(
        r#"
CREATE OR REPLACE VIEW {view} AS
SELECT
    o.*,
    p."CATEGORYNAME",
    p."PRODUCTNAME",
    p."UNITSINSTOCK",
    p."UNITSONORDER"
FROM {facts} o
LEFT JOIN {products} p ON o."PRODUCTID" = p."PRODUCTID"
"#,
        view = quote_ident(ORDER_DETAILS_VIEW),
        facts = quote_ident(ORDER_DETAILS.table),
        products = quote_ident(PRODUCTS.table),
    )
}

/// Creates the warehouse schema if needed, switches the connection to it and
/// creates any missing warehouse table.
pub fn prepare(conn: &mut PgConnection, schema: &str) -> Result<(), DomainError> {
    conn.batch_execute(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))?;
    set_search_path(conn, schema)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DomainError::Query(e.to_string()))?;
    for version in applied {
        log::info!("Applied warehouse migration {}", version);
    }
    // The migration is recorded once; tables dropped since then come back here.
    conn.batch_execute(WAREHOUSE_TABLES_DDL)?;
    Ok(())
}

/// Replaces the whole content of one table inside a single transaction, so a
/// failed write leaves the previous rows in place.
fn replace_all<R>(
    conn: &mut PgConnection,
    table: &'static str,
    rows: &[R],
    clear: impl Fn(&mut PgConnection) -> QueryResult<usize>,
    insert: impl Fn(&mut PgConnection, &[R]) -> QueryResult<usize>,
) -> Result<usize, DomainError> {
    conn.transaction::<_, DomainError, _>(|conn| {
        let removed = clear(conn)?;
        let mut written = 0;
        for chunk in rows.chunks(INSERT_CHUNK) {
            written += insert(conn, chunk)?;
        }
        log::info!("{}: replaced {} rows with {}", table, removed, written);
        Ok(written)
    })
}

pub fn overwrite_order_details(conn: &mut PgConnection, rows: &[FactRow]) -> Result<usize, DomainError> {
    replace_all(
        conn,
        ORDER_DETAILS.table,
        rows,
        |c| diesel::delete(order_details_fact::table).execute(c),
        |c, chunk| {
            diesel::insert_into(order_details_fact::table)
                .values(chunk)
                .execute(c)
        },
    )
}

pub fn overwrite_products(conn: &mut PgConnection, rows: &[ProductRow]) -> Result<usize, DomainError> {
    replace_all(
        conn,
        PRODUCTS.table,
        rows,
        |c| diesel::delete(product_dim::table).execute(c),
        |c, chunk| diesel::insert_into(product_dim::table).values(chunk).execute(c),
    )
}

pub fn overwrite_suppliers(conn: &mut PgConnection, rows: &[SupplierRow]) -> Result<usize, DomainError> {
    replace_all(
        conn,
        SUPPLIERS.table,
        rows,
        |c| diesel::delete(suppliers_dim::table).execute(c),
        |c, chunk| diesel::insert_into(suppliers_dim::table).values(chunk).execute(c),
    )
}

pub fn create_order_details_view(conn: &mut PgConnection) -> Result<(), DomainError> {
    conn.batch_execute(&order_details_view_ddl())?;
    log::info!("{} created", ORDER_DETAILS_VIEW);
    Ok(())
}

fn windowed<'a>(window: Option<DateWindow>) -> order_details_fact::BoxedQuery<'a, Pg> {
    let mut query = order_details_fact::table.into_boxed();
    if let Some(w) = window {
        query = query.filter(order_details_fact::orderdate.between(w.start, w.end));
    }
    query
}

/// Headline totals computed inside the warehouse, optionally limited to an
/// inclusive order-date window.
pub fn verify(conn: &mut PgConnection, window: Option<DateWindow>) -> Result<SummaryMetrics, DomainError> {
    use crate::schema::order_details_fact::dsl::*;

    let orders: i64 = windowed(window)
        .select(count_distinct(orderid))
        .get_result(conn)?;
    let gross: Option<BigDecimal> = windowed(window).select(sum(grossrevenue)).get_result(conn)?;
    let discount: Option<BigDecimal> = windowed(window)
        .select(sum(discountamount))
        .get_result(conn)?;
    let net: Option<BigDecimal> = windowed(window).select(sum(netrevenue)).get_result(conn)?;
    let units: Option<i64> = windowed(window).select(sum(quantity)).get_result(conn)?;
    let mean_days: Option<BigDecimal> = windowed(window).select(avg(daystoship)).get_result(conn)?;

    Ok(SummaryMetrics {
        gross_revenue: gross.unwrap_or_default(),
        discount_amount: discount.unwrap_or_default(),
        net_revenue: net.unwrap_or_default(),
        orders: usize::try_from(orders).unwrap_or_default(),
        quantity: units.unwrap_or(0),
        avg_days_to_ship: mean_days.and_then(|d| d.to_f64()),
    })
}
