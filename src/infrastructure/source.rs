//! Read-only extraction from the operational database.
//!
//! Three fixed queries produce the fact table and the two dimensions. Casts pin the
//! result types so the loaders below do not depend on the exact source column types.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Date, Integer, Nullable, Numeric, Text};

use crate::db::quote_ident;
use crate::domain::errors::DomainError;
use crate::domain::records::{OrderDetailFact, ProductDim, SupplierDim};

const ORDER_DETAILS_QUERY: &str = r#"
SELECT
    od.order_id::int4 AS order_id,
    od.product_id::int4 AS product_id,
    od.unit_price::numeric AS unit_price,
    od.quantity::int4 AS quantity,
    od.discount::numeric AS discount,
    o.order_date::date AS order_date,
    o.shipped_date::date AS shipped_date,
    c.company_name::text AS company_name,
    c.contact_name::text AS contact_name,
    c.contact_title::text AS contact_title,
    c.city::text AS city,
    c.country::text AS country,
    e.last_name::text AS last_name,
    e.first_name::text AS employee_name,
    e.title::text AS title,
    e.hire_date::date AS hire_date,
    e.city::text AS employee_city,
    sh.company_name::text AS shipping_company
FROM order_details od
JOIN orders o ON od.order_id = o.order_id
LEFT JOIN customers c ON o.customer_id = c.customer_id
LEFT JOIN employees e ON o.employee_id = e.employee_id
LEFT JOIN shippers sh ON o.ship_via = sh.shipper_id
ORDER BY od.order_id, od.product_id
"#;

const PRODUCTS_QUERY: &str = r#"
SELECT
    c.category_id::int4 AS category_id,
    c.category_name::text AS category_name,
    c.description::text AS description,
    p.product_id::int4 AS product_id,
    p.product_name::text AS product_name,
    p.supplier_id::int4 AS supplier_id,
    p.unit_price::numeric AS unit_price,
    p.units_in_stock::int4 AS units_in_stock,
    p.units_on_order::int4 AS units_on_order
FROM products p
JOIN categories c ON p.category_id = c.category_id
ORDER BY p.product_id
"#;

const SUPPLIERS_QUERY: &str = r#"
SELECT
    supplier_id::int4 AS supplier_id,
    company_name::text AS company_name,
    contact_name::text AS contact_name,
    contact_title::text AS contact_title,
    city::text AS city,
    country::text AS country
FROM suppliers
ORDER BY supplier_id
"#;

#[derive(Debug, QueryableByName)]
struct OrderDetailSourceRow {
    #[diesel(sql_type = Integer)]
    order_id: i32,
    #[diesel(sql_type = Integer)]
    product_id: i32,
    #[diesel(sql_type = Numeric)]
    unit_price: BigDecimal,
    #[diesel(sql_type = Integer)]
    quantity: i32,
    #[diesel(sql_type = Numeric)]
    discount: BigDecimal,
    #[diesel(sql_type = Nullable<Date>)]
    order_date: Option<NaiveDate>,
    #[diesel(sql_type = Nullable<Date>)]
    shipped_date: Option<NaiveDate>,
    #[diesel(sql_type = Nullable<Text>)]
    company_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    contact_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    contact_title: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    city: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    country: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    last_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    employee_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    title: Option<String>,
    #[diesel(sql_type = Nullable<Date>)]
    hire_date: Option<NaiveDate>,
    #[diesel(sql_type = Nullable<Text>)]
    employee_city: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    shipping_company: Option<String>,
}

impl From<OrderDetailSourceRow> for OrderDetailFact {
    fn from(r: OrderDetailSourceRow) -> Self {
        OrderDetailFact {
            company_name: r.company_name,
            contact_name: r.contact_name,
            contact_title: r.contact_title,
            city: r.city,
            country: r.country,
            last_name: r.last_name,
            employee_name: r.employee_name,
            title: r.title,
            hire_date: r.hire_date,
            employee_city: r.employee_city,
            shipping_company: r.shipping_company,
            ..OrderDetailFact::new(
                r.order_id,
                r.product_id,
                r.unit_price,
                r.quantity,
                r.discount,
                r.order_date,
                r.shipped_date,
            )
        }
    }
}

#[derive(Debug, QueryableByName)]
struct ProductSourceRow {
    #[diesel(sql_type = Integer)]
    category_id: i32,
    #[diesel(sql_type = Text)]
    category_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    description: Option<String>,
    #[diesel(sql_type = Integer)]
    product_id: i32,
    #[diesel(sql_type = Text)]
    product_name: String,
    #[diesel(sql_type = Nullable<Integer>)]
    supplier_id: Option<i32>,
    #[diesel(sql_type = Nullable<Numeric>)]
    unit_price: Option<BigDecimal>,
    #[diesel(sql_type = Nullable<Integer>)]
    units_in_stock: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    units_on_order: Option<i32>,
}

#[derive(Debug, QueryableByName)]
struct SupplierSourceRow {
    #[diesel(sql_type = Integer)]
    supplier_id: i32,
    #[diesel(sql_type = Text)]
    company_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    contact_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    contact_title: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    city: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    country: Option<String>,
}

/// Order lines joined with order, customer, employee and shipper, ordered by
/// (order id, product id), with their derived measures filled in.
pub fn extract_order_details(conn: &mut PgConnection) -> Result<Vec<OrderDetailFact>, DomainError> {
    let rows = diesel::sql_query(ORDER_DETAILS_QUERY).load::<OrderDetailSourceRow>(conn)?;
    Ok(rows.into_iter().map(OrderDetailFact::from).collect())
}

pub fn extract_products(conn: &mut PgConnection) -> Result<Vec<ProductDim>, DomainError> {
    let rows = diesel::sql_query(PRODUCTS_QUERY).load::<ProductSourceRow>(conn)?;
    Ok(rows
        .into_iter()
        .map(|r| ProductDim {
            category_id: r.category_id,
            category_name: r.category_name,
            description: r.description,
            product_id: r.product_id,
            product_name: r.product_name,
            supplier_id: r.supplier_id,
            unit_price: r.unit_price,
            units_in_stock: r.units_in_stock,
            units_on_order: r.units_on_order,
        })
        .collect())
}

pub fn extract_suppliers(conn: &mut PgConnection) -> Result<Vec<SupplierDim>, DomainError> {
    let rows = diesel::sql_query(SUPPLIERS_QUERY).load::<SupplierSourceRow>(conn)?;
    Ok(rows
        .into_iter()
        .map(|r| SupplierDim {
            supplier_id: r.supplier_id,
            company_name: r.company_name,
            contact_name: r.contact_name,
            contact_title: r.contact_title,
            city: r.city,
            country: r.country,
        })
        .collect())
}

// ── Source inspection ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableProfile {
    pub name: String,
    pub row_count: i64,
    pub columns: Vec<ColumnProfile>,
}

#[derive(QueryableByName)]
struct TableNameRow {
    #[diesel(sql_type = Text)]
    table_name: String,
}

#[derive(QueryableByName)]
struct RowCountRow {
    #[diesel(sql_type = BigInt)]
    row_count: i64,
}

#[derive(QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    column_name: String,
    #[diesel(sql_type = Text)]
    data_type: String,
    #[diesel(sql_type = Bool)]
    nullable: bool,
}

/// Base tables of `schema` with their row counts and column definitions, by name.
pub fn inspect_schema(conn: &mut PgConnection, schema: &str) -> Result<Vec<TableProfile>, DomainError> {
    let tables = diesel::sql_query(
        "SELECT table_name::text AS table_name FROM information_schema.tables \
         WHERE table_schema = $1 AND table_type = 'BASE TABLE' ORDER BY table_name",
    )
    .bind::<Text, _>(schema)
    .load::<TableNameRow>(conn)?;

    let mut profiles = Vec::with_capacity(tables.len());
    for table in tables {
        let count = diesel::sql_query(format!(
            "SELECT COUNT(*) AS row_count FROM {}.{}",
            quote_ident(schema),
            quote_ident(&table.table_name)
        ))
        .get_result::<RowCountRow>(conn)?;

        let columns = diesel::sql_query(
            "SELECT column_name::text AS column_name, data_type::text AS data_type, \
             (is_nullable = 'YES') AS nullable FROM information_schema.columns \
             WHERE table_schema = $1 AND table_name = $2 ORDER BY ordinal_position",
        )
        .bind::<Text, _>(schema)
        .bind::<Text, _>(&table.table_name)
        .load::<ColumnRow>(conn)?;

        profiles.push(TableProfile {
            name: table.table_name,
            row_count: count.row_count,
            columns: columns
                .into_iter()
                .map(|c| ColumnProfile {
                    name: c.column_name,
                    data_type: c.data_type,
                    nullable: c.nullable,
                })
                .collect(),
        });
    }
    Ok(profiles)
}
