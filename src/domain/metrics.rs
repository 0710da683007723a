//! Aggregations behind the dashboard pages.
//!
//! Every function here is pure: it takes already-filtered rows and never fails.
//! Grouped outputs follow the sorted order of their group keys unless stated
//! otherwise; rows whose group key is missing are left out of that grouping.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::Datelike;
use serde::Serialize;
use utoipa::ToSchema;

use super::records::{DashboardRow, OrderDetailFact, ProductDim};

/// Number of entries in each top/bottom ranking.
pub const RANKING_SIZE: usize = 5;

/// The six headline metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    pub gross_revenue: BigDecimal,
    pub discount_amount: BigDecimal,
    pub net_revenue: BigDecimal,
    pub orders: usize,
    pub quantity: i64,
    /// `None` when no row has a days-to-ship value.
    pub avg_days_to_ship: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GeoRevenue {
    pub country: String,
    pub city: String,
    pub net_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyPoint {
    /// Calendar month as `YYYY-MM`.
    pub month: String,
    pub orders: usize,
    pub gross_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ShippingSpeed {
    pub shipping_company: String,
    pub avg_days_to_ship: Option<f64>,
}

/// Orders, quantity and money totals for one category or title.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Rollup {
    pub name: String,
    pub orders: usize,
    pub quantity: i64,
    pub gross_revenue: f64,
    pub discount_amount: f64,
    pub net_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RankedCount {
    pub name: String,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Ranking {
    pub top: Vec<RankedCount>,
    pub bottom: Vec<RankedCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryStock {
    pub category_name: String,
    pub units_in_stock: i64,
    pub units_on_order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RevenuePerOrder {
    pub employee_name: String,
    pub net_revenue: f64,
    pub orders: usize,
    pub net_revenue_per_order: f64,
}

#[derive(Default)]
struct Totals {
    orders: BTreeSet<i32>,
    quantity: i64,
    gross: BigDecimal,
    discount: BigDecimal,
    net: BigDecimal,
    days_sum: i64,
    days_count: usize,
}

impl Totals {
    fn add(&mut self, fact: &OrderDetailFact) {
        self.orders.insert(fact.order_id);
        self.quantity += i64::from(fact.quantity);
        self.gross += &fact.gross_revenue;
        self.discount += &fact.discount_amount;
        self.net += &fact.net_revenue;
        if let Some(days) = fact.days_to_ship {
            self.days_sum += i64::from(days);
            self.days_count += 1;
        }
    }

    fn avg_days(&self) -> Option<f64> {
        (self.days_count > 0).then(|| self.days_sum as f64 / self.days_count as f64)
    }

    fn into_rollup(self, name: String) -> Rollup {
        Rollup {
            name,
            orders: self.orders.len(),
            quantity: self.quantity,
            gross_revenue: money(&self.gross),
            discount_amount: money(&self.discount),
            net_revenue: money(&self.net),
        }
    }
}

fn money(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn group_by<R, K, F>(rows: &[R], key: F) -> BTreeMap<K, Totals>
where
    R: AsRef<OrderDetailFact>,
    K: Ord,
    F: Fn(&R) -> Option<K>,
{
    let mut groups: BTreeMap<K, Totals> = BTreeMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            groups.entry(k).or_default().add(row.as_ref());
        }
    }
    groups
}

pub fn summarize<R: AsRef<OrderDetailFact>>(rows: &[R]) -> SummaryMetrics {
    let mut totals = Totals::default();
    for row in rows {
        totals.add(row.as_ref());
    }
    SummaryMetrics {
        avg_days_to_ship: totals.avg_days(),
        orders: totals.orders.len(),
        quantity: totals.quantity,
        gross_revenue: totals.gross,
        discount_amount: totals.discount,
        net_revenue: totals.net,
    }
}

/// Net revenue per (country, city).
pub fn revenue_by_location<R: AsRef<OrderDetailFact>>(rows: &[R]) -> Vec<GeoRevenue> {
    group_by(rows, |r| {
        let fact = r.as_ref();
        Some((fact.country.clone()?, fact.city.clone()?))
    })
    .into_iter()
    .map(|((country, city), totals)| GeoRevenue {
        country,
        city,
        net_revenue: money(&totals.net),
    })
    .collect()
}

/// Gross revenue and distinct orders per calendar month of the order date.
pub fn monthly_revenue<R: AsRef<OrderDetailFact>>(rows: &[R]) -> Vec<MonthlyPoint> {
    group_by(rows, |r| {
        r.as_ref()
            .order_date
            .map(|d| (d.year(), d.month()))
    })
    .into_iter()
    .map(|((year, month), totals)| MonthlyPoint {
        month: format!("{year:04}-{month:02}"),
        orders: totals.orders.len(),
        gross_revenue: money(&totals.gross),
    })
    .collect()
}

/// Mean days-to-ship per shipping company, fastest first. Companies with no
/// shipped lines sort last.
pub fn shipping_speed<R: AsRef<OrderDetailFact>>(rows: &[R]) -> Vec<ShippingSpeed> {
    let mut speeds: Vec<ShippingSpeed> = group_by(rows, |r| r.as_ref().shipping_company.clone())
        .into_iter()
        .map(|(shipping_company, totals)| ShippingSpeed {
            avg_days_to_ship: totals.avg_days(),
            shipping_company,
        })
        .collect();
    speeds.sort_by(|a, b| {
        match (a.avg_days_to_ship, b.avg_days_to_ship) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.shipping_company.cmp(&b.shipping_company))
    });
    speeds
}

pub fn category_rollup(rows: &[&DashboardRow]) -> Vec<Rollup> {
    group_by(rows, |r| r.category_name.clone())
        .into_iter()
        .map(|(name, totals)| totals.into_rollup(name))
        .collect()
}

pub fn title_rollup<R: AsRef<OrderDetailFact>>(rows: &[R]) -> Vec<Rollup> {
    group_by(rows, |r| r.as_ref().title.clone())
        .into_iter()
        .map(|(name, totals)| totals.into_rollup(name))
        .collect()
}

/// Top and bottom [`RANKING_SIZE`] keys by distinct order count. Ties are broken by
/// name ascending in both lists.
fn rank<R, F>(rows: &[R], key: F) -> Ranking
where
    R: AsRef<OrderDetailFact>,
    F: Fn(&R) -> Option<String>,
{
    let counts: Vec<RankedCount> = group_by(rows, key)
        .into_iter()
        .map(|(name, totals)| RankedCount {
            name,
            orders: totals.orders.len(),
        })
        .collect();

    let mut top = counts.clone();
    top.sort_by(|a, b| b.orders.cmp(&a.orders).then_with(|| a.name.cmp(&b.name)));
    top.truncate(RANKING_SIZE);

    let mut bottom = counts;
    bottom.sort_by(|a, b| a.orders.cmp(&b.orders).then_with(|| a.name.cmp(&b.name)));
    bottom.truncate(RANKING_SIZE);

    Ranking { top, bottom }
}

pub fn product_ranking(rows: &[&DashboardRow]) -> Ranking {
    rank(rows, |r| r.product_name.clone())
}

pub fn employee_ranking<R: AsRef<OrderDetailFact>>(rows: &[R]) -> Ranking {
    rank(rows, |r| r.as_ref().employee_name.clone())
}

/// Net revenue divided by distinct orders per employee, highest first.
pub fn revenue_per_order<R: AsRef<OrderDetailFact>>(rows: &[R]) -> Vec<RevenuePerOrder> {
    let mut out: Vec<RevenuePerOrder> = group_by(rows, |r| r.as_ref().employee_name.clone())
        .into_iter()
        .map(|(employee_name, totals)| {
            let orders = totals.orders.len();
            let net_revenue = money(&totals.net);
            RevenuePerOrder {
                employee_name,
                net_revenue,
                orders,
                net_revenue_per_order: net_revenue / orders as f64,
            }
        })
        .collect();
    out.sort_by(|a, b| {
        b.net_revenue_per_order
            .total_cmp(&a.net_revenue_per_order)
            .then_with(|| a.employee_name.cmp(&b.employee_name))
    });
    out
}

/// Units in stock and on order per category, straight from the product dimension.
pub fn stock_by_category(products: &[ProductDim]) -> Vec<CategoryStock> {
    let mut groups: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for p in products {
        let entry = groups.entry(p.category_name.as_str()).or_default();
        entry.0 += i64::from(p.units_in_stock.unwrap_or(0));
        entry.1 += i64::from(p.units_on_order.unwrap_or(0));
    }
    groups
        .into_iter()
        .map(|(name, (in_stock, on_order))| CategoryStock {
            category_name: name.to_string(),
            units_in_stock: in_stock,
            units_on_order: on_order,
        })
        .collect()
}
