use std::collections::BTreeSet;

use bigdecimal::ToPrimitive;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::filter::DateWindow;
use super::format;
use super::metrics::{
    self, CategoryStock, GeoRevenue, MonthlyPoint, Ranking, RevenuePerOrder, Rollup,
    ShippingSpeed, SummaryMetrics,
};
use super::records::{DashboardRow, ProductDim};

/// Headline metrics as numbers plus their display strings.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SummaryView {
    pub gross_revenue: f64,
    pub discount_amount: f64,
    pub net_revenue: f64,
    pub orders: usize,
    pub quantity: i64,
    pub avg_days_to_ship: Option<f64>,
    pub display: SummaryDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SummaryDisplay {
    pub gross_revenue: String,
    pub discount_amount: String,
    pub net_revenue: String,
    pub orders: String,
    pub quantity: String,
    pub avg_days_to_ship: String,
}

impl From<&SummaryMetrics> for SummaryView {
    fn from(m: &SummaryMetrics) -> Self {
        let gross = m.gross_revenue.to_f64().unwrap_or(0.0);
        let discount = m.discount_amount.to_f64().unwrap_or(0.0);
        let net = m.net_revenue.to_f64().unwrap_or(0.0);
        Self {
            display: SummaryDisplay {
                gross_revenue: format::compact(gross),
                discount_amount: format::compact(discount),
                net_revenue: format::compact(net),
                orders: format::count(m.orders),
                quantity: format::compact(m.quantity as f64),
                avg_days_to_ship: format::days(m.avg_days_to_ship),
            },
            gross_revenue: gross,
            discount_amount: discount,
            net_revenue: net,
            orders: m.orders,
            quantity: m.quantity,
            avg_days_to_ship: m.avg_days_to_ship,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OverviewPage {
    pub summary: SummaryView,
    pub revenue_by_location: Vec<GeoRevenue>,
    pub monthly: Vec<MonthlyPoint>,
    pub shipping: Vec<ShippingSpeed>,
}

impl OverviewPage {
    pub fn build(rows: &[&DashboardRow]) -> Self {
        Self {
            summary: SummaryView::from(&metrics::summarize(rows)),
            revenue_by_location: metrics::revenue_by_location(rows),
            monthly: metrics::monthly_revenue(rows),
            shipping: metrics::shipping_speed(rows),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryProductPage {
    pub products: Ranking,
    pub categories: Vec<Rollup>,
    pub stock: Vec<CategoryStock>,
}

impl CategoryProductPage {
    /// Stock levels describe the whole catalogue and ignore the row filters.
    pub fn build(rows: &[&DashboardRow], products: &[ProductDim]) -> Self {
        Self {
            products: metrics::product_ranking(rows),
            categories: metrics::category_rollup(rows),
            stock: metrics::stock_by_category(products),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmployeesPage {
    pub employees: Ranking,
    pub titles: Vec<Rollup>,
    pub revenue_per_order: Vec<RevenuePerOrder>,
}

impl EmployeesPage {
    pub fn build(rows: &[&DashboardRow]) -> Self {
        Self {
            employees: metrics::employee_ranking(rows),
            titles: metrics::title_rollup(rows),
            revenue_per_order: metrics::revenue_per_order(rows),
        }
    }
}

/// Choices offered by the filter controls.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub countries: Vec<String>,
    pub titles: Vec<String>,
    pub min_order_date: Option<NaiveDate>,
    pub max_order_date: Option<NaiveDate>,
    pub default_start: Option<NaiveDate>,
    pub default_end: Option<NaiveDate>,
}

impl FilterOptions {
    pub fn build(rows: &[DashboardRow], default_window: Option<DateWindow>) -> Self {
        let distinct = |pick: fn(&DashboardRow) -> Option<&String>| -> Vec<String> {
            rows.iter()
                .filter_map(pick)
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };
        let dates = rows.iter().filter_map(|r| r.fact.order_date);
        Self {
            categories: distinct(|r| r.category_name.as_ref()),
            countries: distinct(|r| r.fact.country.as_ref()),
            titles: distinct(|r| r.fact.title.as_ref()),
            min_order_date: dates.clone().min(),
            max_order_date: dates.max(),
            default_start: default_window.map(|w| w.start),
            default_end: default_window.map(|w| w.end),
        }
    }
}
