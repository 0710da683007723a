use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::application::dashboard_service::DashboardService;
use crate::domain::filter::{DashboardFilter, DateWindow};
use crate::domain::records::SupplierDim;
use crate::domain::report::{CategoryProductPage, EmployeesPage, FilterOptions, OverviewPage};
use crate::errors::AppError;

const INDEX_HTML: &str = include_str!("../../static/dashboard.html");

// ── Query parameters ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Category name, or `All`.
    pub category: Option<String>,
    /// Customer country, or `All`.
    pub country: Option<String>,
    /// Employee title, or `All`.
    pub title: Option<String>,
    /// First order date included, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// Last order date included, `YYYY-MM-DD`.
    pub end: Option<String>,
}

fn parse_date(name: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("{name}={raw:?} is not a YYYY-MM-DD date: {e}")))
}

impl TryFrom<DashboardQuery> for DashboardFilter {
    type Error = AppError;

    fn try_from(q: DashboardQuery) -> Result<Self, Self::Error> {
        let blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let order_dates = match (blank(q.start), blank(q.end)) {
            (None, None) => None,
            (Some(start), Some(end)) => Some(DateWindow::new(
                parse_date("start", &start)?,
                parse_date("end", &end)?,
            )?),
            _ => {
                return Err(AppError::BadRequest(
                    "start and end must be given together".to_string(),
                ))
            }
        };
        Ok(DashboardFilter {
            category: DashboardFilter::selection(q.category),
            country: DashboardFilter::selection(q.country),
            title: DashboardFilter::selection(q.title),
            order_dates,
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /
///
/// The dashboard page; it pulls everything else from the JSON endpoints.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[utoipa::path(
    get,
    path = "/api/filters",
    responses(
        (status = 200, description = "Values available to the filter controls", body = FilterOptions),
        (status = 503, description = "Warehouse unreachable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dashboard"
)]
pub async fn filter_options(service: web::Data<DashboardService>) -> Result<HttpResponse, AppError> {
    let options = web::block(move || service.filter_options()).await??;
    Ok(HttpResponse::Ok().json(options))
}

/// GET /api/overview
///
/// Headline metrics, revenue by location, monthly series and shipping speed.
#[utoipa::path(
    get,
    path = "/api/overview",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Overview page", body = OverviewPage),
        (status = 400, description = "Malformed filter"),
        (status = 503, description = "Warehouse unreachable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dashboard"
)]
pub async fn overview(
    service: web::Data<DashboardService>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = DashboardFilter::try_from(query.into_inner())?;
    let page = web::block(move || service.overview(&filter)).await??;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/category-product
#[utoipa::path(
    get,
    path = "/api/category-product",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Category and product page", body = CategoryProductPage),
        (status = 400, description = "Malformed filter"),
        (status = 503, description = "Warehouse unreachable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dashboard"
)]
pub async fn category_product(
    service: web::Data<DashboardService>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = DashboardFilter::try_from(query.into_inner())?;
    let page = web::block(move || service.category_product(&filter)).await??;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Employees page", body = EmployeesPage),
        (status = 400, description = "Malformed filter"),
        (status = 503, description = "Warehouse unreachable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dashboard"
)]
pub async fn employees(
    service: web::Data<DashboardService>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = DashboardFilter::try_from(query.into_inner())?;
    let page = web::block(move || service.employees(&filter)).await??;
    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/api/suppliers",
    responses(
        (status = 200, description = "Supplier dimension rows", body = [SupplierDim]),
        (status = 503, description = "Warehouse unreachable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dashboard"
)]
pub async fn suppliers(service: web::Data<DashboardService>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || service.suppliers()).await??;
    Ok(HttpResponse::Ok().json(rows.as_slice()))
}

/// POST /api/cache/invalidate
///
/// Drops every cached warehouse read; the next request queries again.
#[utoipa::path(
    post,
    path = "/api/cache/invalidate",
    responses(
        (status = 204, description = "Cache cleared"),
    ),
    tag = "dashboard"
)]
pub async fn invalidate_cache(service: web::Data<DashboardService>) -> HttpResponse {
    service.invalidate();
    HttpResponse::NoContent().finish()
}
