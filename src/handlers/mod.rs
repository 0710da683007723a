pub mod dashboard;

use actix_web::web;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        dashboard::filter_options,
        dashboard::overview,
        dashboard::category_product,
        dashboard::employees,
        dashboard::suppliers,
        dashboard::invalidate_cache,
    ),
    tags((name = "dashboard", description = "Order analytics read from the warehouse"))
)]
pub struct ApiDoc;

/// Registers the page and the JSON endpoints. The caller supplies the
/// `DashboardService` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard::index)).service(
        web::scope("/api")
            .route("/filters", web::get().to(dashboard::filter_options))
            .route("/overview", web::get().to(dashboard::overview))
            .route("/category-product", web::get().to(dashboard::category_product))
            .route("/employees", web::get().to(dashboard::employees))
            .route("/suppliers", web::get().to(dashboard::suppliers))
            .route("/cache/invalidate", web::post().to(dashboard::invalidate_cache)),
    );
}
