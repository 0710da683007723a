//! HTTP tests for the dashboard endpoints against an in-memory warehouse.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde_json::Value;

use order_analytics::application::dashboard_service::DashboardService;
use order_analytics::domain::errors::DomainError;
use order_analytics::domain::filter::DateWindow;
use order_analytics::domain::ports::DashboardSource;
use order_analytics::domain::records::{DashboardRow, OrderDetailFact, ProductDim, SupplierDim};
use order_analytics::handlers;

struct InMemory {
    rows: Arc<Vec<DashboardRow>>,
    products: Arc<Vec<ProductDim>>,
    suppliers: Arc<Vec<SupplierDim>>,
    reads: AtomicUsize,
    invalidations: AtomicUsize,
    reachable: bool,
}

impl DashboardSource for InMemory {
    fn order_details(&self) -> Result<Arc<Vec<DashboardRow>>, DomainError> {
        if !self.reachable {
            return Err(DomainError::Connection("connection refused".to_string()));
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.rows))
    }

    fn products(&self) -> Result<Arc<Vec<ProductDim>>, DomainError> {
        Ok(Arc::clone(&self.products))
    }

    fn suppliers(&self) -> Result<Arc<Vec<SupplierDim>>, DomainError> {
        Ok(Arc::clone(&self.suppliers))
    }

    fn invalidate(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[allow(clippy::too_many_arguments)]
fn row(
    order_id: i32,
    product: (i32, &str, &str),
    unit_price: i64,
    quantity: i32,
    discount: &str,
    ordered: &str,
    shipped: Option<&str>,
    who: (&str, &str, &str),
) -> DashboardRow {
    let (product_id, product_name, category) = product;
    let (employee, title, country) = who;
    let mut fact = OrderDetailFact::new(
        order_id,
        product_id,
        BigDecimal::from(unit_price),
        quantity,
        discount.parse().unwrap(),
        Some(date(ordered)),
        shipped.map(date),
    );
    fact.employee_name = Some(employee.to_string());
    fact.title = Some(title.to_string());
    fact.country = Some(country.to_string());
    fact.city = Some("Berlin".to_string());
    fact.shipping_company = Some("Speedy Express".to_string());
    DashboardRow {
        fact,
        category_name: Some(category.to_string()),
        product_name: Some(product_name.to_string()),
        units_in_stock: Some(10),
        units_on_order: Some(0),
    }
}

fn rows() -> Vec<DashboardRow> {
    vec![
        row(
            1,
            (1, "Chai", "A"),
            10,
            2,
            "0.1",
            "1997-01-01",
            Some("1997-01-05"),
            ("Nancy", "Sales Representative", "Germany"),
        ),
        row(
            2,
            (2, "Chang", "B"),
            20,
            1,
            "0",
            "1997-02-01",
            None,
            ("Andrew", "Vice President, Sales", "France"),
        ),
    ]
}

fn source(reachable: bool) -> Arc<InMemory> {
    Arc::new(InMemory {
        rows: Arc::new(rows()),
        products: Arc::new(vec![ProductDim {
            category_id: 1,
            category_name: "A".to_string(),
            description: None,
            product_id: 1,
            product_name: "Chai".to_string(),
            supplier_id: Some(1),
            unit_price: None,
            units_in_stock: Some(39),
            units_on_order: Some(5),
        }]),
        suppliers: Arc::new(vec![SupplierDim {
            supplier_id: 1,
            company_name: "Exotic Liquids".to_string(),
            contact_name: None,
            contact_title: None,
            city: Some("London".to_string()),
            country: Some("UK".to_string()),
        }]),
        reads: AtomicUsize::new(0),
        invalidations: AtomicUsize::new(0),
        reachable,
    })
}

fn service_for(source: Arc<InMemory>) -> DashboardService {
    let window = DateWindow::new(date("1996-11-10"), date("1997-12-27")).unwrap();
    DashboardService::new(source, Some(window))
}

macro_rules! app {
    ($source:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(service_for($source)))
                .configure(handlers::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn overview_reports_the_headline_metrics() {
    let app = app!(source(true));
    let req = test::TestRequest::get().uri("/api/overview").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let summary = &body["summary"];
    assert_eq!(summary["gross_revenue"], 40.0);
    assert_eq!(summary["discount_amount"], 2.0);
    assert_eq!(summary["net_revenue"], 38.0);
    assert_eq!(summary["orders"], 2);
    assert_eq!(summary["quantity"], 3);
    assert_eq!(summary["avg_days_to_ship"], 4.0);
    assert_eq!(summary["display"]["avg_days_to_ship"], "4.00");
    assert_eq!(body["monthly"].as_array().unwrap().len(), 2);
    assert_eq!(body["monthly"][0]["month"], "1997-01");
}

#[actix_web::test]
async fn filter_selecting_nothing_renders_zeroes() {
    let app = app!(source(true));
    let req = test::TestRequest::get()
        .uri("/api/overview?category=Produce&country=All")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["summary"]["orders"], 0);
    assert_eq!(body["summary"]["gross_revenue"], 0.0);
    assert!(body["summary"]["avg_days_to_ship"].is_null());
    assert_eq!(body["summary"]["display"]["avg_days_to_ship"], "n/a");
    assert!(body["revenue_by_location"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn date_window_is_applied() {
    let app = app!(source(true));
    let req = test::TestRequest::get()
        .uri("/api/overview?start=1997-01-15&end=1997-12-27")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["summary"]["orders"], 1);
    assert_eq!(body["summary"]["gross_revenue"], 20.0);
}

#[actix_web::test]
async fn malformed_dates_are_rejected() {
    let app = app!(source(true));
    for uri in [
        "/api/overview?start=1997-13-01&end=1997-12-27",
        "/api/employees?start=1997-12-27&end=1996-11-10",
        "/api/category-product?end=1997-12-27",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[actix_web::test]
async fn unreachable_warehouse_is_a_503() {
    let app = app!(source(false));
    let req = test::TestRequest::get().uri("/api/employees").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[actix_web::test]
async fn category_product_page_ranks_and_rolls_up() {
    let app = app!(source(true));
    let req = test::TestRequest::get().uri("/api/category-product").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    // One order each: ties resolve by name.
    let top: Vec<&str> = body["products"]["top"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(top, vec!["Chai", "Chang"]);
    assert_eq!(body["categories"][0]["name"], "A");
    assert_eq!(body["categories"][0]["net_revenue"], 18.0);
    assert_eq!(body["stock"][0]["units_in_stock"], 39);
}

#[actix_web::test]
async fn employees_page_sorts_revenue_per_order_descending() {
    let app = app!(source(true));
    let req = test::TestRequest::get().uri("/api/employees").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let per_order = body["revenue_per_order"].as_array().unwrap();
    assert_eq!(per_order[0]["employee_name"], "Andrew");
    assert_eq!(per_order[0]["net_revenue_per_order"], 20.0);
    assert_eq!(per_order[1]["employee_name"], "Nancy");
    assert_eq!(body["titles"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn filter_options_list_distinct_values() {
    let app = app!(source(true));
    let req = test::TestRequest::get().uri("/api/filters").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["categories"], serde_json::json!(["A", "B"]));
    assert_eq!(body["countries"], serde_json::json!(["France", "Germany"]));
    assert_eq!(body["min_order_date"], "1997-01-01");
    assert_eq!(body["default_start"], "1996-11-10");
}

#[actix_web::test]
async fn suppliers_use_lowercase_keys() {
    let app = app!(source(true));
    let req = test::TestRequest::get().uri("/api/suppliers").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["supplierid"], 1);
    assert_eq!(body[0]["companyname"], "Exotic Liquids");
}

#[actix_web::test]
async fn invalidate_endpoint_clears_the_source_cache() {
    let src = source(true);
    let app = app!(src.clone());
    let req = test::TestRequest::post().uri("/api/cache/invalidate").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(src.invalidations.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn index_serves_the_dashboard_page() {
    let app = app!(source(true));
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Order Analytics"));
}
