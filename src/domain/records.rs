use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::measures::{days_to_ship, LineMeasures};

// Serialized field names are the lowercase presentation names; field order is the
// column order of the intermediate files.

/// One order line joined with its order, customer, employee and shipper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetailFact {
    #[serde(rename = "orderid")]
    pub order_id: i32,
    #[serde(rename = "productid")]
    pub product_id: i32,
    #[serde(rename = "unitprice")]
    pub unit_price: BigDecimal,
    pub quantity: i32,
    #[serde(rename = "discount_pct")]
    pub discount: BigDecimal,
    #[serde(rename = "orderdate")]
    pub order_date: Option<NaiveDate>,
    #[serde(rename = "shippeddate")]
    pub shipped_date: Option<NaiveDate>,
    #[serde(rename = "companyname")]
    pub company_name: Option<String>,
    #[serde(rename = "contactname")]
    pub contact_name: Option<String>,
    #[serde(rename = "contacttitle")]
    pub contact_title: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "lastname")]
    pub last_name: Option<String>,
    #[serde(rename = "employeename")]
    pub employee_name: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "hiredate")]
    pub hire_date: Option<NaiveDate>,
    #[serde(rename = "employeecity")]
    pub employee_city: Option<String>,
    #[serde(rename = "shippingcompany")]
    pub shipping_company: Option<String>,
    #[serde(rename = "grossrevenue")]
    pub gross_revenue: BigDecimal,
    #[serde(rename = "discountamount")]
    pub discount_amount: BigDecimal,
    #[serde(rename = "netrevenue")]
    pub net_revenue: BigDecimal,
    #[serde(rename = "daystoship")]
    pub days_to_ship: Option<i32>,
}

impl OrderDetailFact {
    /// Builds a line with its derived measures; descriptive attributes start empty.
    pub fn new(
        order_id: i32,
        product_id: i32,
        unit_price: BigDecimal,
        quantity: i32,
        discount: BigDecimal,
        order_date: Option<NaiveDate>,
        shipped_date: Option<NaiveDate>,
    ) -> Self {
        let measures = LineMeasures::compute(&unit_price, quantity, &discount);
        Self {
            order_id,
            product_id,
            unit_price,
            quantity,
            discount,
            order_date,
            shipped_date,
            company_name: None,
            contact_name: None,
            contact_title: None,
            city: None,
            country: None,
            last_name: None,
            employee_name: None,
            title: None,
            hire_date: None,
            employee_city: None,
            shipping_company: None,
            gross_revenue: measures.gross_revenue,
            discount_amount: measures.discount_amount,
            net_revenue: measures.net_revenue,
            days_to_ship: days_to_ship(order_date, shipped_date),
        }
    }
}

impl AsRef<OrderDetailFact> for OrderDetailFact {
    fn as_ref(&self) -> &OrderDetailFact {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDim {
    #[serde(rename = "categoryid")]
    pub category_id: i32,
    #[serde(rename = "categoryname")]
    pub category_name: String,
    pub description: Option<String>,
    #[serde(rename = "productid")]
    pub product_id: i32,
    #[serde(rename = "productname")]
    pub product_name: String,
    #[serde(rename = "supplierid")]
    pub supplier_id: Option<i32>,
    #[serde(rename = "unitprice")]
    pub unit_price: Option<BigDecimal>,
    #[serde(rename = "unitsinstock")]
    pub units_in_stock: Option<i32>,
    #[serde(rename = "unitsonorder")]
    pub units_on_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SupplierDim {
    #[serde(rename = "supplierid")]
    pub supplier_id: i32,
    #[serde(rename = "companyname")]
    pub company_name: String,
    #[serde(rename = "contactname")]
    pub contact_name: Option<String>,
    #[serde(rename = "contacttitle")]
    pub contact_title: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// A row of the order-details view: the fact line plus its product attributes,
/// which are absent when the product id has no dimension row.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRow {
    pub fact: OrderDetailFact,
    pub category_name: Option<String>,
    pub product_name: Option<String>,
    pub units_in_stock: Option<i32>,
    pub units_on_order: Option<i32>,
}

impl AsRef<OrderDetailFact> for DashboardRow {
    fn as_ref(&self) -> &OrderDetailFact {
        &self.fact
    }
}
