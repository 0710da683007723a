use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Deserialize;

use crate::domain::records::{DashboardRow, OrderDetailFact, ProductDim, SupplierDim};
use crate::schema::{order_details_fact, product_dim, suppliers_dim, v_order_details};

use super::coerce;

// Warehouse rows deserialize from intermediate files once their header has been
// renamed to the canonical uppercase schema.

#[derive(Debug, Clone, PartialEq, Deserialize, Insertable)]
#[serde(rename_all = "UPPERCASE")]
#[diesel(table_name = order_details_fact)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FactRow {
    pub orderid: i32,
    pub productid: i32,
    #[serde(deserialize_with = "coerce::decimal")]
    pub unitprice: BigDecimal,
    pub quantity: i32,
    #[serde(deserialize_with = "coerce::decimal")]
    pub discount_pct: BigDecimal,
    #[serde(deserialize_with = "coerce::optional_date")]
    pub orderdate: Option<NaiveDate>,
    #[serde(deserialize_with = "coerce::optional_date")]
    pub shippeddate: Option<NaiveDate>,
    pub companyname: Option<String>,
    pub contactname: Option<String>,
    pub contacttitle: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub lastname: Option<String>,
    pub employeename: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "coerce::optional_date")]
    pub hiredate: Option<NaiveDate>,
    pub employeecity: Option<String>,
    pub shippingcompany: Option<String>,
    #[serde(deserialize_with = "coerce::decimal")]
    pub grossrevenue: BigDecimal,
    #[serde(deserialize_with = "coerce::decimal")]
    pub discountamount: BigDecimal,
    #[serde(deserialize_with = "coerce::decimal")]
    pub netrevenue: BigDecimal,
    pub daystoship: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Insertable, Queryable, Selectable)]
#[serde(rename_all = "UPPERCASE")]
#[diesel(table_name = product_dim)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub categoryid: i32,
    pub categoryname: String,
    pub description: Option<String>,
    pub productid: i32,
    pub productname: String,
    pub supplierid: Option<i32>,
    #[serde(deserialize_with = "coerce::optional_decimal")]
    pub unitprice: Option<BigDecimal>,
    pub unitsinstock: Option<i32>,
    pub unitsonorder: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Insertable, Queryable, Selectable)]
#[serde(rename_all = "UPPERCASE")]
#[diesel(table_name = suppliers_dim)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SupplierRow {
    pub supplierid: i32,
    pub companyname: String,
    pub contactname: Option<String>,
    pub contacttitle: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = v_order_details)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderDetailViewRow {
    pub orderid: i32,
    pub productid: i32,
    pub unitprice: BigDecimal,
    pub quantity: i32,
    pub discount_pct: BigDecimal,
    pub orderdate: Option<NaiveDate>,
    pub shippeddate: Option<NaiveDate>,
    pub companyname: Option<String>,
    pub contactname: Option<String>,
    pub contacttitle: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub lastname: Option<String>,
    pub employeename: Option<String>,
    pub title: Option<String>,
    pub hiredate: Option<NaiveDate>,
    pub employeecity: Option<String>,
    pub shippingcompany: Option<String>,
    pub grossrevenue: BigDecimal,
    pub discountamount: BigDecimal,
    pub netrevenue: BigDecimal,
    pub daystoship: Option<i32>,
    pub categoryname: Option<String>,
    pub productname: Option<String>,
    pub unitsinstock: Option<i32>,
    pub unitsonorder: Option<i32>,
}

impl From<OrderDetailViewRow> for DashboardRow {
    fn from(r: OrderDetailViewRow) -> Self {
        DashboardRow {
            fact: OrderDetailFact {
                order_id: r.orderid,
                product_id: r.productid,
                unit_price: r.unitprice,
                quantity: r.quantity,
                discount: r.discount_pct,
                order_date: r.orderdate,
                shipped_date: r.shippeddate,
                company_name: r.companyname,
                contact_name: r.contactname,
                contact_title: r.contacttitle,
                city: r.city,
                country: r.country,
                last_name: r.lastname,
                employee_name: r.employeename,
                title: r.title,
                hire_date: r.hiredate,
                employee_city: r.employeecity,
                shipping_company: r.shippingcompany,
                gross_revenue: r.grossrevenue,
                discount_amount: r.discountamount,
                net_revenue: r.netrevenue,
                days_to_ship: r.daystoship,
            },
            category_name: r.categoryname,
            product_name: r.productname,
            units_in_stock: r.unitsinstock,
            units_on_order: r.unitsonorder,
        }
    }
}

impl From<ProductRow> for ProductDim {
    fn from(r: ProductRow) -> Self {
        ProductDim {
            category_id: r.categoryid,
            category_name: r.categoryname,
            description: r.description,
            product_id: r.productid,
            product_name: r.productname,
            supplier_id: r.supplierid,
            unit_price: r.unitprice,
            units_in_stock: r.unitsinstock,
            units_on_order: r.unitsonorder,
        }
    }
}

impl From<SupplierRow> for SupplierDim {
    fn from(r: SupplierRow) -> Self {
        SupplierDim {
            supplier_id: r.supplierid,
            company_name: r.companyname,
            contact_name: r.contactname,
            contact_title: r.contacttitle,
            city: r.city,
            country: r.country,
        }
    }
}
