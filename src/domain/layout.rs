//! Column layouts of the three extracted tables.
//!
//! Each column has a business label (the header of the intermediate file) and a
//! canonical uppercase name (the warehouse column). The presentation layer uses the
//! lowercase form of the canonical name.

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub label: &'static str,
    pub canonical: &'static str,
}

const fn col(label: &'static str, canonical: &'static str) -> ColumnMapping {
    ColumnMapping { label, canonical }
}

#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    /// Warehouse table name.
    pub table: &'static str,
    /// Intermediate file name inside the data directory.
    pub file_name: &'static str,
    pub columns: &'static [ColumnMapping],
}

pub const ORDER_DETAILS: TableLayout = TableLayout {
    table: "ORDER_DETAILS_FACT",
    file_name: "order_details_fact.csv",
    columns: &[
        col("OrderID", "ORDERID"),
        col("ProductID", "PRODUCTID"),
        col("UnitPrice", "UNITPRICE"),
        col("Quantity", "QUANTITY"),
        col("Discount (%)", "DISCOUNT_PCT"),
        col("OrderDate", "ORDERDATE"),
        col("ShippedDate", "SHIPPEDDATE"),
        col("CompanyName", "COMPANYNAME"),
        col("ContactName", "CONTACTNAME"),
        col("ContactTitle", "CONTACTTITLE"),
        col("City", "CITY"),
        col("Country", "COUNTRY"),
        col("LastName", "LASTNAME"),
        col("Employee Name", "EMPLOYEENAME"),
        col("Title", "TITLE"),
        col("HireDate", "HIREDATE"),
        col("Employee City", "EMPLOYEECITY"),
        col("Shipping Company", "SHIPPINGCOMPANY"),
        col("Gross Revenue", "GROSSREVENUE"),
        col("Discount ($)", "DISCOUNTAMOUNT"),
        col("Net Revenue", "NETREVENUE"),
        col("Days to Ship", "DAYSTOSHIP"),
    ],
};

pub const PRODUCTS: TableLayout = TableLayout {
    table: "PRODUCT_DIM",
    file_name: "product_dim.csv",
    columns: &[
        col("CategoryID", "CATEGORYID"),
        col("Category Name", "CATEGORYNAME"),
        col("Description", "DESCRIPTION"),
        col("ProductID", "PRODUCTID"),
        col("Product Name", "PRODUCTNAME"),
        col("SupplierID", "SUPPLIERID"),
        col("UnitPrice", "UNITPRICE"),
        col("UnitsInStock", "UNITSINSTOCK"),
        col("UnitsOnOrder", "UNITSONORDER"),
    ],
};

pub const SUPPLIERS: TableLayout = TableLayout {
    table: "SUPPLIERS_DIM",
    file_name: "suppliers_dim.csv",
    columns: &[
        col("SupplierID", "SUPPLIERID"),
        col("CompanyName", "COMPANYNAME"),
        col("ContactName", "CONTACTNAME"),
        col("ContactTitle", "CONTACTTITLE"),
        col("City", "CITY"),
        col("Country", "COUNTRY"),
    ],
};

pub const ORDER_DETAILS_VIEW: &str = "V_ORDER_DETAILS";

impl TableLayout {
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.label)
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.canonical)
    }

    /// Checks an incoming header against the business labels, by count and then
    /// position by position. Nothing is renamed unless every column lines up.
    pub fn validate_header<'a, I>(&self, header: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let found: Vec<&str> = header.into_iter().collect();
        if found.len() != self.columns.len() {
            return Err(DomainError::ShapeMismatch {
                table: self.table,
                detail: format!(
                    "expected {} columns, found {}",
                    self.columns.len(),
                    found.len()
                ),
            });
        }
        for (position, (expected, actual)) in self.columns.iter().zip(&found).enumerate() {
            if expected.label != *actual {
                return Err(DomainError::ShapeMismatch {
                    table: self.table,
                    detail: format!(
                        "column {}: expected '{}', found '{}'",
                        position + 1,
                        expected.label,
                        actual
                    ),
                });
            }
        }
        Ok(())
    }

    /// Validates `header` and returns the canonical names in the same order.
    pub fn rename<'a, I>(&self, header: I) -> Result<Vec<&'static str>, DomainError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.validate_header(header)?;
        Ok(self.canonical_names().collect())
    }
}

pub fn presentation_name(canonical: &str) -> String {
    canonical.to_lowercase()
}
