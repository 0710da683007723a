// Warehouse tables keep the uppercase column names of the canonical schema.
// Keep in sync with migrations/2024-01-01-000000_create_warehouse_tables.

diesel::table! {
    #[sql_name = "ORDER_DETAILS_FACT"]
    order_details_fact (orderid, productid) {
        #[sql_name = "ORDERID"]
        orderid -> Int4,
        #[sql_name = "PRODUCTID"]
        productid -> Int4,
        #[sql_name = "UNITPRICE"]
        unitprice -> Numeric,
        #[sql_name = "QUANTITY"]
        quantity -> Int4,
        #[sql_name = "DISCOUNT_PCT"]
        discount_pct -> Numeric,
        #[sql_name = "ORDERDATE"]
        orderdate -> Nullable<Date>,
        #[sql_name = "SHIPPEDDATE"]
        shippeddate -> Nullable<Date>,
        #[sql_name = "COMPANYNAME"]
        companyname -> Nullable<Text>,
        #[sql_name = "CONTACTNAME"]
        contactname -> Nullable<Text>,
        #[sql_name = "CONTACTTITLE"]
        contacttitle -> Nullable<Text>,
        #[sql_name = "CITY"]
        city -> Nullable<Text>,
        #[sql_name = "COUNTRY"]
        country -> Nullable<Text>,
        #[sql_name = "LASTNAME"]
        lastname -> Nullable<Text>,
        #[sql_name = "EMPLOYEENAME"]
        employeename -> Nullable<Text>,
        #[sql_name = "TITLE"]
        title -> Nullable<Text>,
        #[sql_name = "HIREDATE"]
        hiredate -> Nullable<Date>,
        #[sql_name = "EMPLOYEECITY"]
        employeecity -> Nullable<Text>,
        #[sql_name = "SHIPPINGCOMPANY"]
        shippingcompany -> Nullable<Text>,
        #[sql_name = "GROSSREVENUE"]
        grossrevenue -> Numeric,
        #[sql_name = "DISCOUNTAMOUNT"]
        discountamount -> Numeric,
        #[sql_name = "NETREVENUE"]
        netrevenue -> Numeric,
        #[sql_name = "DAYSTOSHIP"]
        daystoship -> Nullable<Int4>,
    }
}

diesel::table! {
    #[sql_name = "PRODUCT_DIM"]
    product_dim (productid) {
        #[sql_name = "CATEGORYID"]
        categoryid -> Int4,
        #[sql_name = "CATEGORYNAME"]
        categoryname -> Text,
        #[sql_name = "DESCRIPTION"]
        description -> Nullable<Text>,
        #[sql_name = "PRODUCTID"]
        productid -> Int4,
        #[sql_name = "PRODUCTNAME"]
        productname -> Text,
        #[sql_name = "SUPPLIERID"]
        supplierid -> Nullable<Int4>,
        #[sql_name = "UNITPRICE"]
        unitprice -> Nullable<Numeric>,
        #[sql_name = "UNITSINSTOCK"]
        unitsinstock -> Nullable<Int4>,
        #[sql_name = "UNITSONORDER"]
        unitsonorder -> Nullable<Int4>,
    }
}

diesel::table! {
    #[sql_name = "SUPPLIERS_DIM"]
    suppliers_dim (supplierid) {
        #[sql_name = "SUPPLIERID"]
        supplierid -> Int4,
        #[sql_name = "COMPANYNAME"]
        companyname -> Text,
        #[sql_name = "CONTACTNAME"]
        contactname -> Nullable<Text>,
        #[sql_name = "CONTACTTITLE"]
        contacttitle -> Nullable<Text>,
        #[sql_name = "CITY"]
        city -> Nullable<Text>,
        #[sql_name = "COUNTRY"]
        country -> Nullable<Text>,
    }
}

// View created by the loader; the left join makes the product columns nullable.
diesel::table! {
    #[sql_name = "V_ORDER_DETAILS"]
    v_order_details (orderid, productid) {
        #[sql_name = "ORDERID"]
        orderid -> Int4,
        #[sql_name = "PRODUCTID"]
        productid -> Int4,
        #[sql_name = "UNITPRICE"]
        unitprice -> Numeric,
        #[sql_name = "QUANTITY"]
        quantity -> Int4,
        #[sql_name = "DISCOUNT_PCT"]
        discount_pct -> Numeric,
        #[sql_name = "ORDERDATE"]
        orderdate -> Nullable<Date>,
        #[sql_name = "SHIPPEDDATE"]
        shippeddate -> Nullable<Date>,
        #[sql_name = "COMPANYNAME"]
        companyname -> Nullable<Text>,
        #[sql_name = "CONTACTNAME"]
        contactname -> Nullable<Text>,
        #[sql_name = "CONTACTTITLE"]
        contacttitle -> Nullable<Text>,
        #[sql_name = "CITY"]
        city -> Nullable<Text>,
        #[sql_name = "COUNTRY"]
        country -> Nullable<Text>,
        #[sql_name = "LASTNAME"]
        lastname -> Nullable<Text>,
        #[sql_name = "EMPLOYEENAME"]
        employeename -> Nullable<Text>,
        #[sql_name = "TITLE"]
        title -> Nullable<Text>,
        #[sql_name = "HIREDATE"]
        hiredate -> Nullable<Date>,
        #[sql_name = "EMPLOYEECITY"]
        employeecity -> Nullable<Text>,
        #[sql_name = "SHIPPINGCOMPANY"]
        shippingcompany -> Nullable<Text>,
        #[sql_name = "GROSSREVENUE"]
        grossrevenue -> Numeric,
        #[sql_name = "DISCOUNTAMOUNT"]
        discountamount -> Numeric,
        #[sql_name = "NETREVENUE"]
        netrevenue -> Numeric,
        #[sql_name = "DAYSTOSHIP"]
        daystoship -> Nullable<Int4>,
        #[sql_name = "CATEGORYNAME"]
        categoryname -> Nullable<Text>,
        #[sql_name = "PRODUCTNAME"]
        productname -> Nullable<Text>,
        #[sql_name = "UNITSINSTOCK"]
        unitsinstock -> Nullable<Int4>,
        #[sql_name = "UNITSONORDER"]
        unitsonorder -> Nullable<Int4>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    order_details_fact,
    product_dim,
    suppliers_dim,
    v_order_details,
);
