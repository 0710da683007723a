use std::sync::Arc;
use std::time::Duration;

use diesel::debug_query;
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::DashboardSource;
use crate::domain::records::{DashboardRow, ProductDim, SupplierDim};
use crate::schema::{product_dim, suppliers_dim, v_order_details};

use super::cache::{Freshness, TtlCache};
use super::models::{OrderDetailViewRow, ProductRow, SupplierRow};

/// Pooled warehouse reads behind a per-query TTL cache.
pub struct WarehouseSource {
    pool: DbPool,
    order_details: TtlCache<Vec<DashboardRow>>,
    products: TtlCache<Vec<ProductDim>>,
    suppliers: TtlCache<Vec<SupplierDim>>,
}

impl WarehouseSource {
    pub fn new(pool: DbPool, ttl: Duration) -> Self {
        Self {
            pool,
            order_details: TtlCache::new(ttl),
            products: TtlCache::new(ttl),
            suppliers: TtlCache::new(ttl),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        self.order_details.ttl()
    }

    /// Runs `load` through the cache under the text of its query.
    fn cached<T, Q>(
        &self,
        cache: &TtlCache<Vec<T>>,
        query: Q,
        load: impl FnOnce(Q, &mut PgConnection) -> QueryResult<Vec<T>>,
    ) -> Result<Arc<Vec<T>>, DomainError>
    where
        Q: diesel::query_builder::QueryFragment<Pg>,
    {
        let key = debug_query::<Pg, _>(&query).to_string();
        if cache.state(&key) == Freshness::Stale {
            log::debug!("cache miss, querying warehouse: {}", key);
        }
        cache.get_or_fetch(&key, || {
            let mut conn = self.pool.get()?;
            let rows = load(query, &mut conn)?;
            log::debug!("fetched {} rows", rows.len());
            Ok(rows)
        })
    }
}

impl DashboardSource for WarehouseSource {
    fn order_details(&self) -> Result<Arc<Vec<DashboardRow>>, DomainError> {
        let query = v_order_details::table
            .select(OrderDetailViewRow::as_select())
            .order((v_order_details::orderid, v_order_details::productid));
        self.cached(&self.order_details, query, |q, conn| {
            Ok(q.load::<OrderDetailViewRow>(conn)?
                .into_iter()
                .map(DashboardRow::from)
                .collect())
        })
    }

    fn products(&self) -> Result<Arc<Vec<ProductDim>>, DomainError> {
        let query = product_dim::table
            .select(ProductRow::as_select())
            .order(product_dim::productid);
        self.cached(&self.products, query, |q, conn| {
            Ok(q.load::<ProductRow>(conn)?
                .into_iter()
                .map(ProductDim::from)
                .collect())
        })
    }

    fn suppliers(&self) -> Result<Arc<Vec<SupplierDim>>, DomainError> {
        let query = suppliers_dim::table
            .select(SupplierRow::as_select())
            .order(suppliers_dim::supplierid);
        self.cached(&self.suppliers, query, |q, conn| {
            Ok(q.load::<SupplierRow>(conn)?
                .into_iter()
                .map(SupplierDim::from)
                .collect())
        })
    }

    fn invalidate(&self) {
        self.order_details.invalidate_all();
        self.products.invalidate_all();
        self.suppliers.invalidate_all();
        log::info!("dashboard cache invalidated");
    }
}
