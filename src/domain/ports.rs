use std::sync::Arc;

use super::errors::DomainError;
use super::records::{DashboardRow, ProductDim, SupplierDim};

/// Read side of the warehouse as the dashboard sees it.
pub trait DashboardSource: Send + Sync + 'static {
    fn order_details(&self) -> Result<Arc<Vec<DashboardRow>>, DomainError>;
    fn products(&self) -> Result<Arc<Vec<ProductDim>>, DomainError>;
    fn suppliers(&self) -> Result<Arc<Vec<SupplierDim>>, DomainError>;
    /// Marks every cached read stale so the next access re-fetches.
    fn invalidate(&self);
}
