use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::filter::{DashboardFilter, DateWindow};
use crate::domain::ports::DashboardSource;
use crate::domain::records::SupplierDim;
use crate::domain::report::{CategoryProductPage, EmployeesPage, FilterOptions, OverviewPage};

/// Builds the dashboard pages from whatever the source currently serves.
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn DashboardSource>,
    default_window: Option<DateWindow>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn DashboardSource>, default_window: Option<DateWindow>) -> Self {
        Self {
            source,
            default_window,
        }
    }

    pub fn overview(&self, filter: &DashboardFilter) -> Result<OverviewPage, DomainError> {
        let rows = self.source.order_details()?;
        Ok(OverviewPage::build(&filter.apply(&rows)))
    }

    pub fn category_product(&self, filter: &DashboardFilter) -> Result<CategoryProductPage, DomainError> {
        let rows = self.source.order_details()?;
        let products = self.source.products()?;
        Ok(CategoryProductPage::build(&filter.apply(&rows), &products))
    }

    pub fn employees(&self, filter: &DashboardFilter) -> Result<EmployeesPage, DomainError> {
        let rows = self.source.order_details()?;
        Ok(EmployeesPage::build(&filter.apply(&rows)))
    }

    pub fn filter_options(&self) -> Result<FilterOptions, DomainError> {
        let rows = self.source.order_details()?;
        Ok(FilterOptions::build(&rows, self.default_window))
    }

    pub fn suppliers(&self) -> Result<Arc<Vec<SupplierDim>>, DomainError> {
        self.source.suppliers()
    }

    pub fn invalidate(&self) {
        self.source.invalidate();
    }
}
