use chrono::NaiveDate;

use super::errors::DomainError;
use super::records::DashboardRow;

/// Label the dashboard uses for "no restriction".
pub const ALL: &str = "All";

/// Inclusive order-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidInput(format!(
                "date range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The four dashboard filters. `None` means no restriction; all set filters must
/// match for a row to be kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardFilter {
    pub category: Option<String>,
    pub country: Option<String>,
    pub title: Option<String>,
    pub order_dates: Option<DateWindow>,
}

impl DashboardFilter {
    /// Normalises a selector value: empty or [`ALL`] lifts the restriction.
    pub fn selection(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty() && v != ALL)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.category.is_none()
            && self.country.is_none()
            && self.title.is_none()
            && self.order_dates.is_none()
    }

    pub fn matches(&self, row: &DashboardRow) -> bool {
        exact(&self.category, &row.category_name)
            && exact(&self.country, &row.fact.country)
            && exact(&self.title, &row.fact.title)
            && match self.order_dates {
                None => true,
                Some(window) => row.fact.order_date.is_some_and(|d| window.contains(d)),
            }
    }

    pub fn apply<'a>(&self, rows: &'a [DashboardRow]) -> Vec<&'a DashboardRow> {
        if self.is_unrestricted() {
            return rows.iter().collect();
        }
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

fn exact(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual.as_deref() == Some(wanted.as_str()),
    }
}
