pub mod errors;
pub mod filter;
pub mod format;
pub mod layout;
pub mod measures;
pub mod metrics;
pub mod ports;
pub mod records;
pub mod report;
