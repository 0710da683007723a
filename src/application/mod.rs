pub mod dashboard_service;
pub mod pipeline;
