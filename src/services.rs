pub mod auth;
pub mod batch_service;
pub mod dashboard_service;
pub mod import;
