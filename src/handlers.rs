pub mod auth;
pub mod batches;
pub mod dashboard;
pub mod import;
