pub mod models;
pub mod cache;
