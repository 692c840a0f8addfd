// src/application/mod.rs
pub mod error;
pub mod services;

// Re-export key services for easier imports
pub use services::tag_query_service_impl::TagQueryServiceImpl;
