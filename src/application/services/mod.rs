// src/application/services/mod.rs
pub mod factory;
pub mod tag_query_service;
pub mod tag_query_service_impl;
