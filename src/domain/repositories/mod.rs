// src/domain/repositories/mod.rs
pub mod query;
pub mod repository;
