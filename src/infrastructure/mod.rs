// src/infrastructure/mod.rs
pub mod error;
pub mod repositories;
