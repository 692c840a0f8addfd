// src/domain/mod.rs
pub mod error;
pub mod question;
pub mod repositories;
pub mod tag;
pub mod user;
