// src/lib.rs

// Core modules
pub mod application;
pub mod domain;
pub mod infrastructure;

pub mod config;
pub mod util;
