// src/lib.rs

// Re-export or define the top-level modules you need
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

// Shared error alias used across the service layer
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
