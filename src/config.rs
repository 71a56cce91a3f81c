// src/config.rs
use log::warn;
use std::env;

pub const PRODUCTION_API_URL: &str = "https://windborne-systems-app.onrender.com/api";
pub const LOCAL_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the vendor data backend, without a trailing slash.
    pub api_base_url: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url = resolve_api_base_url(
            env::var("VENDOR_API_URL").ok(),
            env::var("APP_ENV").ok(),
        );

        // Get port from the host environment, default to 3030
        let port_str = env::var("PORT").unwrap_or_else(|_| {
            warn!("$PORT not set, defaulting to 3030");
            "3030".to_string()
        });
        let port: u16 = port_str.parse().expect("PORT must be a number");

        AppConfig { api_base_url, port }
    }
}

/// An explicit VENDOR_API_URL wins; otherwise APP_ENV selects between the
/// production and local development hosts.
fn resolve_api_base_url(override_url: Option<String>, app_env: Option<String>) -> String {
    if let Some(url) = override_url {
        return url.trim_end_matches('/').to_string();
    }
    match app_env.as_deref() {
        Some("production") => PRODUCTION_API_URL.to_string(),
        _ => LOCAL_API_URL.to_string(),
    }
}
