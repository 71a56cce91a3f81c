// End-to-end route behavior against an unreachable backend: the first load
// has no prior data, so failures must surface as the blocking error view
// with a retry binding, and the auxiliary widgets must degrade gracefully.
use std::net::TcpListener;
use std::sync::Arc;

use serde_json::Value;
use warp::{Filter, Reply};

use vendor_dashboard::routes;
use vendor_dashboard::services::dashboard::Dashboard;
use vendor_dashboard::services::key_status::KeyStatusMonitor;
use vendor_dashboard::services::vendor_api::VendorApi;

/// A base URL that refuses connections: bind an ephemeral port, then drop
/// the listener before anyone connects.
fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

fn test_routes(
) -> impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone + 'static {
    let api = VendorApi::new(unreachable_base_url());
    let dashboard = Arc::new(Dashboard::new(api.clone()));
    let keys = Arc::new(KeyStatusMonitor::new(api.clone()));
    routes::routes(dashboard, keys, api)
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("JSON body")
}

#[tokio::test]
async fn first_load_failure_renders_blocking_error_with_retry() {
    let filter = test_routes();
    let response = warp::test::request()
        .method("GET")
        .path("/api/v1/dashboard")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), 200);
    let body = json_body(response.body());
    assert_eq!(body["view"], "error");
    assert!(!body["message"].as_str().unwrap_or_default().is_empty());
    assert_eq!(body["retry"], "/api/v1/refresh");
}

#[tokio::test]
async fn retry_reissues_the_fetch() {
    let filter = test_routes();
    let first = warp::test::request()
        .method("GET")
        .path("/api/v1/dashboard")
        .reply(&filter)
        .await;
    assert_eq!(json_body(first.body())["view"], "error");

    // the retry control posts to the refresh route; with the backend still
    // down the error view comes back again
    let response = warp::test::request()
        .method("POST")
        .path("/api/v1/refresh")
        .reply(&filter)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response.body())["view"], "error");
}

#[tokio::test]
async fn key_status_degrades_to_unavailable() {
    let filter = test_routes();
    let response = warp::test::request()
        .method("GET")
        .path("/api/v1/keys/status")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response.body())["status"], "unavailable");
}

#[tokio::test]
async fn vendor_export_404s_when_nothing_is_loaded() {
    let filter = test_routes();
    let response = warp::test::request()
        .method("GET")
        .path("/api/v1/vendors/TEL/export")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), 404);
    let body = json_body(response.body());
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn bulk_export_maps_backend_failure_to_bad_gateway() {
    let filter = test_routes();
    let response = warp::test::request()
        .method("GET")
        .path("/api/v1/export/csv")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), 502);
    let body = json_body(response.body());
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn cache_clear_only_refreshes_stats() {
    let filter = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/api/v1/cache/clear")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response.body())["success"], true);
}

#[tokio::test]
async fn blacklist_reset_failure_is_reported() {
    let filter = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/api/v1/keys/reset")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), 502);
    let body = json_body(response.body());
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}
