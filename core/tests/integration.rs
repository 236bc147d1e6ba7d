//! End-to-end round trips against the live mock backend.
//!
//! Each test starts the backend on an ephemeral port, wires the real
//! transport and services against it, and drives the public surface the
//! presentation layer consumes — including every branch of the error
//! classification.

use std::sync::Arc;

use eveprofit_core::{
    ApiTransport, ErrorKind, HealthProbeWorkflow, HealthService, ItemsService, Phase,
    SearchWorkflow,
};
use mock_server::Backend;
use tokio::net::TcpListener;

async fn start_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

async fn start_degraded_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::serve(listener, Backend::degraded()));
    format!("http://{addr}")
}

/// Address of a port that was just bound and released: connecting to it is
/// refused, so no response is ever received.
async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn transport(base_url: &str) -> Arc<ApiTransport> {
    Arc::new(ApiTransport::new(base_url).unwrap())
}

// --- services over real HTTP ---

#[tokio::test]
async fn health_status_round_trip() {
    let base = start_backend().await;
    let health = HealthService::new(transport(&base));

    let snapshot = health.get_health_status().await.unwrap();
    assert_eq!(snapshot.status, "healthy");
}

#[tokio::test]
async fn connectivity_probes_report_connected() {
    let base = start_backend().await;
    let health = HealthService::new(transport(&base));

    assert_eq!(
        health.check_database_connection().await.unwrap().status,
        "connected"
    );
    assert_eq!(
        health.check_esi_connection().await.unwrap().status,
        "connected"
    );
}

#[tokio::test]
async fn degraded_probes_are_server_errors_with_status_500() {
    let base = start_degraded_backend().await;
    let health = HealthService::new(transport(&base));

    let err = health.check_database_connection().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.status, 500);
    assert!(err.message.contains("SDE database unavailable"));

    let err = health.check_esi_connection().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.status, 500);
    assert!(err.message.contains("ESI upstream unavailable"));
}

#[tokio::test]
async fn get_item_by_id_returns_the_unwrapped_item() {
    let base = start_backend().await;
    let items = ItemsService::new(transport(&base));

    let item = items.get_item_by_id(34).await.unwrap();
    assert_eq!(item.type_id, 34);
    assert_eq!(item.type_name, "Tritanium");
    assert_eq!(item.group_id, 18);
    assert_eq!(item.volume, 0.01);
    assert_eq!(item.mass, Some(1.0));
}

#[tokio::test]
async fn find_tritanium_resolves_the_canonical_item() {
    let base = start_backend().await;
    let items = ItemsService::new(transport(&base));

    let item = items.find_tritanium().await.unwrap();
    assert_eq!(item.type_id, 34);
}

#[tokio::test]
async fn unknown_item_is_a_server_error_with_status_404() {
    let base = start_backend().await;
    let items = ItemsService::new(transport(&base));

    let err = items.get_item_by_id(999_999).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.status, 404);
    assert!(err.message.contains("Item not found"));
}

#[tokio::test]
async fn empty_query_at_the_service_layer_is_rejected_by_the_backend() {
    let base = start_backend().await;
    let items = ItemsService::new(transport(&base));

    // The workflow guards the empty query locally; the bare service does
    // not, so the backend's 400 comes through classified.
    let err = items.search_items("").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.status, 400);
    assert!(err.message.contains("Search query is required"));
}

#[tokio::test]
async fn search_encodes_the_query_string() {
    let base = start_backend().await;
    let items = ItemsService::new(transport(&base));

    // Spaces must be URL-encoded on the wire; "tri tanium" matches nothing
    // but has to reach the backend as a well-formed request.
    let matches = items.search_items("tri tanium").await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let base = unreachable_base_url().await;
    let items = ItemsService::new(transport(&base));

    let err = items.get_item_by_id(34).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.status, 0);
    assert_eq!(err.message, "Network error - Backend server not reachable");
}

#[tokio::test]
async fn post_to_a_get_route_is_a_server_error() {
    let base = start_backend().await;
    let transport = transport(&base);

    let err = transport
        .post::<serde_json::Value, ()>("/items/search", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.status, 405);
}

// --- workflows over real HTTP ---

#[tokio::test]
async fn search_workflow_succeeds_end_to_end() {
    let base = start_backend().await;
    let items = Arc::new(ItemsService::new(transport(&base)));
    let workflow = SearchWorkflow::new(items);

    workflow.submit("trit").await;

    let state = workflow.state();
    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].type_id, 34);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn search_workflow_treats_null_data_as_no_matches() {
    let base = start_backend().await;
    let items = Arc::new(ItemsService::new(transport(&base)));
    let workflow = SearchWorkflow::new(items);

    workflow.submit("NonExistentItemXYZ123").await;

    let state = workflow.state();
    assert_eq!(state.phase, Phase::Error);
    assert!(state.results.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some("No items found for \"NonExistentItemXYZ123\"")
    );
}

#[tokio::test]
async fn search_workflow_renders_the_network_failure() {
    let base = unreachable_base_url().await;
    let items = Arc::new(ItemsService::new(transport(&base)));
    let workflow = SearchWorkflow::new(items);

    workflow.submit("Tritanium").await;

    let state = workflow.state();
    assert_eq!(state.phase, Phase::Error);
    assert_eq!(
        state.error.as_deref(),
        Some("Search failed: Network error - Backend server not reachable")
    );
}

#[tokio::test]
async fn health_probe_workflow_succeeds_end_to_end() {
    let base = start_backend().await;
    let health = Arc::new(HealthService::new(transport(&base)));
    let workflow = HealthProbeWorkflow::new(health);

    workflow.run().await;

    let state = workflow.state();
    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.health.unwrap().status, "healthy");
}

#[tokio::test]
async fn health_probe_workflow_renders_backend_error_when_unreachable() {
    let base = unreachable_base_url().await;
    let health = Arc::new(HealthService::new(transport(&base)));
    let workflow = HealthProbeWorkflow::new(health);

    workflow.run().await;

    let state = workflow.state();
    assert_eq!(state.phase, Phase::Error);
    assert!(state.health.is_none());
    assert_eq!(
        state.error.as_deref(),
        Some("Backend Error: Network error - Backend server not reachable")
    );
}

#[tokio::test]
async fn health_probe_retry_recovers_once_the_backend_is_up() {
    // Probe an unreachable address first, then retry against a live one by
    // rebinding the released port for the mock backend.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let health = Arc::new(HealthService::new(transport(&format!("http://{addr}"))));
    let workflow = HealthProbeWorkflow::new(health);

    workflow.run().await;
    assert_eq!(workflow.state().phase, Phase::Error);

    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(mock_server::run(listener));

    workflow.retry().await;

    let state = workflow.state();
    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.health.unwrap().status, "healthy");
}
