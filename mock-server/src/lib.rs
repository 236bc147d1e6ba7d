//! Mock implementation of the EVE profit-calculator backend HTTP contract.
//!
//! Serves the `/api/v1` surface the client layer consumes: health check,
//! SDE/ESI connectivity probes, item lookup and item search. The item table
//! is a fixed in-memory seed; the connectivity probes can be flipped into a
//! degraded mode so tests can provoke genuine 500 responses.
//!
//! The item model here is defined independently of the client crate, so the
//! client's integration tests catch schema drift between the two.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// An item row as the backend's static data export stores it. Carries more
/// columns than the client decodes; the extras must not break the client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    pub type_id: i32,
    pub type_name: String,
    pub group_id: i32,
    pub group_name: String,
    pub category_id: i32,
    pub category_name: String,
    pub volume: f64,
    pub mass: f64,
    pub description: String,
}

/// Backend state: the item table plus availability flags for the two
/// connectivity probes.
#[derive(Clone, Debug)]
pub struct Backend {
    items: Vec<Item>,
    sde_ok: bool,
    esi_ok: bool,
}

impl Backend {
    /// Healthy backend with the standard mineral seed data.
    pub fn new() -> Self {
        Self {
            items: seed_items(),
            sde_ok: true,
            esi_ok: true,
        }
    }

    /// Backend whose SDE and ESI probes fail with 500.
    pub fn degraded() -> Self {
        Self {
            sde_ok: false,
            esi_ok: false,
            ..Self::new()
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_items() -> Vec<Item> {
    vec![
        Item {
            type_id: 34,
            type_name: "Tritanium".to_string(),
            group_id: 18,
            group_name: "Mineral".to_string(),
            category_id: 4,
            category_name: "Material".to_string(),
            volume: 0.01,
            mass: 1.0,
            description: "The most common ore type in the known universe, tritanium is still one of the most useful.".to_string(),
        },
        Item {
            type_id: 35,
            type_name: "Pyerite".to_string(),
            group_id: 18,
            group_name: "Mineral".to_string(),
            category_id: 4,
            category_name: "Material".to_string(),
            volume: 0.01,
            mass: 1.0,
            description: "Probably the most widely used ore for manufacturing basic technology.".to_string(),
        },
        Item {
            type_id: 36,
            type_name: "Mexallon".to_string(),
            group_id: 18,
            group_name: "Mineral".to_string(),
            category_id: 4,
            category_name: "Material".to_string(),
            volume: 0.01,
            mass: 1.0,
            description: "A soft crystal-like mineral used in a wide variety of modules.".to_string(),
        },
    ]
}

/// Router for the default healthy backend.
pub fn app() -> Router {
    app_with(Backend::new())
}

/// Router over an explicit backend state.
pub fn app_with(backend: Backend) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/sde/test", get(sde_test))
        .route("/esi/test", get(esi_test))
        .route("/items/{item_id}", get(item_details))
        .route("/items/search", get(search_items))
        .with_state(Arc::new(backend));
    Router::new().nest("/api/v1", api)
}

/// Serve the default backend on `listener` until the task is dropped.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Backend::new()).await
}

/// Serve an explicit backend state on `listener`.
pub async fn serve(listener: TcpListener, backend: Backend) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(backend)).await
}

#[derive(Serialize)]
struct HealthBody {
    status: String,
    time: DateTime<Utc>,
}

#[derive(Serialize)]
struct StatusBody {
    status: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct ItemResult {
    success: bool,
    data: Item,
}

/// `data` stays present-but-null when nothing matches, mirroring the nil
/// slice the original backend marshals.
#[derive(Serialize)]
struct SearchResult {
    success: bool,
    data: Option<Vec<Item>>,
}

#[derive(Serialize)]
struct FailureResult {
    success: bool,
    error: String,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "healthy".to_string(),
        time: Utc::now(),
    })
}

async fn sde_test(State(backend): State<Arc<Backend>>) -> Response {
    probe_response(backend.sde_ok, "SDE database unavailable")
}

async fn esi_test(State(backend): State<Arc<Backend>>) -> Response {
    probe_response(backend.esi_ok, "ESI upstream unavailable")
}

fn probe_response(ok: bool, failure: &str) -> Response {
    if ok {
        Json(StatusBody {
            status: "connected".to_string(),
        })
        .into_response()
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: failure.to_string(),
            }),
        )
            .into_response()
    }
}

async fn item_details(
    State(backend): State<Arc<Backend>>,
    Path(item_id): Path<String>,
) -> Response {
    let Ok(type_id) = item_id.parse::<i32>() else {
        return failure(StatusCode::BAD_REQUEST, "Invalid item ID format");
    };
    match backend.items.iter().find(|item| item.type_id == type_id) {
        Some(item) => Json(ItemResult {
            success: true,
            data: item.clone(),
        })
        .into_response(),
        None => failure(StatusCode::NOT_FOUND, "Item not found"),
    }
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search_items(
    State(backend): State<Arc<Backend>>,
    Query(params): Query<SearchParams>,
) -> Response {
    if params.q.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Search query is required");
    }
    let needle = params.q.to_lowercase();
    let matches: Vec<Item> = backend
        .items
        .iter()
        .filter(|item| item.type_name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    Json(SearchResult {
        success: true,
        data: if matches.is_empty() {
            None
        } else {
            Some(matches)
        },
    })
    .into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(FailureResult {
            success: false,
            error: message.to_string(),
        }),
    )
        .into_response()
}
