//! Domain DTOs for the EVE backend API.
//!
//! # Design
//! These types mirror the backend's JSON contract but are defined
//! independently of the mock-server crate; integration tests catch schema
//! drift. Optional item fields default to `None` when the backend omits
//! them, and unknown fields are ignored, so the client keeps working when
//! the SDE model grows columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An EVE item record from the backend's static data export.
///
/// Produced only by the backend; the client never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EveItem {
    pub type_id: i32,
    pub type_name: String,
    pub group_id: i32,
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: String,
    pub time: DateTime<Utc>,
}

/// Result of the `/sde/test` and `/esi/test` diagnostic endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub status: String,
}

/// Envelope of `GET /items/{id}`: `data` is required, so a success body
/// without an item fails to decode and is classified by the transport.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemResponse {
    pub success: bool,
    pub data: EveItem,
}

/// Envelope of `GET /items/search`: the backend serializes "no matches" as
/// either `[]` or `null` (a nil slice on its side), so `data` is optional
/// and both spellings decode to the same empty result.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSearchResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<EveItem>>,
}
