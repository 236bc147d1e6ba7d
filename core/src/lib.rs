//! Typed client layer for the EVE profit-calculator backend.
//!
//! # Overview
//! Three layers, composed bottom-up and injected explicitly:
//! - [`ApiTransport`] — the single configured HTTP client (base URL, `/api/v1`
//!   prefix, JSON headers, 10 s timeout) and the only place failures are
//!   classified into [`ApiError`].
//! - [`HealthService`] / [`ItemsService`] — domain-shaped operations over the
//!   transport; they return domain types and propagate classified errors
//!   unchanged.
//! - [`SearchWorkflow`] / [`HealthProbeWorkflow`] — per-workflow state
//!   machines that sequence a service call through
//!   `idle → loading → {success, error}` and derive the user-facing message
//!   from the error taxonomy.
//!
//! # Design
//! - The transport is injected into each service and the services into the
//!   workflows, keeping lifetimes and test substitution explicit.
//! - Failures cross layer boundaries only as [`ApiError`] values; the
//!   workflows never see a raw transport error.
//! - Nothing retries and nothing is cached; recovery is always an explicit
//!   `submit`/`retry` intent.

pub mod error;
pub mod health;
pub mod items;
pub mod transport;
pub mod types;
pub mod workflow;

pub use error::{ApiError, ErrorKind};
pub use health::HealthService;
pub use items::{ItemsService, TRITANIUM_TYPE_ID};
pub use transport::{ApiTransport, API_BASE_URL, API_VERSION};
pub use types::{ConnectionStatus, EveItem, HealthSnapshot, ItemResponse, ItemSearchResponse};
pub use workflow::{
    HealthProbeWorkflow, HealthProber, ItemSearcher, Phase, ProbeState, SearchState,
    SearchWorkflow,
};
