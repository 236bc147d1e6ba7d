//! Health and connectivity diagnostics service.

use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::ApiTransport;
use crate::types::{ConnectionStatus, HealthSnapshot};

/// Typed access to the backend's health endpoints.
///
/// Pure pass-through: classified errors from the transport propagate
/// unchanged.
#[derive(Debug, Clone)]
pub struct HealthService {
    transport: Arc<ApiTransport>,
}

impl HealthService {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    /// Fetch the backend's health snapshot.
    pub async fn get_health_status(&self) -> Result<HealthSnapshot, ApiError> {
        self.transport.get("/health").await
    }

    /// Check that the backend can reach its item database.
    pub async fn check_database_connection(&self) -> Result<ConnectionStatus, ApiError> {
        self.transport.get("/sde/test").await
    }

    /// Check that the backend can reach the ESI upstream.
    pub async fn check_esi_connection(&self) -> Result<ConnectionStatus, ApiError> {
        self.transport.get("/esi/test").await
    }
}
