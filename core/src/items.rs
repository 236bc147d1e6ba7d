//! Item lookup and search service.

use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::ApiTransport;
use crate::types::{EveItem, ItemResponse, ItemSearchResponse};

/// Type id of Tritanium, the canonical smoke-test item.
pub const TRITANIUM_TYPE_ID: i32 = 34;

/// Typed access to the backend's item endpoints.
///
/// Each call is a single round trip; no retries, no caching. Invalid or
/// unknown ids are rejected by the backend (400/404) and surface as
/// classified server errors.
#[derive(Debug, Clone)]
pub struct ItemsService {
    transport: Arc<ApiTransport>,
}

impl ItemsService {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    /// Look up a single item by its type id and unwrap the response
    /// envelope.
    pub async fn get_item_by_id(&self, item_id: i32) -> Result<EveItem, ApiError> {
        let response: ItemResponse = self.transport.get(&format!("/items/{item_id}")).await?;
        Ok(response.data)
    }

    /// Search items by name. An empty or `null` `data` field both mean "no
    /// matches" and come back as an empty vector.
    pub async fn search_items(&self, query: &str) -> Result<Vec<EveItem>, ApiError> {
        let response: ItemSearchResponse = self
            .transport
            .get_with_query("/items/search", &[("q", query)])
            .await?;
        Ok(response.data.unwrap_or_default())
    }

    /// Convenience lookup for Tritanium.
    pub async fn find_tritanium(&self) -> Result<EveItem, ApiError> {
        self.get_item_by_id(TRITANIUM_TYPE_ID).await
    }
}
