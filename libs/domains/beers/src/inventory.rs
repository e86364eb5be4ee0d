//! Quantity-on-hand lookups for the inventory-augmented DTO shape

use async_trait::async_trait;
use core_config::{env_parse, env_required, ConfigError, FromEnv};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{BeerError, BeerResult};

pub const INVENTORY_PATH: &str = "/api/v1/beer/{beerId}/inventory";

/// Source of current stock levels
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Total units on hand; a beer with no stock records has 0
    async fn quantity_on_hand(&self, beer_id: Uuid) -> BeerResult<i32>;
}

/// One stock record as returned by the inventory service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub beer_id: Option<Uuid>,
    #[serde(default)]
    pub quantity_on_hand: Option<i32>,
}

pub fn total_on_hand(records: &[InventoryRecord]) -> i32 {
    records
        .iter()
        .filter_map(|r| r.quantity_on_hand)
        .fold(0i32, |total, qty| total.saturating_add(qty))
}

/// Inventory settings
///
/// `INVENTORY_SERVICE_HOST` is required; `INVENTORY_TIMEOUT_SECS` defaults to 5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    pub host: String,
    pub timeout_secs: u64,
}

impl FromEnv for InventoryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_required("INVENTORY_SERVICE_HOST")?,
            timeout_secs: env_parse("INVENTORY_TIMEOUT_SECS", 5)?,
        })
    }
}

/// Client for the brewery inventory REST API
#[derive(Clone)]
pub struct RestInventoryService {
    client: Client,
    host: String,
}

impl RestInventoryService {
    pub fn new(config: &InventoryConfig) -> BeerResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
        })
    }

    pub fn inventory_url(&self, beer_id: Uuid) -> String {
        format!(
            "{}{}",
            self.host,
            INVENTORY_PATH.replace("{beerId}", &beer_id.to_string())
        )
    }
}

#[async_trait]
impl InventoryService for RestInventoryService {
    #[instrument(skip(self), fields(beer_id = %beer_id))]
    async fn quantity_on_hand(&self, beer_id: Uuid) -> BeerResult<i32> {
        let url = self.inventory_url(beer_id);
        debug!(%url, "Fetching inventory");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(BeerError::Inventory(format!(
                "Inventory service returned {} for beer {}",
                response.status(),
                beer_id
            )));
        }

        let records: Vec<InventoryRecord> = response.json().await?;
        Ok(total_on_hand(&records))
    }
}

/// Fixed stock levels held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryService {
    levels: Arc<RwLock<HashMap<Uuid, i32>>>,
}

impl InMemoryInventoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, beer_id: Uuid, quantity_on_hand: i32) {
        self.levels.write().await.insert(beer_id, quantity_on_hand);
    }
}

#[async_trait]
impl InventoryService for InMemoryInventoryService {
    async fn quantity_on_hand(&self, beer_id: Uuid) -> BeerResult<i32> {
        Ok(self.levels.read().await.get(&beer_id).copied().unwrap_or(0))
    }
}
