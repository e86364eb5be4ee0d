use chrono::{DateTime, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::pagination::PageRequest;

/// Beer style
///
/// Labels are SCREAMING_SNAKE_CASE everywhere: JSON, the database column and
/// `FromStr`. Anything else fails to parse.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    #[sea_orm(string_value = "LAGER")]
    Lager,
    #[sea_orm(string_value = "PILSNER")]
    Pilsner,
    #[sea_orm(string_value = "STOUT")]
    Stout,
    #[sea_orm(string_value = "GOSE")]
    Gose,
    #[sea_orm(string_value = "PORTER")]
    Porter,
    #[sea_orm(string_value = "ALE")]
    Ale,
    #[sea_orm(string_value = "WHEAT")]
    Wheat,
    #[sea_orm(string_value = "IPA")]
    Ipa,
    #[sea_orm(string_value = "PALE_ALE")]
    PaleAle,
    #[sea_orm(string_value = "SAISON")]
    Saison,
}

/// Beer entity as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beer {
    pub id: Uuid,
    /// Optimistic version, bumped by the store on every save
    pub version: i32,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    /// Universal Product Code, unique across the catalog
    pub upc: String,
    /// Price in cents
    pub price: i64,
    pub min_on_hand: i32,
    pub quantity_to_brew: i32,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Input for inserting a beer; the store assigns id, version and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewBeer {
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub price: i64,
    pub min_on_hand: i32,
    pub quantity_to_brew: i32,
}

/// Transfer representation handed to callers.
///
/// `quantity_on_hand` is only filled in by the inventory-aware mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    /// Price in cents
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// A page of beers as returned by `BeerService::list_beers`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeerPagedList {
    pub content: Vec<BeerDto>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
}

impl Beer {
    /// Build a fresh entity; used by repository implementations on insert
    pub fn new(input: NewBeer) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            version: 0,
            beer_name: input.beer_name,
            beer_style: input.beer_style,
            upc: input.upc,
            price: input.price,
            min_on_hand: input.min_on_hand,
            quantity_to_brew: input.quantity_to_brew,
            created_date: now,
            last_modified_date: now,
        }
    }

    /// Copy the caller-editable fields (name, style, price, upc) from `dto`.
    ///
    /// Identity, brewing parameters and audit fields are left alone.
    pub fn apply_update(&mut self, dto: &BeerDto) {
        self.beer_name = dto.beer_name.clone();
        self.beer_style = dto.beer_style;
        self.price = dto.price;
        self.upc = dto.upc.clone();
    }

    /// Audit bookkeeping done by the store when it persists a change
    pub fn touch(&mut self) {
        self.version += 1;
        self.last_modified_date = Utc::now();
    }
}

impl BeerDto {
    /// DTO for a beer that does not exist yet
    pub fn new(
        beer_name: impl Into<String>,
        beer_style: BeerStyle,
        upc: impl Into<String>,
        price: i64,
    ) -> Self {
        Self {
            id: None,
            version: None,
            beer_name: beer_name.into(),
            beer_style,
            upc: upc.into(),
            price,
            quantity_on_hand: None,
            created_date: None,
            last_modified_date: None,
        }
    }
}

impl BeerPagedList {
    pub fn new(content: Vec<BeerDto>, pageable: PageRequest, total_elements: u64) -> Self {
        debug_assert!(content.len() as u64 <= pageable.page_size());

        Self {
            content,
            page_number: pageable.page_number(),
            page_size: pageable.page_size(),
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.page_size.max(1))
    }
}
