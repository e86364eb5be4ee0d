//! Beers Domain
//!
//! Catalog operations for beers: paged listing with optional name/style
//! filters, lookups by id or UPC with a read-through cache, create, update
//! and delete.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Service   │────▶│    Cache    │     │  Inventory  │
//! └──────┬──────┘     └─────────────┘     └──────▲──────┘
//!        │                                       │
//!        ├───────────────────────────────────────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_beers::{
//!     BeerService, InMemoryBeerCache, InMemoryInventoryService, PageRequest, PgBeerRepository,
//! };
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let service = BeerService::new(PgBeerRepository::new(db), InMemoryInventoryService::new())
//!     .with_cache(InMemoryBeerCache::new());
//!
//! let page = service
//!     .list_beers(Some("Mango Bobs"), None, PageRequest::default(), false)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod entity;
pub mod error;
pub mod inventory;
pub mod mapper;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod query;
pub mod redis_cache;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use cache::{BeerCache, CacheConfig, CacheKey, InMemoryBeerCache, NoopBeerCache};
pub use error::{BeerError, BeerResult};
pub use inventory::{
    InMemoryInventoryService, InventoryConfig, InventoryService, RestInventoryService,
};
pub use models::{Beer, BeerDto, BeerPagedList, BeerStyle, NewBeer};
pub use pagination::{Page, PageRequest};
pub use postgres::PgBeerRepository;
pub use query::BeerQuery;
pub use redis_cache::RedisBeerCache;
pub use repository::{BeerRepository, InMemoryBeerRepository};
pub use service::BeerService;
