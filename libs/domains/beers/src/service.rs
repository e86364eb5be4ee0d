use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::cache::{read_through, BeerCache, CacheKey, NoopBeerCache};
use crate::error::{BeerError, BeerResult};
use crate::inventory::InventoryService;
use crate::mapper::{beer_to_dto, to_bare_dto, to_inventory_dto, to_new_beer, with_inventory};
use crate::models::{Beer, BeerDto, BeerPagedList, BeerStyle};
use crate::pagination::{Page, PageRequest};
use crate::query::BeerQuery;
use crate::repository::BeerRepository;

/// Service layer for the beer catalog
pub struct BeerService<R: BeerRepository> {
    repository: Arc<R>,
    cache: Arc<dyn BeerCache>,
    inventory: Arc<dyn InventoryService>,
}

// derive(Clone) would demand R: Clone
impl<R: BeerRepository> Clone for BeerService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
            inventory: Arc::clone(&self.inventory),
        }
    }
}

impl<R: BeerRepository> BeerService<R> {
    /// Service without a cache; every lookup reaches the repository
    pub fn new(repository: R, inventory: impl InventoryService + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: Arc::new(NoopBeerCache),
            inventory: Arc::new(inventory),
        }
    }

    pub fn with_cache(mut self, cache: impl BeerCache + 'static) -> Self {
        self.cache = Arc::new(cache);
        self
    }

    /// List beers, filtered by name and/or style.
    ///
    /// An empty name counts as no name filter.
    #[instrument(skip(self))]
    pub async fn list_beers(
        &self,
        beer_name: Option<&str>,
        beer_style: Option<BeerStyle>,
        page: PageRequest,
        show_inventory_on_hand: bool,
    ) -> BeerResult<BeerPagedList> {
        let query = BeerQuery::from_filters(beer_name, beer_style);
        debug!(?query, "Listing beers");

        let page = self.find_page(query, page).await?;

        let mut content = Vec::with_capacity(page.content.len());
        for beer in &page.content {
            let dto = beer_to_dto(beer);
            if show_inventory_on_hand {
                let quantity_on_hand = self.inventory.quantity_on_hand(beer.id).await?;
                content.push(with_inventory(dto, quantity_on_hand));
            } else {
                content.push(dto);
            }
        }

        Ok(BeerPagedList::new(
            content,
            page.pageable,
            page.total_elements,
        ))
    }

    async fn find_page(&self, query: BeerQuery<'_>, page: PageRequest) -> BeerResult<Page<Beer>> {
        match query {
            BeerQuery::ByNameAndStyle {
                beer_name,
                beer_style,
            } => {
                self.repository
                    .find_all_by_beer_name_and_beer_style(beer_name, beer_style, page)
                    .await
            }
            BeerQuery::ByName(beer_name) => {
                self.repository
                    .find_all_by_beer_name(beer_name, page)
                    .await
            }
            BeerQuery::ByStyle(beer_style) => {
                self.repository
                    .find_all_by_beer_style(beer_style, page)
                    .await
            }
            BeerQuery::All => self.repository.find_all(page).await,
        }
    }

    /// Get a beer by id, `None` when it does not exist.
    ///
    /// Bare lookups read through the id cache. Inventory lookups always hit
    /// the repository and never touch the cache.
    #[instrument(skip(self), fields(beer_id = %id))]
    pub async fn get_by_id(
        &self,
        id: Uuid,
        show_inventory_on_hand: bool,
    ) -> BeerResult<Option<BeerDto>> {
        if show_inventory_on_hand {
            let Some(beer) = self.repository.find_by_id(id).await? else {
                return Ok(None);
            };
            let quantity_on_hand = self.inventory.quantity_on_hand(id).await?;
            return Ok(to_inventory_dto(Some(&beer), quantity_on_hand));
        }

        read_through(self.cache.as_ref(), CacheKey::Id(id), || async move {
            let beer = self.repository.find_by_id(id).await?;
            Ok(to_bare_dto(beer.as_ref()))
        })
        .await
    }

    /// Create a beer. Id, version and audit fields on `dto` are ignored.
    #[instrument(skip(self, dto), fields(beer_name = %dto.beer_name, upc = %dto.upc))]
    pub async fn save_new_beer(&self, dto: BeerDto) -> BeerResult<BeerDto> {
        let beer = self.repository.create(to_new_beer(dto)).await?;

        info!(beer_id = %beer.id, "Saved new beer");
        Ok(beer_to_dto(&beer))
    }

    /// Overwrite name, style, price and upc of an existing beer.
    ///
    /// Stale cache entries are evicted once the write has committed. An
    /// eviction failure is logged and does not fail the update.
    #[instrument(skip(self, dto), fields(beer_id = %id))]
    pub async fn update_beer(&self, id: Uuid, dto: BeerDto) -> BeerResult<BeerDto> {
        let mut beer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(BeerError::NotFound(id))?;

        let old_upc = beer.upc.clone();
        beer.apply_update(&dto);

        let saved = self.repository.save(beer).await?;

        self.evict(CacheKey::Id(id)).await;
        if saved.upc != old_upc {
            self.evict(CacheKey::Upc(saved.upc.clone())).await;
        }
        self.evict(CacheKey::Upc(old_upc)).await;

        info!(version = saved.version, "Updated beer");
        Ok(beer_to_dto(&saved))
    }

    /// Get a beer by UPC through the UPC cache, `None` when no beer has it
    #[instrument(skip(self))]
    pub async fn get_by_upc(&self, upc: &str) -> BeerResult<Option<BeerDto>> {
        read_through(
            self.cache.as_ref(),
            CacheKey::Upc(upc.to_string()),
            || async move {
                let beer = self.repository.find_by_upc(upc).await?;
                Ok(to_bare_dto(beer.as_ref()))
            },
        )
        .await
    }

    /// Delete a beer. Deleting an unknown id is a no-op.
    ///
    /// The id and UPC entries of the removed row are evicted afterwards;
    /// eviction failures are logged like in [`Self::update_beer`].
    #[instrument(skip(self), fields(beer_id = %id))]
    pub async fn delete_beer_by_id(&self, id: Uuid) -> BeerResult<()> {
        let deleted = self.repository.delete_by_id(id).await?;

        self.evict(CacheKey::Id(id)).await;
        match deleted {
            Some(beer) => {
                self.evict(CacheKey::Upc(beer.upc)).await;
                info!("Deleted beer");
            }
            None => debug!("Nothing to delete"),
        }
        Ok(())
    }

    /// Count all beers
    pub async fn count_beers(&self) -> BeerResult<u64> {
        self.repository.count().await
    }

    async fn evict(&self, key: CacheKey) {
        if let Err(e) = self.cache.evict(&key).await {
            warn!(%key, error = %e, "Failed to evict cache entry");
        }
    }
}
