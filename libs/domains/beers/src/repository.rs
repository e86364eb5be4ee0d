use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{BeerError, BeerResult};
use crate::models::{Beer, BeerStyle, NewBeer};
use crate::pagination::{Page, PageRequest};

/// Repository trait for Beer persistence
///
/// Paged finders return beers ordered by name, then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BeerRepository: Send + Sync {
    /// List every beer
    async fn find_all(&self, page: PageRequest) -> BeerResult<Page<Beer>>;

    /// List beers with exactly this name
    async fn find_all_by_beer_name(
        &self,
        beer_name: &str,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>>;

    /// List beers of one style
    async fn find_all_by_beer_style(
        &self,
        beer_style: BeerStyle,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>>;

    async fn find_all_by_beer_name_and_beer_style(
        &self,
        beer_name: &str,
        beer_style: BeerStyle,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>>;

    async fn find_by_id(&self, id: Uuid) -> BeerResult<Option<Beer>>;

    async fn find_by_upc(&self, upc: &str) -> BeerResult<Option<Beer>>;

    /// Insert a new beer, assigning id, version and audit timestamps
    async fn create(&self, input: NewBeer) -> BeerResult<Beer>;

    /// Persist an existing beer. Bumps `version` and `last_modified_date`.
    async fn save(&self, beer: Beer) -> BeerResult<Beer>;

    /// Returns the removed beer, `None` when nothing was deleted
    async fn delete_by_id(&self, id: Uuid) -> BeerResult<Option<Beer>>;

    async fn count(&self) -> BeerResult<u64>;
}

/// In-memory implementation of BeerRepository (for testing and local runs)
#[derive(Clone, Default)]
pub struct InMemoryBeerRepository {
    beers: Arc<RwLock<HashMap<Uuid, Beer>>>,
}

impl InMemoryBeerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_page(
        &self,
        page: PageRequest,
        predicate: impl Fn(&Beer) -> bool,
    ) -> BeerResult<Page<Beer>> {
        let beers = self.beers.read().await;

        let mut result: Vec<Beer> = beers.values().filter(|b| predicate(b)).cloned().collect();
        result.sort_by(|a, b| a.beer_name.cmp(&b.beer_name).then(a.id.cmp(&b.id)));

        Ok(Page::slice(result, page))
    }
}

#[async_trait]
impl BeerRepository for InMemoryBeerRepository {
    async fn find_all(&self, page: PageRequest) -> BeerResult<Page<Beer>> {
        self.find_page(page, |_| true).await
    }

    async fn find_all_by_beer_name(
        &self,
        beer_name: &str,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>> {
        self.find_page(page, |b| b.beer_name == beer_name).await
    }

    async fn find_all_by_beer_style(
        &self,
        beer_style: BeerStyle,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>> {
        self.find_page(page, |b| b.beer_style == beer_style).await
    }

    async fn find_all_by_beer_name_and_beer_style(
        &self,
        beer_name: &str,
        beer_style: BeerStyle,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>> {
        self.find_page(page, |b| {
            b.beer_name == beer_name && b.beer_style == beer_style
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> BeerResult<Option<Beer>> {
        let beers = self.beers.read().await;
        Ok(beers.get(&id).cloned())
    }

    async fn find_by_upc(&self, upc: &str) -> BeerResult<Option<Beer>> {
        let beers = self.beers.read().await;
        Ok(beers.values().find(|b| b.upc == upc).cloned())
    }

    async fn create(&self, input: NewBeer) -> BeerResult<Beer> {
        let mut beers = self.beers.write().await;

        if beers.values().any(|b| b.upc == input.upc) {
            return Err(BeerError::DuplicateUpc(input.upc));
        }

        let beer = Beer::new(input);
        beers.insert(beer.id, beer.clone());

        tracing::info!(beer_id = %beer.id, "Created beer");
        Ok(beer)
    }

    async fn save(&self, mut beer: Beer) -> BeerResult<Beer> {
        let mut beers = self.beers.write().await;

        if !beers.contains_key(&beer.id) {
            return Err(BeerError::NotFound(beer.id));
        }

        if beers.values().any(|b| b.id != beer.id && b.upc == beer.upc) {
            return Err(BeerError::DuplicateUpc(beer.upc));
        }

        beer.touch();
        beers.insert(beer.id, beer.clone());

        tracing::info!(beer_id = %beer.id, version = beer.version, "Saved beer");
        Ok(beer)
    }

    async fn delete_by_id(&self, id: Uuid) -> BeerResult<Option<Beer>> {
        let mut beers = self.beers.write().await;

        let removed = beers.remove(&id);
        if removed.is_some() {
            tracing::info!(beer_id = %id, "Deleted beer");
        }
        Ok(removed)
    }

    async fn count(&self) -> BeerResult<u64> {
        let beers = self.beers.read().await;
        Ok(beers.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_beer(name: &str, style: BeerStyle, upc: &str) -> NewBeer {
        NewBeer {
            beer_name: name.to_string(),
            beer_style: style,
            upc: upc.to_string(),
            price: 1299,
            min_on_hand: 12,
            quantity_to_brew: 200,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_beer() {
        let repo = InMemoryBeerRepository::new();

        let beer = repo
            .create(new_beer("Mango Bobs", BeerStyle::Ale, "0631234200036"))
            .await
            .unwrap();
        assert_eq!(beer.version, 0);

        let by_id = repo.find_by_id(beer.id).await.unwrap();
        assert_eq!(by_id, Some(beer.clone()));

        let by_upc = repo.find_by_upc("0631234200036").await.unwrap();
        assert_eq!(by_upc.map(|b| b.id), Some(beer.id));

        assert!(repo.find_by_upc("0000000000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_upc_rejected() {
        let repo = InMemoryBeerRepository::new();
        repo.create(new_beer("Mango Bobs", BeerStyle::Ale, "0631234200036"))
            .await
            .unwrap();

        let result = repo
            .create(new_beer("Galaxy Cat", BeerStyle::PaleAle, "0631234200036"))
            .await;
        assert!(matches!(result, Err(BeerError::DuplicateUpc(_))));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_bumps_version() {
        let repo = InMemoryBeerRepository::new();
        let mut beer = repo
            .create(new_beer("Pinball Porter", BeerStyle::Porter, "0083783375213"))
            .await
            .unwrap();

        beer.price = 1199;
        let saved = repo.save(beer.clone()).await.unwrap();

        assert_eq!(saved.version, 1);
        assert_eq!(saved.price, 1199);
        assert!(saved.last_modified_date >= beer.last_modified_date);
        assert_eq!(repo.find_by_id(beer.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_save_missing_beer_is_not_found() {
        let repo = InMemoryBeerRepository::new();
        let ghost = Beer::new(new_beer("Ghost", BeerStyle::Stout, "1"));

        let result = repo.save(ghost).await;
        assert!(matches!(result, Err(BeerError::NotFound(_))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_filters_and_ordering() {
        let repo = InMemoryBeerRepository::new();
        repo.create(new_beer("Pinball Porter", BeerStyle::Porter, "1"))
            .await
            .unwrap();
        repo.create(new_beer("Galaxy Cat", BeerStyle::PaleAle, "2"))
            .await
            .unwrap();
        repo.create(new_beer("Mango Bobs", BeerStyle::Ale, "3"))
            .await
            .unwrap();
        repo.create(new_beer("Mango Bobs", BeerStyle::Ipa, "4"))
            .await
            .unwrap();

        let all = repo.find_all(PageRequest::default()).await.unwrap();
        let names: Vec<&str> = all.content.iter().map(|b| b.beer_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Galaxy Cat", "Mango Bobs", "Mango Bobs", "Pinball Porter"]
        );

        let by_name = repo
            .find_all_by_beer_name("Mango Bobs", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(by_name.total_elements, 2);

        let by_style = repo
            .find_all_by_beer_style(BeerStyle::Porter, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(by_style.total_elements, 1);
        assert_eq!(by_style.content[0].beer_name, "Pinball Porter");

        let both = repo
            .find_all_by_beer_name_and_beer_style("Mango Bobs", BeerStyle::Ipa, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(both.total_elements, 1);
        assert_eq!(both.content[0].upc, "4");
    }

    #[tokio::test]
    async fn test_delete_beer() {
        let repo = InMemoryBeerRepository::new();
        let beer = repo
            .create(new_beer("Galaxy Cat", BeerStyle::PaleAle, "9122089364369"))
            .await
            .unwrap();

        let removed = repo.delete_by_id(beer.id).await.unwrap();
        assert_eq!(removed.map(|b| b.upc), Some("9122089364369".to_string()));
        assert!(repo.delete_by_id(beer.id).await.unwrap().is_none());
        assert!(repo.find_by_id(beer.id).await.unwrap().is_none());
    }
}
