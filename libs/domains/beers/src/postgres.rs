use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{BeerError, BeerResult},
    models::{Beer, BeerStyle, NewBeer},
    pagination::{Page, PageRequest},
    repository::BeerRepository,
};

/// PostgreSQL implementation of BeerRepository
#[derive(Clone)]
pub struct PgBeerRepository {
    db: DatabaseConnection,
}

impl PgBeerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Count the filtered rows, then fetch one ordered window of them
    async fn fetch_page(
        &self,
        query: Select<entity::Entity>,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>> {
        let total_elements = query.clone().count(&self.db).await?;

        let models = query
            .order_by_asc(entity::Column::BeerName)
            .order_by_asc(entity::Column::Id)
            .offset(page.offset())
            .limit(page.page_size())
            .all(&self.db)
            .await?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total_elements,
        ))
    }

    async fn upc_taken(&self, upc: &str, except: Option<Uuid>) -> BeerResult<bool> {
        let mut query = entity::Entity::find().filter(entity::Column::Upc.eq(upc));

        if let Some(id) = except {
            query = query.filter(entity::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }
}

// The unique index still guards concurrent writers that both pass `upc_taken`.
fn map_write_err(err: DbErr, upc: &str) -> BeerError {
    let err_str = err.to_string();
    if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
        BeerError::DuplicateUpc(upc.to_string())
    } else {
        BeerError::Database(err_str)
    }
}

#[async_trait]
impl BeerRepository for PgBeerRepository {
    async fn find_all(&self, page: PageRequest) -> BeerResult<Page<Beer>> {
        self.fetch_page(entity::Entity::find(), page).await
    }

    async fn find_all_by_beer_name(
        &self,
        beer_name: &str,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>> {
        let query = entity::Entity::find().filter(entity::Column::BeerName.eq(beer_name));
        self.fetch_page(query, page).await
    }

    async fn find_all_by_beer_style(
        &self,
        beer_style: BeerStyle,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>> {
        let query = entity::Entity::find().filter(entity::Column::BeerStyle.eq(beer_style));
        self.fetch_page(query, page).await
    }

    async fn find_all_by_beer_name_and_beer_style(
        &self,
        beer_name: &str,
        beer_style: BeerStyle,
        page: PageRequest,
    ) -> BeerResult<Page<Beer>> {
        let query = entity::Entity::find()
            .filter(entity::Column::BeerName.eq(beer_name))
            .filter(entity::Column::BeerStyle.eq(beer_style));
        self.fetch_page(query, page).await
    }

    async fn find_by_id(&self, id: Uuid) -> BeerResult<Option<Beer>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_upc(&self, upc: &str) -> BeerResult<Option<Beer>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Upc.eq(upc))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, input: NewBeer) -> BeerResult<Beer> {
        if self.upc_taken(&input.upc, None).await? {
            return Err(BeerError::DuplicateUpc(input.upc));
        }

        let beer = Beer::new(input);
        let active_model: entity::ActiveModel = (&beer).into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, &beer.upc))?;

        tracing::info!(beer_id = %model.id, "Created beer");
        Ok(model.into())
    }

    async fn save(&self, mut beer: Beer) -> BeerResult<Beer> {
        if self.upc_taken(&beer.upc, Some(beer.id)).await? {
            return Err(BeerError::DuplicateUpc(beer.upc));
        }

        beer.touch();
        let active_model: entity::ActiveModel = (&beer).into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => BeerError::NotFound(beer.id),
            other => map_write_err(other, &beer.upc),
        })?;

        tracing::info!(beer_id = %model.id, version = model.version, "Saved beer");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: Uuid) -> BeerResult<Option<Beer>> {
        let deleted = entity::Entity::delete_by_id(id)
            .exec_with_returning(&self.db)
            .await?;

        if deleted.is_some() {
            tracing::info!(beer_id = %id, "Deleted beer");
        }
        Ok(deleted.map(Into::into))
    }

    async fn count(&self) -> BeerResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }
}
