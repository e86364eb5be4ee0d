use crate::models::BeerStyle;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the `beer` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "beer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub version: i32,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    #[sea_orm(unique)]
    pub upc: String,
    pub price: i64,
    pub min_on_hand: i32,
    pub quantity_to_brew: i32,
    pub created_date: DateTimeWithTimeZone,
    pub last_modified_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Beer {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            version: model.version,
            beer_name: model.beer_name,
            beer_style: model.beer_style,
            upc: model.upc,
            price: model.price,
            min_on_hand: model.min_on_hand,
            quantity_to_brew: model.quantity_to_brew,
            created_date: model.created_date.into(),
            last_modified_date: model.last_modified_date.into(),
        }
    }
}

// Every column is Set, so this serves both insert and full-row update.
impl From<&crate::models::Beer> for ActiveModel {
    fn from(beer: &crate::models::Beer) -> Self {
        ActiveModel {
            id: Set(beer.id),
            version: Set(beer.version),
            beer_name: Set(beer.beer_name.clone()),
            beer_style: Set(beer.beer_style),
            upc: Set(beer.upc.clone()),
            price: Set(beer.price),
            min_on_hand: Set(beer.min_on_hand),
            quantity_to_brew: Set(beer.quantity_to_brew),
            created_date: Set(beer.created_date.into()),
            last_modified_date: Set(beer.last_modified_date.into()),
        }
    }
}
