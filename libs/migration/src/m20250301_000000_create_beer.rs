use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Beer::Table)
                    .if_not_exists()
                    .col(pk_uuid(Beer::Id))
                    .col(integer(Beer::Version).default(0))
                    .col(string(Beer::BeerName))
                    .col(string_len(Beer::BeerStyle, 32))
                    .col(string_uniq(Beer::Upc))
                    // minor currency units
                    .col(big_integer(Beer::Price))
                    .col(integer(Beer::MinOnHand).default(0))
                    .col(integer(Beer::QuantityToBrew).default(0))
                    .col(
                        timestamp_with_time_zone(Beer::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Beer::LastModifiedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_beer_beer_name")
                    .table(Beer::Table)
                    .col(Beer::BeerName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_beer_beer_style")
                    .table(Beer::Table)
                    .col(Beer::BeerStyle)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Beer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Beer {
    Table,
    Id,
    Version,
    BeerName,
    BeerStyle,
    Upc,
    Price,
    MinOnHand,
    QuantityToBrew,
    CreatedDate,
    LastModifiedDate,
}
