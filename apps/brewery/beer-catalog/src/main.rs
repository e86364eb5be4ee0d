//! Beer Catalog
//!
//! Command-line front end for the beer catalog: schema migrations, sample
//! data and every catalog operation, printing results as JSON.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::FromEnv;
use domain_beers::{
    BeerDto, BeerService, BeerStyle, InMemoryInventoryService, PageRequest, PgBeerRepository,
    RedisBeerCache, RestInventoryService,
};
use eyre::{Result, WrapErr};
use migration::Migrator;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

mod config;
mod seed;

use config::Config;

const APP_NAME: &str = "beer-catalog";

#[derive(Parser)]
#[command(name = "beer-catalog")]
#[command(about = "Manage the beer catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    #[command(flatten)]
    Catalog(CatalogCommand),
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// Load the sample catalog into an empty database
    Seed,

    /// List beers, optionally filtered by name and/or style
    List {
        #[arg(short, long)]
        name: Option<String>,

        /// Style label, e.g. PALE_ALE
        #[arg(short, long)]
        style: Option<BeerStyle>,

        /// Zero-based page number
        #[arg(short, long, default_value_t = domain_beers::pagination::DEFAULT_PAGE_NUMBER)]
        page: u64,

        #[arg(long, default_value_t = domain_beers::pagination::DEFAULT_PAGE_SIZE)]
        size: u64,

        /// Include quantity on hand from the inventory service
        #[arg(short, long)]
        inventory: bool,
    },

    /// Show one beer by id
    Get {
        id: Uuid,

        #[arg(short, long)]
        inventory: bool,
    },

    /// Show one beer by UPC
    GetUpc { upc: String },

    /// Add a beer
    Create {
        #[command(flatten)]
        beer: BeerArgs,
    },

    /// Replace name, style, UPC and price of a beer
    Update {
        id: Uuid,

        #[command(flatten)]
        beer: BeerArgs,
    },

    /// Remove a beer; unknown ids are ignored
    Delete { id: Uuid },
}

#[derive(clap::Args)]
struct BeerArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    style: BeerStyle,

    #[arg(long)]
    upc: String,

    /// Price in cents
    #[arg(long)]
    price: i64,
}

impl From<BeerArgs> for BeerDto {
    fn from(args: BeerArgs) -> Self {
        BeerDto::new(args.name, args.style, args.upc, args.price)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to database...");
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .wrap_err("Database connection failed")?;

    match cli.command {
        Commands::Migrate => {
            database::postgres::run_migrations::<Migrator>(&db, APP_NAME).await?;
        }
        Commands::Catalog(command) => {
            let service = build_service(&config, PgBeerRepository::new(db)).await?;
            run(&service, command).await?;
        }
    }

    Ok(())
}

async fn run(service: &BeerService<PgBeerRepository>, command: CatalogCommand) -> Result<()> {
    match command {
        CatalogCommand::Seed => {
            let inserted = seed::seed_catalog(service).await?;
            print_json(&serde_json::json!({ "inserted": inserted }))?;
        }

        CatalogCommand::List {
            name,
            style,
            page,
            size,
            inventory,
        } => {
            let page_request = PageRequest::of(page, size)?;
            let beers = service
                .list_beers(name.as_deref(), style, page_request, inventory)
                .await?;
            print_json(&beers)?;
        }

        CatalogCommand::Get { id, inventory } => {
            let beer = service
                .get_by_id(id, inventory)
                .await?
                .ok_or_else(|| eyre::eyre!("No beer with id {}", id))?;
            print_json(&beer)?;
        }

        CatalogCommand::GetUpc { upc } => {
            let beer = service
                .get_by_upc(&upc)
                .await?
                .ok_or_else(|| eyre::eyre!("No beer with UPC {}", upc))?;
            print_json(&beer)?;
        }

        CatalogCommand::Create { beer } => {
            let saved = service.save_new_beer(beer.into()).await?;
            print_json(&saved)?;
        }

        CatalogCommand::Update { id, beer } => {
            let updated = service.update_beer(id, beer.into()).await?;
            print_json(&updated)?;
        }

        CatalogCommand::Delete { id } => {
            service.delete_beer_by_id(id).await?;
            info!(beer_id = %id, "Delete finished");
        }
    }

    Ok(())
}

/// Wire the inventory backend and cache chosen by `config` around `repository`
async fn build_service(
    config: &Config,
    repository: PgBeerRepository,
) -> Result<BeerService<PgBeerRepository>> {
    let service = match &config.inventory {
        Some(inventory) => BeerService::new(repository, RestInventoryService::new(inventory)?),
        None => {
            info!("INVENTORY_SERVICE_HOST not set, quantity on hand reads as zero");
            BeerService::new(repository, InMemoryInventoryService::new())
        }
    };

    if !config.cache.enabled {
        return Ok(service);
    }

    let cache = RedisBeerCache::from_config(&config.redis, &config.cache)
        .await
        .wrap_err("Redis connection failed")?;

    Ok(service.with_cache(cache))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
