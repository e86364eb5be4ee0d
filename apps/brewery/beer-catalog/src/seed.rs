//! Sample catalog for local development

use domain_beers::{BeerDto, BeerRepository, BeerResult, BeerService, BeerStyle};
use tracing::info;

/// (name, style, upc, price in cents)
const SAMPLE_CATALOG: &[(&str, BeerStyle, &str, i64)] = &[
    ("Mango Bobs", BeerStyle::Ale, "0631234200036", 1295),
    ("Galaxy Cat", BeerStyle::PaleAle, "9122089364369", 1195),
    ("No Hammers On The Bar", BeerStyle::Wheat, "0083783375213", 1295),
    ("Blessed", BeerStyle::Stout, "4666337557578", 1395),
    ("Adjunct Trail", BeerStyle::Stout, "8380495518610", 1095),
    ("Very GGGreenn", BeerStyle::Ipa, "5677465691934", 1495),
    ("Double Barrel Hopped", BeerStyle::Ipa, "5463533082885", 1495),
    ("Pinball Porter", BeerStyle::Porter, "0631234300019", 1195),
    ("Golden Budda", BeerStyle::Stout, "2348573698354", 1295),
    ("Cub Scout Lager", BeerStyle::Lager, "4932487938457", 995),
    ("Sunshine Gose", BeerStyle::Gose, "7295839201845", 1095),
    ("Farmhouse Saison", BeerStyle::Saison, "8362951048271", 1395),
    ("Bohemian Pils", BeerStyle::Pilsner, "3917462085137", 1095),
];

pub fn sample_catalog() -> Vec<BeerDto> {
    SAMPLE_CATALOG
        .iter()
        .map(|(name, style, upc, price)| BeerDto::new(*name, *style, *upc, *price))
        .collect()
}

/// Insert the sample catalog when the table is empty. Returns how many beers were added.
pub async fn seed_catalog<R: BeerRepository>(service: &BeerService<R>) -> BeerResult<usize> {
    let existing = service.count_beers().await?;
    if existing > 0 {
        info!(existing, "Catalog already populated, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for dto in sample_catalog() {
        service.save_new_beer(dto).await?;
        inserted += 1;
    }

    info!(inserted, "Seeded sample catalog");
    Ok(inserted)
}
