//! Conversions between [`Beer`] and [`BeerDto`]
//!
//! Both DTO shapes take an optional beer so a missed lookup maps straight to
//! `None` without a separate branch at the call site.

use crate::models::{Beer, BeerDto, NewBeer};

/// Bare DTO, no inventory figure
pub fn beer_to_dto(beer: &Beer) -> BeerDto {
    BeerDto {
        id: Some(beer.id),
        version: Some(beer.version),
        beer_name: beer.beer_name.clone(),
        beer_style: beer.beer_style,
        upc: beer.upc.clone(),
        price: beer.price,
        quantity_on_hand: None,
        created_date: Some(beer.created_date),
        last_modified_date: Some(beer.last_modified_date),
    }
}

pub fn to_bare_dto(beer: Option<&Beer>) -> Option<BeerDto> {
    beer.map(beer_to_dto)
}

pub fn to_inventory_dto(beer: Option<&Beer>, quantity_on_hand: i32) -> Option<BeerDto> {
    beer.map(|beer| with_inventory(beer_to_dto(beer), quantity_on_hand))
}

pub fn with_inventory(mut dto: BeerDto, quantity_on_hand: i32) -> BeerDto {
    dto.quantity_on_hand = Some(quantity_on_hand);
    dto
}

/// Id, version, inventory and audit fields on the DTO are ignored.
pub fn to_new_beer(dto: BeerDto) -> NewBeer {
    NewBeer {
        beer_name: dto.beer_name,
        beer_style: dto.beer_style,
        upc: dto.upc,
        price: dto.price,
        min_on_hand: 0,
        quantity_to_brew: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BeerStyle;
    use uuid::Uuid;

    fn pinball_porter() -> Beer {
        Beer::new(NewBeer {
            beer_name: "Pinball Porter".to_string(),
            beer_style: BeerStyle::Porter,
            upc: "0083783375213".to_string(),
            price: 1075,
            min_on_hand: 12,
            quantity_to_brew: 200,
        })
    }

    #[test]
    fn test_bare_dto() {
        let beer = pinball_porter();
        let dto = to_bare_dto(Some(&beer)).unwrap();

        assert_eq!(dto.id, Some(beer.id));
        assert_eq!(dto.version, Some(0));
        assert_eq!(dto.beer_name, "Pinball Porter");
        assert_eq!(dto.beer_style, BeerStyle::Porter);
        assert_eq!(dto.upc, "0083783375213");
        assert_eq!(dto.price, 1075);
        assert_eq!(dto.quantity_on_hand, None);
        assert_eq!(dto.created_date, Some(beer.created_date));
    }

    #[test]
    fn test_inventory_dto() {
        let beer = pinball_porter();
        let dto = to_inventory_dto(Some(&beer), 42).unwrap();

        assert_eq!(dto.quantity_on_hand, Some(42));
        assert_eq!(dto.id, Some(beer.id));
    }

    #[test]
    fn test_absent_beer_maps_to_none() {
        assert!(to_bare_dto(None).is_none());
        assert!(to_inventory_dto(None, 7).is_none());
    }

    #[test]
    fn test_new_beer_ignores_identity() {
        let mut dto = BeerDto::new("Galaxy Cat", BeerStyle::PaleAle, "9122089364369", 1150);
        dto.id = Some(Uuid::now_v7());
        dto.version = Some(3);
        dto.quantity_on_hand = Some(99);

        let input = to_new_beer(dto);
        assert_eq!(input.beer_name, "Galaxy Cat");
        assert_eq!(input.beer_style, BeerStyle::PaleAle);
        assert_eq!(input.upc, "9122089364369");
        assert_eq!(input.price, 1150);
        assert_eq!(input.min_on_hand, 0);
        assert_eq!(input.quantity_to_brew, 0);
    }
}
