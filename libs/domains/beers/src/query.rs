use crate::models::BeerStyle;

/// Which repository query a listing runs, derived from the optional filters.
///
/// Name and style together win over either alone; no filter lists everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeerQuery<'a> {
    ByNameAndStyle {
        beer_name: &'a str,
        beer_style: BeerStyle,
    },
    ByName(&'a str),
    ByStyle(BeerStyle),
    All,
}

impl<'a> BeerQuery<'a> {
    /// An empty name is the same as no name filter.
    pub fn from_filters(beer_name: Option<&'a str>, beer_style: Option<BeerStyle>) -> Self {
        let beer_name = beer_name.filter(|name| !name.is_empty());

        match (beer_name, beer_style) {
            (Some(beer_name), Some(beer_style)) => Self::ByNameAndStyle {
                beer_name,
                beer_style,
            },
            (Some(beer_name), None) => Self::ByName(beer_name),
            (None, Some(beer_style)) => Self::ByStyle(beer_style),
            (None, None) => Self::All,
        }
    }
}
