use std::{fmt, str::FromStr};

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{EnumCount, EnumIter};
use thiserror::Error;

pub type PriceRangePrimitive = i16;

/// Ordinal price tier of a restaurant, displayed as one to four euro signs.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive, EnumIter, EnumCount)]
pub enum PriceRange {
    Budget    = 1,
    Moderate  = 2,
    Expensive = 3,
    Luxury    = 4,
}

impl PriceRange {
    pub const ALL: [Self; 4] = [Self::Budget, Self::Moderate, Self::Expensive, Self::Luxury];

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Budget => "€",
            Self::Moderate => "€€",
            Self::Expensive => "€€€",
            Self::Luxury => "€€€€",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Moderate => "moderate",
            Self::Expensive => "expensive",
            Self::Luxury => "luxury",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Error)]
#[error("Invalid price range: {0}")]
pub struct PriceRangeParseError(String);

/// Accepts the euro symbols, the tier number (1-4) or the label.
impl FromStr for PriceRange {
    type Err = PriceRangeParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let tier = match s {
            "€" | "1" => Self::Budget,
            "€€" | "2" => Self::Moderate,
            "€€€" | "3" => Self::Expensive,
            "€€€€" | "4" => Self::Luxury,
            _ => match s.to_ascii_lowercase().as_str() {
                "budget" => Self::Budget,
                "moderate" => Self::Moderate,
                "expensive" => Self::Expensive,
                "luxury" => Self::Luxury,
                _ => return Err(PriceRangeParseError(s.to_owned())),
            },
        };
        Ok(tier)
    }
}

#[derive(Debug, Error)]
#[error("Invalid price range primitive: {0}")]
pub struct InvalidPriceRangePrimitive(PriceRangePrimitive);

impl TryFrom<PriceRangePrimitive> for PriceRange {
    type Error = InvalidPriceRangePrimitive;
    fn try_from(from: PriceRangePrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidPriceRangePrimitive(from))
    }
}

impl From<PriceRange> for PriceRangePrimitive {
    fn from(from: PriceRange) -> Self {
        from.to_i16().unwrap_or_default()
    }
}
