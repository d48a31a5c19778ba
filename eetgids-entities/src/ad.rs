use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::{id::Id, time::Timestamp, url::Url};

pub type AdPositionPrimitive = i16;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum AdPosition {
    Sidebar = 1,
    Banner  = 2,
    InFeed  = 3,
}

impl AdPosition {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Error)]
#[error("Invalid ad position primitive: {0}")]
pub struct InvalidAdPositionPrimitive(AdPositionPrimitive);

impl TryFrom<AdPositionPrimitive> for AdPosition {
    type Error = InvalidAdPositionPrimitive;
    fn try_from(from: AdPositionPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidAdPositionPrimitive(from))
    }
}

impl From<AdPosition> for AdPositionPrimitive {
    fn from(from: AdPosition) -> Self {
        from.to_i16().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdPlacement {
    pub id: Id,
    pub name: String,
    pub position: AdPosition,
    pub image_url: Url,
    pub target_url: Url,
    pub active: bool,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

impl AdPlacement {
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.active
            && self.starts_at.map_or(true, |start| start <= now)
            && self.ends_at.map_or(true, |end| now < end)
    }
}
