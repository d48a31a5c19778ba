use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::{email::EmailAddress, id::Id, time::Timestamp};

pub type ClaimStatusPrimitive = i16;

/// Rejected claims have a negative primitive so that a partial
/// unique index over non-negative values covers open and approved claims.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ClaimStatus {
    Rejected = -1,
    Pending  =  0,
    Approved =  1,
}

impl ClaimStatus {
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Error)]
#[error("Invalid claim status primitive: {0}")]
pub struct InvalidClaimStatusPrimitive(ClaimStatusPrimitive);

impl TryFrom<ClaimStatusPrimitive> for ClaimStatus {
    type Error = InvalidClaimStatusPrimitive;
    fn try_from(from: ClaimStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidClaimStatusPrimitive(from))
    }
}

impl From<ClaimStatus> for ClaimStatusPrimitive {
    fn from(from: ClaimStatus) -> Self {
        from.to_i16().unwrap_or_default()
    }
}

/// A user's assertion of ownership of a restaurant listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantClaim {
    pub id: Id,
    pub restaurant_id: Id,
    pub user_id: Id,
    pub business_email: EmailAddress,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: ClaimStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Id>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
