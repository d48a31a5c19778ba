use crate::{email::EmailAddress, id::Id, rating::RatingValue, time::Timestamp};

/// Who wrote a review: either a signed-in user or a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Author {
    User(Id),
    Guest { name: String, email: EmailAddress },
}

impl Author {
    pub fn user_id(&self) -> Option<&Id> {
        match self {
            Self::User(id) => Some(id),
            Self::Guest { .. } => None,
        }
    }

    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Id,
    pub restaurant_id: Id,
    pub rating: RatingValue,
    pub title: Option<String>,
    pub content: String,
    pub author: Author,
    /// Only approved reviews are visible and counted.
    pub approved: bool,
    pub verified: bool,
    pub created_at: Timestamp,
}
