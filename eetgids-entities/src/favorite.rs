use crate::{id::Id, time::Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub user_id: Id,
    pub restaurant_id: Id,
    pub created_at: Timestamp,
}

/// State of a (user, restaurant) pair after toggling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Added,
    Removed,
}

impl FavoriteState {
    pub const fn is_favorite(self) -> bool {
        matches!(self, Self::Added)
    }
}
