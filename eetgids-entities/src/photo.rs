use crate::{id::Id, time::Timestamp, url::Url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantPhoto {
    pub id: Id,
    pub restaurant_id: Id,
    pub url: Url,
    pub caption: Option<String>,
    /// At most one primary photo per restaurant.
    pub is_primary: bool,
    pub approved: bool,
    pub uploaded_by: Option<Id>,
    pub created_at: Timestamp,
}
