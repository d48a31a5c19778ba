use crate::entities::*;

/// Looks up photo URLs of a restaurant at an external places source.
pub trait PhotoSourceGateway {
    fn find_photos(&self, restaurant: &Restaurant) -> anyhow::Result<Vec<Url>>;
}
