use crate::repositories::*;

/// All repositories of a single database connection.
pub trait Db:
    CityRepo
    + CuisineRepo
    + RestaurantRepo
    + ReviewRepo
    + FavoriteRepo
    + ClaimRepo
    + PhotoRepo
    + ImportJobRepo
    + AdRepo
    + UserRepo
{
}

impl<T> Db for T where
    T: CityRepo
        + CuisineRepo
        + RestaurantRepo
        + ReviewRepo
        + FavoriteRepo
        + ClaimRepo
        + PhotoRepo
        + ImportJobRepo
        + AdRepo
        + UserRepo
{
}
