pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{city_builder::*, cuisine_builder::*, restaurant_builder::*};

pub mod restaurant_builder {

    use super::*;
    use crate::{
        address::*, contact::*, geo::*, id::*, price::*, rating::*, restaurant::*, time::*,
    };

    #[derive(Debug)]
    pub struct RestaurantBuild {
        restaurant: Restaurant,
    }

    impl RestaurantBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.restaurant.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.restaurant.name = name.into();
            self
        }
        pub fn slug(mut self, slug: &str) -> Self {
            self.restaurant.slug = slug.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.restaurant.pos = Some(pos);
            self
        }
        pub fn lat_lng(self, lat: f64, lng: f64) -> Self {
            self.pos(MapPoint::from_lat_lng_deg(lat, lng))
        }
        pub fn no_pos(mut self) -> Self {
            self.restaurant.pos = None;
            self
        }
        pub fn street(mut self, street: &str) -> Self {
            self.restaurant.address.street = Some(street.into());
            self
        }
        pub fn price_range(mut self, price_range: PriceRange) -> Self {
            self.restaurant.price_range = Some(price_range);
            self
        }
        pub fn rating(mut self, rating: f64, review_count: u32) -> Self {
            self.restaurant.rating = Some(AvgRating::from(rating));
            self.restaurant.review_count = review_count;
            self
        }
        pub fn city_id(mut self, city_id: &str) -> Self {
            self.restaurant.city_id = Some(city_id.into());
            self
        }
        pub fn owner(mut self, owner: &str) -> Self {
            self.restaurant.owner = Some(owner.into());
            self.restaurant.claimed = true;
            self
        }
        pub fn finish(self) -> Restaurant {
            self.restaurant
        }
    }

    impl Builder for Restaurant {
        type Build = RestaurantBuild;
        fn build() -> RestaurantBuild {
            RestaurantBuild {
                restaurant: Restaurant {
                    id: Id::new(),
                    name: "".into(),
                    slug: "".into(),
                    address: Address::default(),
                    pos: None,
                    contact: Contact::default(),
                    price_range: None,
                    rating: None,
                    review_count: 0,
                    verified: false,
                    claimed: false,
                    owner: None,
                    features: vec![],
                    specialties: vec![],
                    description: None,
                    city_id: None,
                    created_at: Timestamp::from_secs(0),
                },
            }
        }
    }
}

pub mod city_builder {

    use super::*;
    use crate::{city::*, id::*};

    #[derive(Debug)]
    pub struct CityBuild {
        city: City,
    }

    impl CityBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.city.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.city.name = name.into();
            self
        }
        pub fn slug(mut self, slug: &str) -> Self {
            self.city.slug = slug.into();
            self
        }
        pub fn province(mut self, province: &str) -> Self {
            self.city.province = province.into();
            self
        }
        pub fn finish(self) -> City {
            self.city
        }
    }

    impl Builder for City {
        type Build = CityBuild;
        fn build() -> CityBuild {
            CityBuild {
                city: City {
                    id: Id::new(),
                    name: "".into(),
                    slug: "".into(),
                    province: "".into(),
                    center: None,
                    description: None,
                },
            }
        }
    }
}

pub mod cuisine_builder {

    use super::*;
    use crate::{cuisine::*, id::*};

    #[derive(Debug)]
    pub struct CuisineTypeBuild {
        cuisine: CuisineType,
    }

    impl CuisineTypeBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.cuisine.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.cuisine.name = name.into();
            self
        }
        pub fn slug(mut self, slug: &str) -> Self {
            self.cuisine.slug = slug.into();
            self
        }
        pub fn finish(self) -> CuisineType {
            self.cuisine
        }
    }

    impl Builder for CuisineType {
        type Build = CuisineTypeBuild;
        fn build() -> CuisineTypeBuild {
            CuisineTypeBuild {
                cuisine: CuisineType {
                    id: Id::new(),
                    name: "".into(),
                    slug: "".into(),
                    icon: None,
                },
            }
        }
    }
}
