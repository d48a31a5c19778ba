pub mod prelude {

    use std::cell::RefCell;

    pub use eetgids_core::{
        db::*,
        entities::*,
        gateways::{
            human_verification::{HumanVerificationError, HumanVerificationGateway},
            notify::{NotificationEvent, NotificationGateway, NotificationType},
            photo_source::PhotoSourceGateway,
        },
        repositories::{Error as RepoError, *},
        usecases,
    };
    pub use eetgids_entities::builders::*;

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows,
    };

    pub const VALID_TOKEN: &str = "valid-token";

    pub struct FakeVerification;

    impl HumanVerificationGateway for FakeVerification {
        fn verify(&self, token: &str, _: Option<&str>) -> Result<(), HumanVerificationError> {
            if token == VALID_TOKEN {
                Ok(())
            } else {
                Err(HumanVerificationError::Rejected(vec![
                    "invalid-input-response".into(),
                ]))
            }
        }
    }

    #[derive(Default)]
    pub struct RecordingNotify(RefCell<Vec<NotificationType>>);

    impl RecordingNotify {
        pub fn events(&self) -> Vec<NotificationType> {
            self.0.borrow().clone()
        }
    }

    impl NotificationGateway for RecordingNotify {
        fn notify(&self, event: NotificationEvent) {
            self.0.borrow_mut().push(event.kind());
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub verification: FakeVerification,
        pub notify: RecordingNotify,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            eetgids_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            Self {
                db_connections,
                verification: FakeVerification,
                notify: RecordingNotify::default(),
            }
        }

        pub fn create_city(&self, slug: &str) -> City {
            let db = self.db_connections.exclusive().unwrap();
            if let Ok(city) = db.get_city_by_slug(slug) {
                return city;
            }
            let city = City::build()
                .name(slug)
                .slug(slug)
                .province("Noord-Holland")
                .finish();
            db.create_city(&city).unwrap();
            city
        }

        pub fn create_cuisine(&self, slug: &str) -> CuisineType {
            let cuisine = CuisineType::build().name(slug).slug(slug).finish();
            self.db_connections
                .exclusive()
                .unwrap()
                .create_cuisine(&cuisine)
                .unwrap();
            cuisine
        }

        pub fn create_restaurant(&self, city_slug: &str, name: &str) -> Restaurant {
            let city = self.create_city(city_slug);
            let restaurant = Restaurant::build()
                .name(name)
                .slug(&name.to_lowercase().replace(' ', "-"))
                .city_id(city.id.as_str())
                .lat_lng(52.37, 4.89)
                .finish();
            self.db_connections
                .exclusive()
                .unwrap()
                .create_restaurant(&restaurant, &[])
                .unwrap();
            restaurant
        }

        pub fn get_restaurant(&self, id: &str) -> Restaurant {
            self.db_connections
                .shared()
                .unwrap()
                .get_restaurant(id)
                .unwrap()
        }

        pub fn get_restaurant_with_relations(&self, id: &str) -> RestaurantWithRelations {
            self.db_connections
                .shared()
                .unwrap()
                .get_restaurant_with_relations(id)
                .unwrap()
        }

        pub fn get_claim(&self, id: &str) -> RestaurantClaim {
            self.db_connections.shared().unwrap().get_claim(id).unwrap()
        }

        pub fn pending_reviews(&self) -> Vec<Id> {
            self.db_connections
                .shared()
                .unwrap()
                .pending_reviews(&Pagination::default())
                .unwrap()
                .into_iter()
                .map(|r| r.id)
                .collect()
        }

        pub fn is_favorite(&self, user_id: &str, restaurant_id: &str) -> bool {
            self.db_connections
                .shared()
                .unwrap()
                .is_favorite(user_id, restaurant_id)
                .unwrap()
        }

        pub fn approved_photos(&self, restaurant_id: &str) -> Vec<RestaurantPhoto> {
            self.db_connections
                .shared()
                .unwrap()
                .approved_photos_of_restaurant(restaurant_id)
                .unwrap()
        }
    }
}
