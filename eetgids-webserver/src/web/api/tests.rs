use super::*;
use crate::core::entities::*;

pub mod prelude {

    use crate::web::{self, api, sqlite};

    pub use crate::web::tests::prelude::{LocalResponse as Response, *};

    pub fn setup() -> (Client, sqlite::Connections) {
        web::tests::rocket_test_setup(
            vec![("/", api::routes())],
            vec![("/", api::catchers())],
        )
    }

    pub fn test_json(r: &Response) {
        assert_eq!(
            r.headers().get("Content-Type").collect::<Vec<_>>()[0],
            "application/json"
        );
    }

    pub fn json_body<T: serde::de::DeserializeOwned>(r: Response) -> T {
        serde_json::from_str(&r.into_string().unwrap()).unwrap()
    }
}

use self::prelude::*;

const ADMIN_ID: &str = "admin-1";
const ADMIN_EMAIL: &str = "beheer@eetgids.nl";

fn admin(db: &sqlite::Connections) -> Header<'static> {
    set_role(db, ADMIN_ID, ADMIN_EMAIL, Role::Admin);
    bearer(ADMIN_ID, ADMIN_EMAIL)
}

struct Utrecht {
    city: City,
    italian: CuisineType,
    roma: Restaurant,
    lepel: Restaurant,
    hoek: Restaurant,
}

fn seed_utrecht(db: &sqlite::Connections) -> Utrecht {
    let city = create_city(db, "Utrecht", "utrecht", "Utrecht");
    let italian = create_cuisine(db, "Italiaans", "italiaans");
    let french = create_cuisine(db, "Frans", "frans");
    let roma = create_restaurant(
        db,
        &city,
        Restaurant::build()
            .name("Pizzeria Roma")
            .slug("pizzeria-roma")
            .lat_lng(52.0907, 5.1214)
            .price_range(PriceRange::Budget)
            .rating(4.5, 10)
            .finish(),
        &[&italian],
    );
    let lepel = create_restaurant(
        db,
        &city,
        Restaurant::build()
            .name("De Gouden Lepel")
            .slug("de-gouden-lepel")
            .lat_lng(52.0950, 5.1300)
            .price_range(PriceRange::Expensive)
            .rating(3.5, 2)
            .finish(),
        &[&italian, &french],
    );
    let hoek = create_restaurant(
        db,
        &city,
        Restaurant::build()
            .name("Het Hoekje")
            .slug("het-hoekje")
            .no_pos()
            .rating(5.0, 0)
            .finish(),
        &[],
    );
    Utrecht {
        city,
        italian,
        roma,
        lepel,
        hoek,
    }
}

#[test]
fn get_version() {
    let (client, _) = setup();
    let res = client.get("/server/version").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(res.into_string().unwrap(), DUMMY_VERSION);
}

#[test]
fn unknown_route_returns_json_error() {
    let (client, _) = setup();
    let res = client.get("/does-not-exist").dispatch();
    assert_eq!(res.status(), Status::NotFound);
    test_json(&res);
    let err: json::Error = json_body(res);
    assert_eq!(404, err.http_status);
}

mod restaurants {
    use super::*;

    #[test]
    fn list_by_city_sorted_by_name() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let res = client
            .get("/restaurants?city=utrecht&sort_by=name&sort_order=asc")
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        test_json(&res);
        let page: json::RestaurantPage = json_body(res);
        assert_eq!(3, page.total);
        let names: Vec<_> = page.restaurants.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(vec!["De Gouden Lepel", "Het Hoekje", "Pizzeria Roma"], names);
    }

    #[test]
    fn filter_by_cuisine_price_and_rating() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let page: json::RestaurantPage = json_body(
            client
                .get("/restaurants?cuisine=italiaans&price=%E2%82%AC,3")
                .dispatch(),
        );
        assert_eq!(2, page.total);
        let page: json::RestaurantPage =
            json_body(client.get("/restaurants?min_rating=4&min_reviews=1").dispatch());
        assert_eq!(1, page.total);
        assert_eq!("pizzeria-roma", page.restaurants[0].slug);
    }

    #[test]
    fn unknown_city_yields_empty_page() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let res = client.get("/restaurants?city=atlantis").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let page: json::RestaurantPage = json_body(res);
        assert_eq!(0, page.total);
        assert!(page.restaurants.is_empty());
    }

    #[test]
    fn page_beyond_the_number_range_is_empty() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let res = client
            .get("/restaurants?page=18446744073709551615&limit=100")
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let page: json::RestaurantPage = json_body(res);
        assert_eq!(3, page.total);
        assert!(page.restaurants.is_empty());
    }

    #[test]
    fn invalid_sorting_is_a_bad_request() {
        let (client, _) = setup();
        let res = client.get("/restaurants?sort_by=distance").dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        test_json(&res);
    }

    #[test]
    fn nearby_needs_both_coordinates() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let res = client.get("/restaurants/nearby?lat=52.09").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let nearby: Vec<json::NearbyRestaurant> = json_body(res);
        assert!(nearby.is_empty());
    }

    #[test]
    fn nearby_sorted_by_distance() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let res = client
            .get("/restaurants/nearby?lat=52.0907&lng=5.1214&limit=5")
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let nearby: Vec<json::NearbyRestaurant> = json_body(res);
        // Restaurants without a position are skipped
        assert_eq!(2, nearby.len());
        assert_eq!(utrecht.roma.id.as_str(), nearby[0].restaurant.id);
        assert!(nearby[0].distance_km < 0.001);
        assert!(nearby[0].distance_km <= nearby[1].distance_km);
    }

    #[test]
    fn nearby_rejects_invalid_positions() {
        let (client, _) = setup();
        let res = client.get("/restaurants/nearby?lat=95&lng=5").dispatch();
        assert_eq!(res.status(), Status::BadRequest);
    }

    #[test]
    fn listing_stats() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let res = client.get("/restaurants/stats?city=utrecht").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let stats: json::ListingStats = json_body(res);
        assert_eq!(3, stats.restaurant_count);
        // The restaurant without reviews does not count
        assert_eq!(Some(4.0), stats.average_rating);
        assert_eq!("Italiaans", stats.top_cuisines[0].name);
        assert_eq!(2, stats.top_cuisines[0].count);
        assert_eq!(4, stats.price_distribution.len());
        assert_eq!("€", stats.price_distribution[0].price_range);
        assert_eq!(1, stats.price_distribution[0].count);
    }

    #[test]
    fn locations_only_contain_positioned_restaurants() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let locations: Vec<json::RestaurantLocation> =
            json_body(client.get("/restaurants/locations").dispatch());
        assert_eq!(2, locations.len());
        assert!(locations
            .iter()
            .all(|l| l.city_slug.as_deref() == Some("utrecht")));
    }

    #[test]
    fn restaurant_details() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let res = client
            .get("/cities/utrecht/restaurants/de-gouden-lepel")
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let details: json::RestaurantDetails = json_body(res);
        assert_eq!(utrecht.lepel.id.as_str(), details.restaurant.id);
        assert_eq!(2, details.restaurant.cuisines.len());
        assert!(details.reviews.is_empty());

        let res = client.get("/cities/utrecht/restaurants/onbekend").dispatch();
        assert_eq!(res.status(), Status::NotFound);
        test_json(&res);
        let res = client
            .get("/cities/atlantis/restaurants/de-gouden-lepel")
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
    }

    #[test]
    fn register_restaurant() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let body = r#"{"name":"Pizzeria Roma","city":"utrecht","lat":52.1,"lng":5.1,"price_range":"€€","cuisines":["italiaans"]}"#;
        let res = client
            .post("/restaurants")
            .header(ContentType::JSON)
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::Unauthorized);

        let res = client
            .post("/restaurants")
            .header(ContentType::JSON)
            .header(bearer("u1", "eigenaar@example.nl"))
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let restaurant: json::Restaurant = json_body(res);
        assert_eq!("pizzeria-roma-2", restaurant.slug);
        assert_eq!(Some("u1"), restaurant.owner.as_deref());
        assert!(restaurant.claimed);
        assert!(!restaurant.verified);
        let stored = db
            .shared()
            .unwrap()
            .get_restaurant_with_relations(&restaurant.id)
            .unwrap();
        assert_eq!(Some(&utrecht.city.id), stored.restaurant.city_id.as_ref());
        assert_eq!(vec![utrecht.italian.id], stored.cuisines.into_iter().map(|c| c.id).collect::<Vec<_>>());
    }
}

mod reference_data {
    use super::*;

    #[test]
    fn cities_provinces_and_cuisines() {
        let (client, db) = setup();
        create_city(&db, "Zwolle", "zwolle", "Overijssel");
        create_city(&db, "Deventer", "deventer", "Overijssel");
        create_city(&db, "Utrecht", "utrecht", "Utrecht");
        create_cuisine(&db, "Thais", "thais");
        reload_reference_data(&client);

        let cities: Vec<json::City> = json_body(client.get("/cities").dispatch());
        let names: Vec<_> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec!["Deventer", "Utrecht", "Zwolle"], names);

        let city: json::City = json_body(client.get("/cities/zwolle").dispatch());
        assert_eq!("Overijssel", city.province);
        assert_eq!(
            client.get("/cities/atlantis").dispatch().status(),
            Status::NotFound
        );

        let provinces: Vec<json::Province> = json_body(client.get("/provinces").dispatch());
        assert_eq!(2, provinces.len());
        assert_eq!("Overijssel", provinces[0].name);
        assert_eq!(2, provinces[0].cities.len());

        let cuisine: json::Cuisine = json_body(client.get("/cuisines/thais").dispatch());
        assert_eq!("Thais", cuisine.name);
        assert_eq!(
            client.get("/cuisines/fondue").dispatch().status(),
            Status::NotFound
        );
    }
}

mod reviews {
    use super::*;

    fn post_review(client: &Client, restaurant_id: &str, body: &str) -> Status {
        client
            .post(format!("/restaurants/{restaurant_id}/reviews"))
            .header(ContentType::JSON)
            .body(body)
            .dispatch()
            .status()
    }

    #[test]
    fn guest_review_requires_human_verification() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let id = utrecht.hoek.id.as_str();
        let review = |token: &str| {
            format!(
                r#"{{"rating":4,"content":"Lekker","guest_name":"Jan","guest_email":"jan@example.nl","verification_token":"{token}"}}"#
            )
        };
        assert_eq!(Status::BadRequest, post_review(&client, id, &review("robot")));
        assert!(db
            .shared()
            .unwrap()
            .pending_reviews(&Pagination::default())
            .unwrap()
            .is_empty());

        assert_eq!(Status::Ok, post_review(&client, id, &review(VALID_TOKEN)));
        let pending = db
            .shared()
            .unwrap()
            .pending_reviews(&Pagination::default())
            .unwrap();
        assert_eq!(1, pending.len());
        assert!(!pending[0].approved);
    }

    #[test]
    fn invalid_reviews() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let id = utrecht.hoek.id.as_str();
        let rating_6 = format!(
            r#"{{"rating":6,"content":"Top","guest_name":"Jan","guest_email":"jan@example.nl","verification_token":"{VALID_TOKEN}"}}"#
        );
        assert_eq!(Status::BadRequest, post_review(&client, id, &rating_6));
        let blank = format!(
            r#"{{"rating":3,"content":"  ","guest_name":"Jan","guest_email":"jan@example.nl","verification_token":"{VALID_TOKEN}"}}"#
        );
        assert_eq!(Status::BadRequest, post_review(&client, id, &blank));
        let no_email = format!(
            r#"{{"rating":3,"content":"Prima","guest_name":"Jan","verification_token":"{VALID_TOKEN}"}}"#
        );
        assert_eq!(Status::BadRequest, post_review(&client, id, &no_email));
        assert_eq!(
            Status::UnprocessableEntity,
            post_review(&client, id, "{\"rating\":")
        );
    }

    #[test]
    fn moderation_is_restricted_to_admins() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let id = utrecht.hoek.id.as_str();
        let body = format!(
            r#"{{"rating":2,"content":"Matig","guest_name":"Jan","guest_email":"jan@example.nl","verification_token":"{VALID_TOKEN}"}}"#
        );
        assert_eq!(Status::Ok, post_review(&client, id, &body));

        let res = client.get("/reviews/pending").dispatch();
        assert_eq!(res.status(), Status::Unauthorized);
        let res = client
            .get("/reviews/pending")
            .header(bearer("u1", "gast@example.nl"))
            .dispatch();
        assert_eq!(res.status(), Status::Forbidden);

        let admin = admin(&db);
        let pending: Vec<json::Review> = json_body(
            client
                .get("/reviews/pending")
                .header(admin.clone())
                .dispatch(),
        );
        assert_eq!(1, pending.len());
        // Guest e-mail addresses are never published
        assert!(!serde_json::to_string(&pending[0]).unwrap().contains("jan@example.nl"));

        let res = client
            .post(format!("/reviews/{}/approve", pending[0].id))
            .header(admin)
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let restaurant = db.shared().unwrap().get_restaurant(id).unwrap();
        assert_eq!(1, restaurant.review_count);
        assert_eq!(Some(2.0), restaurant.rating.map(f64::from));
    }

    #[test]
    fn approve_unknown_review() {
        let (client, db) = setup();
        let res = client
            .post("/reviews/unknown/approve")
            .header(admin(&db))
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
    }
}

mod favorites {
    use super::*;

    #[test]
    fn toggle_favorite() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let url = format!("/restaurants/{}/favorite", utrecht.roma.id);

        assert_eq!(client.post(&url).dispatch().status(), Status::Unauthorized);

        let user = || bearer("u1", "fijnproever@example.nl");
        let state: json::FavoriteState = json_body(client.post(&url).header(user()).dispatch());
        assert!(state.favorite);
        let favorites: Vec<json::Restaurant> =
            json_body(client.get("/favorites").header(user()).dispatch());
        assert_eq!(1, favorites.len());

        let state: json::FavoriteState = json_body(client.post(&url).header(user()).dispatch());
        assert!(!state.favorite);
        let favorites: Vec<json::Restaurant> =
            json_body(client.get("/favorites").header(user()).dispatch());
        assert!(favorites.is_empty());
    }

    #[test]
    fn access_token_from_cookie() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let token = access_token("u2", "koekje@example.nl");
        let res = client
            .post(format!("/restaurants/{}/favorite", utrecht.lepel.id))
            .cookie(Cookie::new(crate::web::guards::COOKIE_ACCESS_TOKEN_KEY, token))
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let user: json::User = json_body(
            client
                .get("/users/current")
                .header(bearer("u2", "koekje@example.nl"))
                .dispatch(),
        );
        assert_eq!("koekje@example.nl", user.email);
        assert_eq!(json::UserRole::User, user.role);
    }

    #[test]
    fn invalid_tokens_are_ignored() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let res = client
            .post(format!("/restaurants/{}/favorite", utrecht.lepel.id))
            .header(Header::new("Authorization", "Bearer not-a-jwt"))
            .dispatch();
        assert_eq!(res.status(), Status::Unauthorized);
    }
}

mod claims {
    use super::*;

    fn claim_body(token: &str) -> String {
        format!(
            r#"{{"business_email":"info@pizzeria-roma.nl","message":"Ik ben de eigenaar","verification_token":"{token}"}}"#
        )
    }

    #[test]
    fn duplicate_claims_conflict() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let url = format!("/restaurants/{}/claims", utrecht.roma.id);
        let user = || bearer("u1", "eigenaar@example.nl");

        let res = client
            .post(&url)
            .header(ContentType::JSON)
            .body(claim_body(VALID_TOKEN))
            .dispatch();
        assert_eq!(res.status(), Status::Unauthorized);

        let res = client
            .post(&url)
            .header(ContentType::JSON)
            .header(user())
            .body(claim_body("robot"))
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);

        let res = client
            .post(&url)
            .header(ContentType::JSON)
            .header(user())
            .body(claim_body(VALID_TOKEN))
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let claim: json::Claim = json_body(res);
        assert_eq!("pending", claim.status);

        let res = client
            .post(&url)
            .header(ContentType::JSON)
            .header(user())
            .body(claim_body(VALID_TOKEN))
            .dispatch();
        assert_eq!(res.status(), Status::Conflict);
        test_json(&res);
    }

    #[test]
    fn approve_claim() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let claim: json::Claim = json_body(
            client
                .post(format!("/restaurants/{}/claims", utrecht.roma.id))
                .header(ContentType::JSON)
                .header(bearer("u1", "eigenaar@example.nl"))
                .body(claim_body(VALID_TOKEN))
                .dispatch(),
        );
        let admin = admin(&db);

        let pending: Vec<json::Claim> = json_body(
            client
                .get("/claims?status=pending")
                .header(admin.clone())
                .dispatch(),
        );
        assert_eq!(1, pending.len());

        let approved: json::Claim = json_body(
            client
                .post(format!("/claims/{}/approve", claim.id))
                .header(admin.clone())
                .dispatch(),
        );
        assert_eq!("approved", approved.status);
        assert_eq!(Some(ADMIN_ID), approved.reviewed_by.as_deref());
        let restaurant = db
            .shared()
            .unwrap()
            .get_restaurant(utrecht.roma.id.as_str())
            .unwrap();
        assert!(restaurant.claimed);
        assert_eq!(Some(Id::from("u1")), restaurant.owner);

        let res = client
            .post(format!("/claims/{}/reject", claim.id))
            .header(admin.clone())
            .dispatch();
        assert_eq!(res.status(), Status::Conflict);

        let res = client
            .get("/claims?status=unknown")
            .header(admin)
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
    }

    #[test]
    fn reject_claim_with_reason() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let claim: json::Claim = json_body(
            client
                .post(format!("/restaurants/{}/claims", utrecht.lepel.id))
                .header(ContentType::JSON)
                .header(bearer("u1", "eigenaar@example.nl"))
                .body(claim_body(VALID_TOKEN))
                .dispatch(),
        );
        let rejected: json::Claim = json_body(
            client
                .post(format!("/claims/{}/reject", claim.id))
                .header(ContentType::JSON)
                .header(admin(&db))
                .body(r#"{"reason":"Geen bewijs"}"#)
                .dispatch(),
        );
        assert_eq!("rejected", rejected.status);
        assert_eq!(Some("Geen bewijs"), rejected.rejection_reason.as_deref());
    }
}

mod photos {
    use super::*;

    #[test]
    fn submit_and_moderate_photos() {
        let (client, db) = setup();
        let utrecht = seed_utrecht(&db);
        let body = format!(
            r#"{{"url":"https://example.com/pizza.jpg","caption":"Margherita","verification_token":"{VALID_TOKEN}"}}"#
        );
        let url = format!("/restaurants/{}/photos", utrecht.roma.id);
        let res = client
            .post(&url)
            .header(ContentType::JSON)
            .body(body.clone())
            .dispatch();
        assert_eq!(res.status(), Status::Unauthorized);

        let photo: json::Photo = json_body(
            client
                .post(&url)
                .header(ContentType::JSON)
                .header(bearer("u1", "fotograaf@example.nl"))
                .body(body)
                .dispatch(),
        );
        assert!(!photo.approved);

        let admin = admin(&db);
        let pending: Vec<json::Photo> = json_body(
            client
                .get("/photos/pending")
                .header(admin.clone())
                .dispatch(),
        );
        assert_eq!(1, pending.len());

        let approved: json::Photo = json_body(
            client
                .post(format!("/photos/{}/approve", photo.id))
                .header(admin.clone())
                .dispatch(),
        );
        assert!(approved.approved);

        let primary: json::Photo = json_body(
            client
                .post(format!("/photos/{}/primary", photo.id))
                .header(admin.clone())
                .dispatch(),
        );
        assert!(primary.is_primary);

        let res = client
            .post(format!("/photos/{}/reject", photo.id))
            .header(admin)
            .dispatch();
        assert_eq!(res.status(), Status::NoContent);
        assert!(db
            .shared()
            .unwrap()
            .approved_photos_of_restaurant(utrecht.roma.id.as_str())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn refresh_photos_in_batches() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let res = client
            .post("/photo-refresh")
            .header(ContentType::JSON)
            .header(admin(&db))
            .body(r#"{"batchSize":2,"offset":0}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body = res.into_string().unwrap();
        assert!(body.contains("\"photosDownloaded\":2"));
        let result: json::PhotoRefreshResult = serde_json::from_str(&body).unwrap();
        assert_eq!(2, result.processed);
        assert!(result.has_more);
        assert_eq!(2, result.next_offset);
        assert_eq!(3, result.total_restaurants);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn refresh_photos_behind_the_last_restaurant() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let res = client
            .post("/photo-refresh")
            .header(ContentType::JSON)
            .header(admin(&db))
            .body(r#"{"batchSize":2,"offset":18446744073709551615}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let result: json::PhotoRefreshResult = json_body(res);
        assert_eq!(0, result.processed);
        assert!(!result.has_more);
        assert_eq!(u64::MAX, result.next_offset);
    }

    #[test]
    fn refresh_photos_requires_admin() {
        let (client, _) = setup();
        let res = client
            .post("/photo-refresh")
            .header(ContentType::JSON)
            .header(bearer("u1", "jan@example.nl"))
            .body("{}")
            .dispatch();
        assert_eq!(res.status(), Status::Forbidden);
    }
}

mod import_jobs {
    use super::*;

    fn control(client: &Client, admin: Header<'static>, action: &str) -> Option<json::ImportJob> {
        json_body(
            client
                .post("/import-jobs")
                .header(ContentType::JSON)
                .header(admin)
                .body(format!(r#"{{"action":"{action}"}}"#))
                .dispatch(),
        )
    }

    #[test]
    fn start_and_observe_import_job() {
        let (client, db) = setup();
        let admin = admin(&db);
        assert!(control(&client, admin.clone(), "status").is_none());
        let job = control(&client, admin.clone(), "start").unwrap();
        assert_eq!("pending", job.status);
        let again = control(&client, admin.clone(), "start").unwrap();
        assert_eq!(job.id, again.id);

        let res = client
            .post("/import-jobs")
            .header(ContentType::JSON)
            .header(admin)
            .body(r#"{"action":"abort"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
    }

    #[test]
    fn worker_reports_progress() {
        let (client, db) = setup();
        let admin = admin(&db);
        let job = control(&client, admin.clone(), "start").unwrap();
        let url = format!("/import-jobs/{}", job.id);
        let running = r#"{"status":"running","counters":{"processed_cities":1,"imported_restaurants":12,"imported_reviews":40,"skipped_restaurants":0},"last_city":"utrecht"}"#;

        let res = client
            .put(&url)
            .header(ContentType::JSON)
            .header(Header::new("Authorization", "Bearer wrong"))
            .body(running)
            .dispatch();
        assert_eq!(res.status(), Status::Unauthorized);

        let worker = || Header::new("Authorization", format!("Bearer {WORKER_TOKEN}"));
        let job: json::ImportJob = json_body(
            client
                .put(&url)
                .header(ContentType::JSON)
                .header(worker())
                .body(running)
                .dispatch(),
        );
        assert_eq!("running", job.status);
        assert_eq!(12, job.counters.imported_restaurants);

        let job: json::ImportJob = json_body(
            client
                .put(&url)
                .header(ContentType::JSON)
                .header(worker())
                .body(r#"{"status":"failed","errors":["quota exceeded"]}"#)
                .dispatch(),
        );
        assert_eq!("failed", job.status);
        assert_eq!(vec!["quota exceeded".to_string()], job.errors);
        assert!(job.finished_at.is_some());

        let res = client
            .put(&url)
            .header(ContentType::JSON)
            .header(worker())
            .body(running)
            .dispatch();
        assert_eq!(res.status(), Status::Conflict);

        let status = control(&client, admin, "status").unwrap();
        assert_eq!("failed", status.status);
    }

    #[test]
    fn terminal_import_reloads_reference_data() {
        let (client, db) = setup();
        let admin = admin(&db);
        let job = control(&client, admin, "start").unwrap();
        create_city(&db, "Groningen", "groningen", "Groningen");
        let cities: Vec<json::City> = json_body(client.get("/cities").dispatch());
        assert!(cities.is_empty());

        let res = client
            .put(format!("/import-jobs/{}", job.id))
            .header(ContentType::JSON)
            .header(Header::new("Authorization", format!("Bearer {WORKER_TOKEN}")))
            .body(r#"{"status":"completed"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let cities: Vec<json::City> = json_body(client.get("/cities").dispatch());
        assert_eq!(1, cities.len());
    }
}

mod ads {
    use super::*;

    #[test]
    fn manage_ads() {
        let (client, db) = setup();
        let admin = admin(&db);
        let body = r#"{"name":"Wijnhuis","position":"sidebar","image_url":"https://ads.example.com/wijn.png","target_url":"https://wijnhuis.example.com"}"#;

        let res = client
            .post("/ads")
            .header(ContentType::JSON)
            .header(bearer("u1", "jan@example.nl"))
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::Forbidden);

        let ad: json::Ad = json_body(
            client
                .post("/ads")
                .header(ContentType::JSON)
                .header(admin.clone())
                .body(body)
                .dispatch(),
        );
        assert!(ad.active);

        let sidebar: Vec<json::Ad> = json_body(client.get("/ads?position=sidebar").dispatch());
        assert_eq!(1, sidebar.len());
        let banner: Vec<json::Ad> = json_body(client.get("/ads?position=banner").dispatch());
        assert!(banner.is_empty());
        assert_eq!(
            client.get("/ads?position=popup").dispatch().status(),
            Status::BadRequest
        );

        let inactive = body.replace("\"target_url\"", "\"active\":false,\"target_url\"");
        let res = client
            .put(format!("/ads/{}", ad.id))
            .header(ContentType::JSON)
            .header(admin.clone())
            .body(inactive)
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let active: Vec<json::Ad> = json_body(client.get("/ads").dispatch());
        assert!(active.is_empty());

        let res = client
            .delete(format!("/ads/{}", ad.id))
            .header(admin.clone())
            .dispatch();
        assert_eq!(res.status(), Status::NoContent);
        let res = client
            .delete(format!("/ads/{}", ad.id))
            .header(admin)
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
    }
}

mod misc {
    use super::*;

    #[test]
    fn contact_form() {
        let (client, _) = setup();
        let message = |token: &str| {
            format!(
                r#"{{"name":"Piet","email":"piet@example.nl","message":"Mijn restaurant ontbreekt","verification_token":"{token}"}}"#
            )
        };
        let res = client
            .post("/contact")
            .header(ContentType::JSON)
            .body(message("robot"))
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        let res = client
            .post("/contact")
            .header(ContentType::JSON)
            .body(message(VALID_TOKEN))
            .dispatch();
        assert_eq!(res.status(), Status::NoContent);
    }

    #[test]
    fn change_user_role() {
        let (client, db) = setup();
        let admin = admin(&db);
        set_role(&db, "u1", "jan@example.nl", Role::User);

        let res = client
            .put("/users/u1/role")
            .header(ContentType::JSON)
            .header(bearer("u1", "jan@example.nl"))
            .body(r#"{"role":"admin"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Forbidden);

        let user: json::User = json_body(
            client
                .put("/users/u1/role")
                .header(ContentType::JSON)
                .header(admin)
                .body(r#"{"role":"admin"}"#)
                .dispatch(),
        );
        assert_eq!(json::UserRole::Admin, user.role);
    }

    #[test]
    fn csv_export() {
        let (client, db) = setup();
        seed_utrecht(&db);
        let res = client.get("/export/restaurants.csv").dispatch();
        assert_eq!(res.status(), Status::Unauthorized);

        let res = client
            .get("/export/restaurants.csv")
            .header(admin(&db))
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(res.content_type(), Some(ContentType::CSV));
        let csv = res.into_string().unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("id,created_at,name,slug,city"));
        let rows: Vec<_> = lines.collect();
        assert_eq!(3, rows.len());
        assert!(rows[0].contains("De Gouden Lepel"));
        assert!(rows[0].contains("Frans,Italiaans") || rows[0].contains("Italiaans,Frans"));
    }
}
