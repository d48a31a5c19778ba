use super::*;
use crate::web::tests::prelude::*;

const ADMIN_ID: &str = "admin-1";
const ADMIN_EMAIL: &str = "beheer@eetgids.nl";

fn setup() -> (Client, sqlite::Connections) {
    rocket_test_setup(vec![("/", super::routes())], vec![("/", super::catchers())])
}

fn seed(client: &Client, db: &sqlite::Connections) -> (City, CuisineType, Restaurant) {
    let city = create_city(db, "Utrecht", "utrecht", "Utrecht");
    let italian = create_cuisine(db, "Italiaans", "italiaans");
    let roma = create_restaurant(
        db,
        &city,
        Restaurant::build()
            .name("Pizzeria Roma")
            .slug("pizzeria-roma")
            .lat_lng(52.0907, 5.1214)
            .price_range(PriceRange::Budget)
            .rating(4.5, 12)
            .finish(),
        &[&italian],
    );
    create_restaurant(
        db,
        &city,
        Restaurant::build()
            .name("Het Hoekje")
            .slug("het-hoekje")
            .no_pos()
            .finish(),
        &[],
    );
    reload_reference_data(client);
    (city, italian, roma)
}

fn location(res: &LocalResponse) -> String {
    res.headers().get_one("Location").unwrap().to_owned()
}

#[test]
fn serve_static_assets() {
    let (client, _) = setup();
    let res = client.get("/main.css").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(res.content_type(), Some(ContentType::CSS));
    let res = client.get("/nearby.js").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(res.content_type(), Some(ContentType::JavaScript));
    assert!(res.into_string().unwrap().contains("getCurrentPosition"));
}

#[test]
fn index_lists_provinces_and_top_rated() {
    let (client, db) = setup();
    seed(&client, &db);
    let res = client.get("/").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(res.content_type(), Some(ContentType::HTML));
    let body = res.into_string().unwrap();
    assert!(body.contains("Utrecht"));
    assert!(body.contains("href=\"/utrecht/pizzeria-roma\""));
    assert!(body.contains("href=\"/keukens/italiaans\""));
}

mod city {
    use super::*;

    #[test]
    fn list_restaurants_of_the_city() {
        let (client, db) = setup();
        seed(&client, &db);
        let res = client.get("/utrecht").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body = res.into_string().unwrap();
        assert!(body.contains("Pizzeria Roma"));
        assert!(body.contains("Het Hoekje"));
        assert!(body.contains("★ 4,5"));
    }

    #[test]
    fn filter_by_cuisine() {
        let (client, db) = setup();
        seed(&client, &db);
        let res = client.get("/utrecht?cuisine=italiaans").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body = res.into_string().unwrap();
        assert!(body.contains("Pizzeria Roma"));
        assert!(!body.contains("Het Hoekje"));
    }

    #[test]
    fn unknown_city_renders_not_found_page() {
        let (client, db) = setup();
        seed(&client, &db);
        let res = client.get("/atlantis").dispatch();
        assert_eq!(res.status(), Status::NotFound);
        assert_eq!(res.content_type(), Some(ContentType::HTML));
        assert!(res
            .into_string()
            .unwrap()
            .contains("Deze stad staat (nog) niet in onze gids."));
    }
}

mod restaurant {
    use super::*;

    #[test]
    fn show_details_and_review_form() {
        let (client, db) = setup();
        seed(&client, &db);
        let res = client.get("/utrecht/pizzeria-roma").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body = res.into_string().unwrap();
        assert!(body.contains("Pizzeria Roma in Utrecht"));
        assert!(body.contains("action=\"/utrecht/pizzeria-roma/reviews\""));
        assert!(body.contains("name=\"guest_email\""));
        assert!(body.contains("href=\"/claimen/utrecht/pizzeria-roma\""));
    }

    #[test]
    fn unknown_restaurant_renders_not_found_page() {
        let (client, db) = setup();
        seed(&client, &db);
        let res = client.get("/utrecht/bestaat-niet").dispatch();
        assert_eq!(res.status(), Status::NotFound);
        assert!(res
            .into_string()
            .unwrap()
            .contains("Dit restaurant konden we niet vinden."));
    }

    #[test]
    fn submit_guest_review() {
        let (client, db) = setup();
        seed(&client, &db);
        let res = client
            .post("/utrecht/pizzeria-roma/reviews")
            .header(ContentType::Form)
            .body(format!(
                "rating=5&content=Heerlijke+pizza&guest_name=Jan&guest_email=jan%40example.com&verification_token={VALID_TOKEN}"
            ))
            .dispatch();
        assert_eq!(res.status(), Status::SeeOther);
        assert_eq!(location(&res), "/utrecht/pizzeria-roma");
        let pending = db
            .shared()
            .unwrap()
            .pending_reviews(&Pagination::default())
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert!(!pending[0].approved);

        let body = client
            .get("/utrecht/pizzeria-roma")
            .dispatch()
            .into_string()
            .unwrap();
        assert!(body.contains("Bedankt voor je review!"));
        // Not visible before approval
        assert!(!body.contains("Heerlijke pizza"));
    }

    #[test]
    fn reject_review_without_valid_verification() {
        let (client, db) = setup();
        seed(&client, &db);
        let res = client
            .post("/utrecht/pizzeria-roma/reviews")
            .header(ContentType::Form)
            .body("rating=4&content=Lekker&guest_name=Jan&guest_email=jan%40example.com&verification_token=bot")
            .dispatch();
        assert_eq!(res.status(), Status::SeeOther);
        assert!(db
            .shared()
            .unwrap()
            .pending_reviews(&Pagination::default())
            .unwrap()
            .is_empty());
        let body = client
            .get("/utrecht/pizzeria-roma")
            .dispatch()
            .into_string()
            .unwrap();
        assert!(body.contains("flash-error"));
    }

    #[test]
    fn anonymous_favorite_redirects_to_sign_in() {
        let (client, db) = setup();
        seed(&client, &db);
        let res = client.post("/utrecht/pizzeria-roma/favorite").dispatch();
        assert_eq!(res.status(), Status::SeeOther);
        assert_eq!(location(&res), "https://login.example.com");
    }

    #[test]
    fn toggle_favorite() {
        let (client, db) = setup();
        let (_, _, roma) = seed(&client, &db);
        set_role(&db, "user-1", "jan@example.com", Role::User);
        let res = client
            .post("/utrecht/pizzeria-roma/favorite")
            .header(bearer("user-1", "jan@example.com"))
            .dispatch();
        assert_eq!(res.status(), Status::SeeOther);
        assert!(db
            .shared()
            .unwrap()
            .is_favorite("user-1", roma.id.as_str())
            .unwrap());
        client
            .post("/utrecht/pizzeria-roma/favorite")
            .header(bearer("user-1", "jan@example.com"))
            .dispatch();
        assert!(!db
            .shared()
            .unwrap()
            .is_favorite("user-1", roma.id.as_str())
            .unwrap());
    }

    #[test]
    fn claim_page_requires_sign_in() {
        let (client, db) = setup();
        seed(&client, &db);
        let body = client
            .get("/claimen/utrecht/pizzeria-roma")
            .dispatch()
            .into_string()
            .unwrap();
        assert!(body.contains("moet je ingelogd zijn"));
        assert!(!body.contains("name=\"business_email\""));
    }

    #[test]
    fn submit_claim() {
        let (client, db) = setup();
        seed(&client, &db);
        set_role(&db, "owner-1", "eigenaar@roma.nl", Role::User);
        let res = client
            .post("/claimen/utrecht/pizzeria-roma")
            .header(bearer("owner-1", "eigenaar@roma.nl"))
            .header(ContentType::Form)
            .body(format!(
                "business_email=info%40roma.nl&phone=030-1234567&verification_token={VALID_TOKEN}"
            ))
            .dispatch();
        assert_eq!(res.status(), Status::SeeOther);
        assert_eq!(location(&res), "/utrecht/pizzeria-roma");
        let claims = db
            .shared()
            .unwrap()
            .claims_by_status(Some(ClaimStatus::Pending), &Pagination::default())
            .unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].business_email.to_string(), "info@roma.nl");
    }
}

#[test]
fn unknown_cuisine_renders_not_found_page() {
    let (client, db) = setup();
    seed(&client, &db);
    let res = client.get("/keukens/marsiaans").dispatch();
    assert_eq!(res.status(), Status::NotFound);
    assert!(res
        .into_string()
        .unwrap()
        .contains("Deze keuken kennen we niet."));
    let res = client.get("/keukens/italiaans").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert!(res.into_string().unwrap().contains("Pizzeria Roma"));
}

#[test]
fn best_restaurants_need_enough_reviews() {
    let (client, db) = setup();
    let (city, _, _) = seed(&client, &db);
    create_restaurant(
        &db,
        &city,
        Restaurant::build()
            .name("Nieuw Talent")
            .slug("nieuw-talent")
            .rating(5.0, 2)
            .finish(),
        &[],
    );
    let body = client
        .get("/beste-restaurants")
        .dispatch()
        .into_string()
        .unwrap();
    assert!(body.contains("Pizzeria Roma"));
    assert!(!body.contains("Nieuw Talent"));
}

mod nearby {
    use super::*;

    #[test]
    fn without_origin_the_browser_is_asked() {
        let (client, db) = setup();
        seed(&client, &db);
        let body = client.get("/in-de-buurt").dispatch().into_string().unwrap();
        assert!(body.contains("id=\"geolocation-status\""));
        assert!(body.contains("id=\"geolocation-retry\""));
        assert!(body.contains("timeout:10000"));
        assert!(body.contains("maximumAge:60000"));
        assert!(body.contains("src=\"/nearby.js\""));
    }

    #[test]
    fn with_origin_restaurants_are_ranked_by_distance() {
        let (client, db) = setup();
        seed(&client, &db);
        let res = client.get("/in-de-buurt?lat=52.09&lng=5.12").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body = res.into_string().unwrap();
        assert!(body.contains("Pizzeria Roma"));
        // Restaurants without a position have no distance
        assert!(!body.contains("Het Hoekje"));
    }
}

mod admin {
    use super::*;

    fn admin(db: &sqlite::Connections) -> Header<'static> {
        set_role(db, ADMIN_ID, ADMIN_EMAIL, Role::Admin);
        bearer(ADMIN_ID, ADMIN_EMAIL)
    }

    #[test]
    fn anonymous_visitors_are_redirected_home() {
        let (client, _) = setup();
        for path in [
            "/admin",
            "/admin/reviews",
            "/admin/claims",
            "/admin/photos",
            "/admin/import",
        ] {
            let res = client.get(path).dispatch();
            assert_eq!(res.status(), Status::SeeOther, "{path}");
            assert_eq!(location(&res), "/");
        }
    }

    #[test]
    fn regular_users_are_redirected_home() {
        let (client, db) = setup();
        set_role(&db, "user-1", "jan@example.com", Role::User);
        let res = client
            .get("/admin")
            .header(bearer("user-1", "jan@example.com"))
            .dispatch();
        assert_eq!(res.status(), Status::SeeOther);
        assert_eq!(location(&res), "/");
    }

    #[test]
    fn admins_see_every_page() {
        let (client, db) = setup();
        let auth = admin(&db);
        for path in [
            "/admin",
            "/admin/reviews",
            "/admin/claims",
            "/admin/claims?status=rejected",
            "/admin/photos",
            "/admin/import",
        ] {
            let res = client.get(path).header(auth.clone()).dispatch();
            assert_eq!(res.status(), Status::Ok, "{path}");
        }
    }

    #[test]
    fn approve_pending_review() {
        let (client, db) = setup();
        seed(&client, &db);
        client
            .post("/utrecht/pizzeria-roma/reviews")
            .header(ContentType::Form)
            .body(format!(
                "rating=2&content=Te+zout&guest_name=Piet&guest_email=piet%40example.com&verification_token={VALID_TOKEN}"
            ))
            .dispatch();
        let auth = admin(&db);
        let body = client
            .get("/admin/reviews")
            .header(auth.clone())
            .dispatch()
            .into_string()
            .unwrap();
        assert!(body.contains("Te zout"));
        let review_id = db
            .shared()
            .unwrap()
            .pending_reviews(&Pagination::default())
            .unwrap()[0]
            .id
            .clone();
        let res = client
            .post(format!("/admin/reviews/{review_id}/approve"))
            .header(auth)
            .dispatch();
        assert_eq!(res.status(), Status::SeeOther);
        assert_eq!(location(&res), "/admin/reviews");
        let body = client
            .get("/utrecht/pizzeria-roma")
            .dispatch()
            .into_string()
            .unwrap();
        assert!(body.contains("Te zout"));
    }

    #[test]
    fn import_page_offers_start_when_idle() {
        let (client, db) = setup();
        let body = client
            .get("/admin/import")
            .header(admin(&db))
            .dispatch()
            .into_string()
            .unwrap();
        assert!(body.contains("Er is nog nooit een import gestart."));
        assert!(body.contains("action=\"/admin/import\""));
        assert!(body.contains("data-poll-interval=\"3000\""));
    }
}
