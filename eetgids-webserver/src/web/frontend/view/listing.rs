use maud::{html, Markup};
use rocket::http::RawStr;

use super::*;
use crate::{core::usecases::*, web::api::restaurants::ListingQuery};

pub const GEOLOCATION_TIMEOUT_MS: u32 = 10_000;
pub const GEOLOCATION_MAX_AGE_MS: u32 = 60_000;

const NEARBY_JS_URL: &str = "/nearby.js";

const MIN_RATING_CHOICES: [f64; 3] = [3.0, 4.0, 4.5];

pub fn index(
    viewer: &Viewer,
    provinces: &[Province],
    cuisines: &[CuisineType],
    top_rated: &[RestaurantWithRelations],
    banners: &[AdPlacement],
) -> Markup {
    page(
        "Restaurants in Nederland",
        viewer,
        None,
        html! {
            main class="home" {
                h1 { "Ontdek de beste restaurants van Nederland" }
                (ad_banner(banners))
                section class="top-rated" {
                    h2 { "Best beoordeeld" }
                    (restaurant_list(top_rated))
                    p { a href="/beste-restaurants" { "Alle toppers bekijken" } }
                }
                section class="provinces" {
                    h2 { "Steden per provincie" }
                    @for province in provinces {
                        div class="province" {
                            h3 { (province.name) }
                            ul {
                                @for city in &province.cities {
                                    li { a href=(format!("/{}", city.slug)) { (city.name) } }
                                }
                            }
                        }
                    }
                }
                @if !cuisines.is_empty() {
                    section class="cuisines" {
                        h2 { "Keukens" }
                        (cuisine_tags(cuisines))
                    }
                }
            }
        },
    )
}

pub struct CityListing<'a> {
    pub city: &'a City,
    pub cuisines: &'a [CuisineType],
    pub query: &'a ListingQuery,
    pub listing: &'a RestaurantPage,
    pub stats: &'a ListingStats,
    pub ads: &'a [AdPlacement],
}

fn query_param(name: &str, value: impl ToString) -> String {
    let value = value.to_string();
    format!("{name}={}", RawStr::new(&value).percent_encode())
}

/// The link to another page of the same filtered listing.
fn listing_href(base: &str, query: &ListingQuery, page: u64) -> String {
    let ListingQuery {
        cuisine,
        min_rating,
        min_reviews,
        price,
        search,
        sort_by,
        sort_order,
        limit,
        ..
    } = query;
    let params: Vec<_> = [
        cuisine.as_ref().map(|v| query_param("cuisine", v)),
        min_rating.map(|v| query_param("min_rating", v)),
        min_reviews.map(|v| query_param("min_reviews", v)),
        price.as_ref().map(|v| query_param("price", v)),
        search.as_ref().map(|v| query_param("search", v)),
        sort_by.as_ref().map(|v| query_param("sort_by", v)),
        sort_order.as_ref().map(|v| query_param("sort_order", v)),
        limit.map(|v| query_param("limit", v)),
        Some(query_param("page", page)),
    ]
    .into_iter()
    .flatten()
    .filter(|p| !p.ends_with('='))
    .collect();
    format!("{base}?{}", params.join("&"))
}

fn filter_form(city: &City, cuisines: &[CuisineType], query: &ListingQuery) -> Markup {
    let selected = |current: &Option<String>, value: &str| current.as_deref() == Some(value);
    html! {
        form class="filter" action=(format!("/{}", city.slug)) method="GET" {
            input type="search" name="search" placeholder="Zoek op naam"
                value=(query.search.as_deref().unwrap_or_default());
            select name="cuisine" {
                option value="" { "Alle keukens" }
                @for c in cuisines {
                    option value=(c.slug) selected[selected(&query.cuisine, c.slug.as_str())] { (c.name) }
                }
            }
            select name="price" {
                option value="" { "Alle prijzen" }
                @for p in PriceRange::ALL {
                    option value=(p.symbol()) selected[selected(&query.price, p.symbol())] {
                        (p.symbol()) " " (p.label())
                    }
                }
            }
            select name="min_rating" {
                option value="" { "Elke beoordeling" }
                @for r in MIN_RATING_CHOICES {
                    option value=(r) selected[query.min_rating == Some(r)] {
                        (decimal(r)) "+"
                    }
                }
            }
            select name="sort_by" {
                option value="rating" selected[selected(&query.sort_by, "rating")] { "Beoordeling" }
                option value="reviews" selected[selected(&query.sort_by, "reviews")] { "Aantal reviews" }
                option value="name" selected[selected(&query.sort_by, "name")] { "Naam" }
            }
            input class="btn" type="submit" value="Filteren";
        }
    }
}

fn stats_sidebar(city: &City, stats: &ListingStats) -> Markup {
    html! {
        aside class="stats" {
            h2 { "In " (city.name) }
            p { (stats.restaurant_count) " restaurants in deze selectie" }
            @if let Some(avg) = stats.average_rating {
                p { "Gemiddelde beoordeling: ★ " (decimal(avg)) }
            }
            @if !stats.top_cuisines.is_empty() {
                h3 { "Populaire keukens" }
                ol {
                    @for c in &stats.top_cuisines {
                        li { a href=(format!("/keukens/{}", c.slug)) { (c.name) } " (" (c.count) ")" }
                    }
                }
            }
            h3 { "Prijsniveau" }
            ul class="price-distribution" {
                @for share in &stats.price_distribution {
                    li {
                        span class="price" { (share.price_range.symbol()) }
                        " " (decimal(share.percentage)) "%"
                    }
                }
            }
        }
    }
}

fn most_common_price(stats: &ListingStats) -> Option<PriceRange> {
    stats
        .price_distribution
        .iter()
        .filter(|share| share.count > 0)
        .max_by_key(|share| share.count)
        .map(|share| share.price_range)
}

fn city_faq(city: &City, total: u64, stats: &ListingStats) -> Markup {
    let name = &city.name;
    html! {
        section class="faq" {
            h2 { "Veelgestelde vragen over uit eten in " (name) }
            h3 { "Hoeveel restaurants zijn er in " (name) "?" }
            p { "Eetgids kent " (total) " restaurants in " (name) "." }
            @if let Some(avg) = stats.average_rating {
                h3 { "Hoe worden de restaurants in " (name) " beoordeeld?" }
                p {
                    "Gemiddeld geven gasten de restaurants in " (name)
                    " een " (decimal(avg)) " uit 5."
                }
            }
            @if !stats.top_cuisines.is_empty() {
                h3 { "Welke keukens zijn populair in " (name) "?" }
                p {
                    "Het meest vertegenwoordigd zijn: "
                    (stats.top_cuisines.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(", "))
                    "."
                }
            }
            @if let Some(price) = most_common_price(stats) {
                h3 { "Wat kost uit eten in " (name) "?" }
                p {
                    "De meeste restaurants vallen in de prijsklasse "
                    (price.symbol()) " (" (price.label()) ")."
                }
            }
        }
    }
}

pub fn city(viewer: &Viewer, listing: CityListing) -> Markup {
    let CityListing {
        city,
        cuisines,
        query,
        listing,
        stats,
        ads,
    } = listing;
    let base = format!("/{}", city.slug);
    page(
        &format!("Restaurants in {}", city.name),
        viewer,
        None,
        html! {
            main class="city" {
                h1 { "Restaurants in " (city.name) }
                @if let Some(description) = &city.description {
                    p class="intro" { (description) }
                }
                (filter_form(city, cuisines, query))
                div class="columns" {
                    div class="listing" {
                        p class="count" { (listing.total) " restaurants gevonden" }
                        (restaurant_list(&listing.restaurants))
                        (pagination(listing.page, listing.page_count(), |p| listing_href(&base, query, p)))
                    }
                    div class="sidebar" {
                        (stats_sidebar(city, stats))
                        (ad_banner(ads))
                    }
                }
                (city_faq(city, listing.total, stats))
            }
        },
    )
}

pub fn cuisine(
    viewer: &Viewer,
    cuisine: &CuisineType,
    cities: &[City],
    listing: &RestaurantPage,
) -> Markup {
    let base = format!("/keukens/{}", cuisine.slug);
    page(
        &format!("{} restaurants", cuisine.name),
        viewer,
        None,
        html! {
            main class="cuisine" {
                h1 {
                    @if let Some(icon) = &cuisine.icon {
                        (icon) " "
                    }
                    (cuisine.name) " restaurants"
                }
                p class="count" { (listing.total) " restaurants gevonden" }
                (restaurant_list(&listing.restaurants))
                (pagination(listing.page, listing.page_count(), |p| format!("{base}?page={p}")))
                @if !cities.is_empty() {
                    section class="cities" {
                        h2 { "Zoek per stad" }
                        ul {
                            @for city in cities {
                                li {
                                    a href=(format!("/{}?cuisine={}", city.slug, cuisine.slug)) {
                                        (cuisine.name) " in " (city.name)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn best_restaurants(viewer: &Viewer, listing: &RestaurantPage, min_reviews: u32) -> Markup {
    page(
        "De beste restaurants",
        viewer,
        None,
        html! {
            main class="best" {
                h1 { "De beste restaurants van Nederland" }
                p class="intro" {
                    "Gerangschikt op beoordeling, met minstens "
                    (min_reviews) " goedgekeurde reviews."
                }
                (restaurant_list(&listing.restaurants))
                (pagination(listing.page, listing.page_count(), |p| format!("/beste-restaurants?page={p}")))
            }
        },
    )
}

fn distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round())
    } else {
        format!("{} km", decimal(km))
    }
}

fn geolocation_script() -> Markup {
    html! {
        (inline_script(format!(
            "window.EETGIDS_GEOLOCATION={{timeout:{GEOLOCATION_TIMEOUT_MS},maximumAge:{GEOLOCATION_MAX_AGE_MS}}};"
        )))
        script src=(NEARBY_JS_URL) {}
    }
}

pub fn nearby(viewer: &Viewer, origin: Option<(f64, f64)>, nearby: &[NearbyRestaurant]) -> Markup {
    page(
        "Restaurants in de buurt",
        viewer,
        None,
        html! {
            main class="nearby" {
                h1 { "Restaurants in de buurt" }
                div id="geolocation" {
                    p id="geolocation-status" {
                        @if origin.is_none() {
                            "We bepalen je locatie…"
                        }
                    }
                    button id="geolocation-retry" class="btn" type="button" hidden[origin.is_none()] {
                        @if origin.is_some() {
                            "Locatie opnieuw bepalen"
                        } @else {
                            "Opnieuw proberen"
                        }
                    }
                }
                @if origin.is_some() {
                    @if nearby.is_empty() {
                        p class="empty" { "Er zijn geen restaurants met een bekende locatie." }
                    } @else {
                        ol class="restaurant-list nearby-list" {
                            @for n in nearby {
                                li {
                                    (restaurant_card(&n.restaurant))
                                    span class="distance" { (distance(n.distance.to_km())) }
                                }
                            }
                        }
                    }
                }
                (geolocation_script())
            }
        },
    )
}
