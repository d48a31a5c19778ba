use maud::{html, Markup, PreEscaped};
use rocket::request::FlashMessage;

use crate::{core::prelude::*, web::api::ApiError};
use eetgids_core::usecases::Error as ParameterError;

mod admin;
mod listing;
mod page;
mod restaurant;

pub use admin::*;
pub use listing::*;
use page::*;
pub use restaurant::*;

const HUMAN_VERIFICATION_JS_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/api.js";

/// Sent in place of a widget response if no site key is configured.
const UNVERIFIED_TOKEN: &str = "unverified";

/// The visitor a page is rendered for.
#[derive(Default)]
pub struct Viewer<'a> {
    pub user: Option<User>,
    pub sign_in_url: Option<&'a str>,
}

impl Viewer<'_> {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Admin)
    }
}

pub fn not_found(viewer: &Viewer, message: &str) -> Markup {
    page(
        "Niet gevonden",
        viewer,
        None,
        html! {
            main class="error-page" {
                h1 { "Niet gevonden" }
                p { (message) }
                p { a href="/" { "Terug naar de startpagina" } }
            }
        },
    )
}

pub fn bad_request(viewer: &Viewer, message: &str) -> Markup {
    page(
        "Ongeldige aanvraag",
        viewer,
        None,
        html! {
            main class="error-page" {
                h1 { "Ongeldige aanvraag" }
                p { (message) }
                p { a href="/" { "Terug naar de startpagina" } }
            }
        },
    )
}

/// A message for the visitor who submitted a form.
pub fn error_message(err: &ApiError) -> String {
    let parameter_error = match err {
        ApiError::App(err) => match err.business() {
            Some(BError::Parameter(err)) => Some(err),
            _ => None,
        },
        _ => None,
    };
    let message = match parameter_error {
        Some(ParameterError::EmptyContent) => "Schrijf eerst je review.",
        Some(ParameterError::GuestName) => "Vul je naam in.",
        Some(ParameterError::Email) => "Vul een geldig e-mailadres in.",
        Some(ParameterError::RatingValue) => "Kies een beoordeling van 1 tot 5 sterren.",
        Some(ParameterError::MissingVerificationToken | ParameterError::HumanVerification) => {
            "We konden niet controleren of je een mens bent. Probeer het opnieuw."
        }
        Some(ParameterError::AlreadyClaimed) => "Je hebt dit restaurant al geclaimd.",
        Some(ParameterError::ClaimNotPending) => "Deze claim is al beoordeeld.",
        _ => match err.status().code {
            401 => "Log eerst in om verder te gaan.",
            403 => "Dat is helaas niet toegestaan.",
            404 => "Dat konden we niet vinden.",
            _ => return err.to_string(),
        },
    };
    message.to_owned()
}

fn decimal(value: f64) -> String {
    format!("{value:.1}").replace('.', ",")
}

fn restaurant_href(r: &RestaurantWithRelations) -> Option<String> {
    r.city_slug()
        .map(|city| format!("/{}/{}", city, r.restaurant.slug))
}

fn rating_badge(rating: Option<AvgRating>, review_count: u32) -> Markup {
    html! {
        span class="rating" {
            @if let Some(rating) = rating {
                "★ " (decimal(rating.into()))
            } @else {
                "Nog geen beoordeling"
            }
            " "
            span class="review-count" {
                @match review_count {
                    1 => "(1 review)",
                    n => (format!("({n} reviews)")),
                }
            }
        }
    }
}

fn price_badge(price_range: Option<PriceRange>) -> Markup {
    html! {
        @if let Some(price) = price_range {
            span class="price" title=(price.label()) { (price.symbol()) }
        }
    }
}

fn cuisine_tags(cuisines: &[CuisineType]) -> Markup {
    html! {
        @if !cuisines.is_empty() {
            ul class="cuisine-tags" {
                @for c in cuisines {
                    li { a href=(format!("/keukens/{}", c.slug)) { (c.name) } }
                }
            }
        }
    }
}

fn address(addr: &Address) -> Markup {
    html! {
        @if let Some(ref s) = addr.street {
            (s) br;
        }
        @if let Some(ref z) = addr.postal_code {
            (z) " "
        }
        @if let Some(ref c) = addr.city {
            (c)
        }
    }
}

fn restaurant_card(r: &RestaurantWithRelations) -> Markup {
    let restaurant = &r.restaurant;
    html! {
        article class="restaurant-card" {
            h3 {
                @if let Some(href) = restaurant_href(r) {
                    a href=(href) { (restaurant.name) }
                } @else {
                    (restaurant.name)
                }
                @if restaurant.verified {
                    " "
                    span class="verified" title="Geverifieerd" { "✔" }
                }
            }
            p class="meta" {
                (rating_badge(restaurant.rating, restaurant.review_count))
                " "
                (price_badge(restaurant.price_range))
                @if let Some(city) = &r.city {
                    " · " (city.name)
                }
            }
            (cuisine_tags(&r.cuisines))
        }
    }
}

fn restaurant_list(restaurants: &[RestaurantWithRelations]) -> Markup {
    html! {
        @if restaurants.is_empty() {
            p class="empty" { "Er zijn geen restaurants gevonden." }
        } @else {
            div class="restaurant-list" {
                @for r in restaurants {
                    (restaurant_card(r))
                }
            }
        }
    }
}

fn flash_message(flash: Option<FlashMessage>) -> Markup {
    html! {
        @if let Some(msg) = flash {
            div class=(format!("flash flash-{}", msg.kind())) { (msg.message()) }
        }
    }
}

fn human_verification(site_key: Option<&str>) -> Markup {
    html! {
        @if let Some(key) = site_key {
            div class="cf-turnstile" data-sitekey=(key) data-response-field-name="verification_token" {}
            script src=(HUMAN_VERIFICATION_JS_URL) async defer {}
        } @else {
            input type="hidden" name="verification_token" value=(UNVERIFIED_TOKEN);
        }
    }
}

fn ad_banner(ads: &[AdPlacement]) -> Markup {
    html! {
        @for ad in ads {
            a class="ad" href=(ad.target_url) rel="sponsored noopener" target="_blank" {
                img src=(ad.image_url) alt=(ad.name);
            }
        }
    }
}

fn pagination(current: u64, page_count: u64, href: impl Fn(u64) -> String) -> Markup {
    html! {
        @if page_count > 1 {
            nav class="pagination" {
                @if current > 1 {
                    a href=(href(current - 1)) rel="prev" { "« Vorige" }
                }
                span { (format!("Pagina {current} van {page_count}")) }
                @if current < page_count {
                    a href=(href(current + 1)) rel="next" { "Volgende »" }
                }
            }
        }
    }
}

/// Inline scripts only carry numbers and static markup.
fn inline_script(js: String) -> Markup {
    html! {
        script { (PreEscaped(js)) }
    }
}
