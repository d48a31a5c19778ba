use maud::{html, Markup};
use rocket::request::FlashMessage;

use super::*;
use crate::core::usecases::RestaurantDetails;

fn review_item(review: &Review) -> Markup {
    html! {
        li class="review" {
            p class="stars" { ("★".repeat(review.rating.to_u8().into())) }
            @if let Some(title) = &review.title {
                h4 { (title) }
            }
            p { (review.content) }
            p class="review-meta" {
                @match &review.author {
                    Author::Guest { name, .. } => (name),
                    Author::User(_) => "Eetgids-gebruiker",
                }
                @if review.verified {
                    " · geverifieerd"
                }
            }
        }
    }
}

fn review_form(viewer: &Viewer, r: &RestaurantWithRelations, site_key: Option<&str>) -> Markup {
    let action = format!("{}/reviews", restaurant_href(r).unwrap_or_default());
    html! {
        form class="review-form" action=(action) method="POST" {
            h3 { "Schrijf een review" }
            label {
                "Beoordeling"
                select name="rating" required {
                    @for stars in (1..=5).rev() {
                        option value=(stars) { ("★".repeat(stars)) }
                    }
                }
            }
            label { "Titel" input type="text" name="title" maxlength="120"; }
            label { "Je ervaring" textarea name="content" required rows="5" {} }
            @if !viewer.is_signed_in() {
                label { "Naam" input type="text" name="guest_name" required; }
                label { "E-mail (wordt niet gepubliceerd)" input type="email" name="guest_email" required; }
            }
            (human_verification(site_key))
            input class="btn" type="submit" value="Review plaatsen";
        }
    }
}

pub fn restaurant(
    viewer: &Viewer,
    flash: Option<FlashMessage>,
    details: &RestaurantDetails,
    is_favorite: bool,
    site_key: Option<&str>,
) -> Markup {
    let r = &details.restaurant;
    let restaurant = &r.restaurant;
    let href = restaurant_href(r).unwrap_or_default();
    let title = match &r.city {
        Some(city) => format!("{} in {}", restaurant.name, city.name),
        None => restaurant.name.clone(),
    };
    page(
        &title,
        viewer,
        flash,
        html! {
            main class="restaurant" {
                @if let Some(photo) = details.photos.first() {
                    figure class="hero" {
                        img src=(photo.url) alt=(photo.caption.as_deref().unwrap_or(&restaurant.name));
                    }
                }
                h1 {
                    (restaurant.name)
                    @if restaurant.verified {
                        " "
                        span class="verified" title="Geverifieerd" { "✔" }
                    }
                }
                p class="meta" {
                    (rating_badge(restaurant.rating, restaurant.review_count))
                    " "
                    (price_badge(restaurant.price_range))
                }
                (cuisine_tags(&r.cuisines))
                @if let Some(description) = &restaurant.description {
                    p class="description" { (description) }
                }
                div class="columns" {
                    section class="details" {
                        h2 { "Adres & contact" }
                        p { (address(&restaurant.address)) }
                        @if let Some(phone) = &restaurant.contact.phone {
                            p { "Telefoon: " a href=(format!("tel:{phone}")) { (phone) } }
                        }
                        @if let Some(website) = &restaurant.contact.website {
                            p { a href=(website) rel="noopener" target="_blank" { "Website" } }
                        }
                        @if !restaurant.specialties.is_empty() {
                            h3 { "Specialiteiten" }
                            ul { @for s in &restaurant.specialties { li { (s) } } }
                        }
                        @if !restaurant.features.is_empty() {
                            h3 { "Faciliteiten" }
                            ul { @for f in &restaurant.features { li { (f) } } }
                        }
                    }
                    aside class="actions" {
                        @if viewer.is_signed_in() {
                            form action=(format!("{href}/favorite")) method="POST" {
                                @if is_favorite {
                                    input class="btn" type="submit" value="♥ Verwijderen uit favorieten";
                                } @else {
                                    input class="btn" type="submit" value="♡ Bewaren als favoriet";
                                }
                            }
                        } @else if let Some(url) = viewer.sign_in_url {
                            p { a href=(url) { "Log in" } " om dit restaurant te bewaren." }
                        }
                        @if !restaurant.claimed {
                            @if let Some(city) = r.city_slug() {
                                p {
                                    "Is dit jouw restaurant? "
                                    a href=(format!("/claimen/{}/{}", city, restaurant.slug)) { "Claim deze vermelding" }
                                }
                            }
                        }
                    }
                }
                @if details.photos.len() > 1 {
                    section class="photos" {
                        h2 { "Foto's" }
                        div class="gallery" {
                            @for photo in details.photos.iter().skip(1) {
                                img src=(photo.url) alt=(photo.caption.as_deref().unwrap_or_default()) loading="lazy";
                            }
                        }
                    }
                }
                section class="reviews" {
                    h2 { "Reviews" }
                    @if details.reviews.is_empty() {
                        p class="empty" { "Er zijn nog geen reviews. Schrijf de eerste!" }
                    } @else {
                        ul { @for review in &details.reviews { (review_item(review)) } }
                    }
                    (review_form(viewer, r, site_key))
                }
            }
        },
    )
}

pub fn claim(
    viewer: &Viewer,
    flash: Option<FlashMessage>,
    r: &RestaurantWithRelations,
    site_key: Option<&str>,
) -> Markup {
    let restaurant = &r.restaurant;
    let href = restaurant_href(r).unwrap_or_default();
    page(
        &format!("{} claimen", restaurant.name),
        viewer,
        flash,
        html! {
            main class="claim" {
                h1 { (restaurant.name) " claimen" }
                p { a href=(href) { "← Terug naar het restaurant" } }
                @if restaurant.claimed {
                    p class="notice" { "Deze vermelding is al geclaimd door de eigenaar." }
                } @else if !viewer.is_signed_in() {
                    p {
                        "Om een restaurant te claimen moet je ingelogd zijn. "
                        @if let Some(url) = viewer.sign_in_url {
                            a href=(url) { "Inloggen" }
                        }
                    }
                } @else {
                    p {
                        "Na controle van je gegevens word je eigenaar van deze vermelding "
                        "en kun je de informatie zelf bijwerken."
                    }
                    form class="claim-form" action=(format!("/claimen{href}")) method="POST" {
                        label { "Zakelijk e-mailadres" input type="email" name="business_email" required; }
                        label { "Telefoonnummer" input type="tel" name="phone"; }
                        label { "Toelichting" textarea name="message" rows="4" {} }
                        (human_verification(site_key))
                        input class="btn" type="submit" value="Claim versturen";
                    }
                }
            }
        },
    )
}
