use maud::{html, Markup};
use rocket::request::FlashMessage;

use super::*;

const ADMIN_JS_URL: &str = "/admin.js";

/// The admin page polls the import status this often.
pub const IMPORT_POLL_INTERVAL_MS: u32 = 3_000;

pub struct Dashboard {
    pub restaurant_count: u64,
    pub pending_reviews: usize,
    pub pending_claims: usize,
    pub pending_photos: usize,
    pub import_job: Option<ImportJob>,
    /// Pending items are counted up to this limit.
    pub page_limit: u64,
}

fn admin_nav() -> Markup {
    html! {
        nav class="admin-nav" {
            a href="/admin" { "Overzicht" }
            a href="/admin/reviews" { "Reviews" }
            a href="/admin/claims" { "Claims" }
            a href="/admin/photos" { "Foto's" }
            a href="/admin/import" { "Import" }
        }
    }
}

fn admin_page(title: &str, viewer: &Viewer, flash: Option<FlashMessage>, content: Markup) -> Markup {
    page(
        title,
        viewer,
        flash,
        html! {
            main class="admin" {
                (admin_nav())
                h1 { (title) }
                (content)
            }
            script src=(ADMIN_JS_URL) {}
        },
    )
}

fn action_button(action: String, label: &str) -> Markup {
    html! {
        form class="inline" action=(action) method="POST" {
            input class="btn" type="submit" value=(label);
        }
    }
}

fn restaurant_link(r: &RestaurantWithRelations) -> Markup {
    html! {
        @if let Some(href) = restaurant_href(r) {
            a href=(href) { (r.restaurant.name) }
        } @else {
            (r.restaurant.name)
        }
    }
}

fn count(count: usize, limit: u64) -> String {
    if count as u64 >= limit {
        format!("{count}+")
    } else {
        count.to_string()
    }
}

pub fn admin_dashboard(viewer: &Viewer, dashboard: &Dashboard) -> Markup {
    let limit = dashboard.page_limit;
    admin_page(
        "Beheer",
        viewer,
        None,
        html! {
            ul class="dashboard" {
                li { (dashboard.restaurant_count) " restaurants" }
                li { a href="/admin/reviews" { (count(dashboard.pending_reviews, limit)) " reviews wachten op controle" } }
                li { a href="/admin/claims" { (count(dashboard.pending_claims, limit)) " open claims" } }
                li { a href="/admin/photos" { (count(dashboard.pending_photos, limit)) " foto's wachten op controle" } }
                li {
                    a href="/admin/import" {
                        "Import: "
                        @if let Some(job) = &dashboard.import_job {
                            (job.status.as_str())
                        } @else {
                            "nog nooit gestart"
                        }
                    }
                }
            }
            p { a href="/api/export/restaurants.csv" { "Alle restaurants exporteren (CSV)" } }
        },
    )
}

pub fn admin_reviews(
    viewer: &Viewer,
    flash: Option<FlashMessage>,
    reviews: &[(Review, RestaurantWithRelations)],
) -> Markup {
    admin_page(
        "Reviews controleren",
        viewer,
        flash,
        html! {
            @if reviews.is_empty() {
                p class="empty" { "Er wachten geen reviews op controle." }
            }
            @for (review, restaurant) in reviews {
                article class="pending-review" {
                    h3 { (restaurant_link(restaurant)) " · " ("★".repeat(review.rating.to_u8().into())) }
                    @if let Some(title) = &review.title {
                        h4 { (title) }
                    }
                    p { (review.content) }
                    p class="review-meta" {
                        @match &review.author {
                            Author::Guest { name, email } => {
                                (name) " <" (email) ">"
                            }
                            Author::User(id) => {
                                "Gebruiker " (id)
                            }
                        }
                        " · " (review.created_at)
                    }
                    (action_button(format!("/admin/reviews/{}/approve", review.id), "Goedkeuren"))
                    (action_button(format!("/admin/reviews/{}/reject", review.id), "Verwijderen"))
                }
            }
        },
    )
}

pub fn admin_claims(
    viewer: &Viewer,
    flash: Option<FlashMessage>,
    status: ClaimStatus,
    claims: &[(RestaurantClaim, RestaurantWithRelations)],
) -> Markup {
    admin_page(
        "Claims",
        viewer,
        flash,
        html! {
            nav class="tabs" {
                @for s in [ClaimStatus::Pending, ClaimStatus::Approved, ClaimStatus::Rejected] {
                    a href=(format!("/admin/claims?status={}", s.as_str())) class=[(s == status).then_some("active")] {
                        (s.as_str())
                    }
                }
            }
            @if claims.is_empty() {
                p class="empty" { "Geen claims met deze status." }
            }
            @for (claim, restaurant) in claims {
                article class="claim" {
                    h3 { (restaurant_link(restaurant)) }
                    p { "Zakelijk e-mailadres: " (claim.business_email) }
                    @if let Some(phone) = &claim.phone {
                        p { "Telefoon: " (phone) }
                    }
                    @if let Some(message) = &claim.message {
                        p class="message" { (message) }
                    }
                    p class="claim-meta" { "Ingediend op " (claim.created_at) }
                    @if let Some(reason) = &claim.rejection_reason {
                        p { "Reden van afwijzing: " (reason) }
                    }
                    @if claim.status.is_pending() {
                        (action_button(format!("/admin/claims/{}/approve", claim.id), "Goedkeuren"))
                        form class="inline" action=(format!("/admin/claims/{}/reject", claim.id)) method="POST" {
                            input type="text" name="reason" placeholder="Reden (optioneel)";
                            input class="btn" type="submit" value="Afwijzen";
                        }
                    }
                }
            }
        },
    )
}

pub fn admin_photos(
    viewer: &Viewer,
    flash: Option<FlashMessage>,
    photos: &[(RestaurantPhoto, RestaurantWithRelations)],
    batch_size: u64,
) -> Markup {
    admin_page(
        "Foto's",
        viewer,
        flash,
        html! {
            section id="photo-refresh" data-batch-size=(batch_size) {
                h2 { "Foto's ophalen" }
                p { "Haalt voor alle restaurants foto's op bij de fotobron, in porties van " (batch_size) "." }
                button id="photo-refresh-start" class="btn" type="button" { "Start" }
                button id="photo-refresh-stop" class="btn" type="button" hidden { "Stoppen" }
                p id="photo-refresh-status" {}
                ul id="photo-refresh-errors" {}
            }
            section {
                h2 { "Ingezonden foto's" }
                @if photos.is_empty() {
                    p class="empty" { "Er wachten geen foto's op controle." }
                }
                div class="gallery" {
                    @for (photo, restaurant) in photos {
                        figure class="pending-photo" {
                            img src=(photo.url) alt=(photo.caption.as_deref().unwrap_or_default()) loading="lazy";
                            figcaption {
                                (restaurant_link(restaurant))
                                @if let Some(caption) = &photo.caption {
                                    br; (caption)
                                }
                            }
                            (action_button(format!("/admin/photos/{}/approve", photo.id), "Goedkeuren"))
                            (action_button(format!("/admin/photos/{}/primary", photo.id), "Hoofdfoto"))
                            (action_button(format!("/admin/photos/{}/reject", photo.id), "Verwijderen"))
                        }
                    }
                }
            }
        },
    )
}

fn import_job_status(job: &ImportJob) -> Markup {
    let counters = &job.counters;
    html! {
        dl {
            dt { "Status" } dd data-field="status" { (job.status.as_str()) }
            dt { "Steden verwerkt" } dd data-field="processed_cities" { (counters.processed_cities) }
            dt { "Restaurants geïmporteerd" } dd data-field="imported_restaurants" { (counters.imported_restaurants) }
            dt { "Reviews geïmporteerd" } dd data-field="imported_reviews" { (counters.imported_reviews) }
            dt { "Restaurants overgeslagen" } dd data-field="skipped_restaurants" { (counters.skipped_restaurants) }
            dt { "Laatste stad" } dd data-field="last_city" { (job.last_city.as_deref().unwrap_or("-")) }
        }
        @if !job.errors.is_empty() {
            h3 { "Fouten" }
            ul class="errors" {
                @for err in &job.errors {
                    li { (err) }
                }
            }
        }
    }
}

pub fn admin_import(viewer: &Viewer, flash: Option<FlashMessage>, job: Option<&ImportJob>) -> Markup {
    let active = job.is_some_and(|job| job.status.is_active());
    admin_page(
        "Import",
        viewer,
        flash,
        html! {
            section
                id="import-job"
                data-active=(active)
                data-poll-interval=(IMPORT_POLL_INTERVAL_MS)
            {
                @if let Some(job) = job {
                    (import_job_status(job))
                } @else {
                    p { "Er is nog nooit een import gestart." }
                }
                @if active {
                    button id="import-stop-watching" class="btn" type="button" { "Stop met volgen" }
                }
            }
            @if !active {
                form action="/admin/import" method="POST" {
                    input class="btn" type="submit" value="Import starten";
                }
            }
        },
    )
}
