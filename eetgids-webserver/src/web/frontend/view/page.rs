use maud::{html, Markup, DOCTYPE};
use rocket::request::FlashMessage;

use super::{flash_message, Viewer};

const MAIN_CSS_URL: &str = "/main.css";

pub fn page(title: &str, viewer: &Viewer, flash: Option<FlashMessage>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="nl" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Eetgids" }
                link rel="stylesheet" href=(MAIN_CSS_URL);
            }
            body {
                (header(viewer))
                (flash_message(flash))
                (content)
                footer {
                    p { "Eetgids · de restaurantgids van Nederland" }
                }
            }
        }
    }
}

fn header(viewer: &Viewer) -> Markup {
    html! {
        header {
            nav class="main-nav" {
                a class="brand" href="/" { "Eetgids" }
                a href="/beste-restaurants" { "Beste restaurants" }
                a href="/in-de-buurt" { "In de buurt" }
                @if viewer.is_admin() {
                    a href="/admin" { "Beheer" }
                }
                @if !viewer.is_signed_in() {
                    @if let Some(url) = viewer.sign_in_url {
                        a class="sign-in" href=(url) { "Inloggen" }
                    }
                }
            }
        }
    }
}
