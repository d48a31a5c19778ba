use askama::Template;
use eetgids_core::{entities::*, gateways::notify::ContactMessage};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

const DATE_TIME_FORMAT: &[FormatItem] =
    format_description!("[day]-[month]-[year] [hour]:[minute]");

pub type Result<T> = std::result::Result<T, askama::Error>;

fn format_timestamp(ts: Timestamp) -> String {
    OffsetDateTime::from(ts)
        .format(DATE_TIME_FORMAT)
        .unwrap_or_else(|_| ts.to_string())
}

#[derive(Template)]
#[template(path = "review_submitted/body_NL.txt")]
struct ReviewSubmittedBodyTemplate<'a> {
    restaurant_name: &'a str,
    rating: RatingValue,
    author: &'a str,
    verified: bool,
    title: &'a str,
    content: &'a str,
}

pub fn review_submitted_email(review: &Review, restaurant: &Restaurant) -> Result<EmailContent> {
    let subject = format!("Eetgids - nieuwe review: {}", restaurant.name);
    let author = match &review.author {
        Author::User(id) => format!("gebruiker {id}"),
        Author::Guest { name, email } => format!("{name} <{email}>"),
    };
    let body = ReviewSubmittedBodyTemplate {
        restaurant_name: &restaurant.name,
        rating: review.rating,
        author: &author,
        verified: review.verified,
        title: review.title.as_deref().unwrap_or_default(),
        content: &review.content,
    }
    .render()?;
    Ok(EmailContent { subject, body })
}

#[derive(Template)]
#[template(path = "claim_submitted/body_NL.txt")]
struct ClaimSubmittedBodyTemplate<'a> {
    restaurant_name: &'a str,
    business_email: &'a str,
    phone: &'a str,
    message: &'a str,
}

pub fn claim_submitted_email(
    claim: &RestaurantClaim,
    restaurant: &Restaurant,
) -> Result<EmailContent> {
    let subject = format!("Eetgids - nieuwe claim: {}", restaurant.name);
    let body = ClaimSubmittedBodyTemplate {
        restaurant_name: &restaurant.name,
        business_email: claim.business_email.as_str(),
        phone: claim.phone.as_deref().unwrap_or("-"),
        message: claim.message.as_deref().unwrap_or_default(),
    }
    .render()?;
    Ok(EmailContent { subject, body })
}

#[derive(Template)]
#[template(path = "claim_reviewed/body_NL.txt")]
struct ClaimReviewedBodyTemplate<'a> {
    restaurant_name: &'a str,
    approved: bool,
    reason: &'a str,
    reviewed_at: &'a str,
}

pub fn claim_reviewed_email(
    claim: &RestaurantClaim,
    restaurant: &Restaurant,
) -> Result<EmailContent> {
    let approved = claim.status == ClaimStatus::Approved;
    let subject = if approved {
        format!("Eetgids - claim goedgekeurd: {}", restaurant.name)
    } else {
        format!("Eetgids - claim afgewezen: {}", restaurant.name)
    };
    let reviewed_at = claim
        .reviewed_at
        .map(format_timestamp)
        .unwrap_or_default();
    let body = ClaimReviewedBodyTemplate {
        restaurant_name: &restaurant.name,
        approved,
        reason: claim.rejection_reason.as_deref().unwrap_or_default(),
        reviewed_at: &reviewed_at,
    }
    .render()?;
    Ok(EmailContent { subject, body })
}

#[derive(Template)]
#[template(path = "restaurant_registered/body_NL.txt")]
struct RestaurantRegisteredBodyTemplate<'a> {
    name: &'a str,
    address: &'a str,
    price: &'a str,
}

pub fn restaurant_registered_email(restaurant: &Restaurant) -> Result<EmailContent> {
    let subject = format!("Eetgids - nieuw restaurant: {}", restaurant.name);
    let address = restaurant.address.to_single_line();
    let body = RestaurantRegisteredBodyTemplate {
        name: &restaurant.name,
        address: &address,
        price: restaurant
            .price_range
            .map(PriceRange::symbol)
            .unwrap_or_default(),
    }
    .render()?;
    Ok(EmailContent { subject, body })
}

#[derive(Template)]
#[template(path = "contact_message/body_NL.txt")]
struct ContactMessageBodyTemplate<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

pub fn contact_message_email(message: &ContactMessage) -> Result<EmailContent> {
    let topic = message.subject.as_deref().unwrap_or("(geen onderwerp)");
    let subject = format!("Eetgids - contact: {topic}");
    let body = ContactMessageBodyTemplate {
        name: &message.name,
        email: message.email.as_str(),
        subject: topic,
        message: &message.message,
    }
    .render()?;
    Ok(EmailContent { subject, body })
}
