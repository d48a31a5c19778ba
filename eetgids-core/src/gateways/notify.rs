use std::fmt;

use crate::entities::*;

/// Side effects that are triggered after a successful write.
///
/// Notifications are best effort: a failure to deliver them
/// never rolls back the write that caused them.
#[derive(Debug, Clone, Copy)]
pub enum NotificationEvent<'a> {
    ReviewSubmitted {
        review: &'a Review,
        restaurant: &'a Restaurant,
    },
    ClaimSubmitted {
        claim: &'a RestaurantClaim,
        restaurant: &'a Restaurant,
    },
    ClaimReviewed {
        claim: &'a RestaurantClaim,
        restaurant: &'a Restaurant,
        claimant: &'a EmailAddress,
    },
    RestaurantRegistered {
        restaurant: &'a Restaurant,
    },
    ContactMessageReceived {
        message: &'a ContactMessage,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    ReviewSubmitted,
    ClaimSubmitted,
    ClaimReviewed,
    RestaurantRegistered,
    ContactMessageReceived,
}

impl NotificationEvent<'_> {
    pub const fn kind(&self) -> NotificationType {
        match self {
            Self::ReviewSubmitted { .. } => NotificationType::ReviewSubmitted,
            Self::ClaimSubmitted { .. } => NotificationType::ClaimSubmitted,
            Self::ClaimReviewed { .. } => NotificationType::ClaimReviewed,
            Self::RestaurantRegistered { .. } => NotificationType::RestaurantRegistered,
            Self::ContactMessageReceived { .. } => NotificationType::ContactMessageReceived,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::ReviewSubmitted => "review-submitted",
            Self::ClaimSubmitted => "claim-submitted",
            Self::ClaimReviewed => "claim-reviewed",
            Self::RestaurantRegistered => "restaurant-registered",
            Self::ContactMessageReceived => "contact-message-received",
        };
        f.write_str(s)
    }
}

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: EmailAddress,
    pub subject: Option<String>,
    pub message: String,
}

pub trait NotificationGateway {
    fn notify(&self, event: NotificationEvent);
}
