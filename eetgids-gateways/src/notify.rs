use std::{collections::HashSet, sync::Arc};

use eetgids_core::gateways::notify::{NotificationEvent, NotificationGateway, NotificationType};
use eetgids_entities::email::*;

use crate::{email::EmailGateway, user_communication};

#[derive(Clone)]
pub struct Notify {
    email_gw: Arc<dyn EmailGateway + Send + Sync + 'static>,
    notify_on: HashSet<NotificationType>,
    moderators: Vec<EmailAddress>,
}

impl Notify {
    pub fn new<G>(gw: G, notify_on: HashSet<NotificationType>, moderators: Vec<EmailAddress>) -> Self
    where
        G: EmailGateway + Send + Sync + 'static,
    {
        Self {
            email_gw: Arc::new(gw),
            notify_on,
            moderators,
        }
    }

    fn skip(&self, ev: &NotificationEvent) -> bool {
        !self.notify_on.contains(&ev.kind())
    }

    fn send(&self, recipients: &[EmailAddress], content: user_communication::Result<EmailContent>) {
        match content {
            Ok(content) => {
                if recipients.is_empty() {
                    log::debug!("No recipients for e-mail '{}'", content.subject);
                    return;
                }
                self.email_gw.compose_and_send(recipients, &content);
            }
            Err(err) => {
                log::warn!("Failed to render e-mail: {err}");
            }
        }
    }
}

impl NotificationGateway for Notify {
    fn notify(&self, event: NotificationEvent) {
        use NotificationEvent as E;
        if self.skip(&event) {
            log::debug!("Skipping notification of type {}", event.kind());
            return;
        }
        match event {
            E::ReviewSubmitted { review, restaurant } => {
                log::info!(
                    "Sending e-mails to {} moderators after review {} submitted",
                    self.moderators.len(),
                    review.id
                );
                let content = user_communication::review_submitted_email(review, restaurant);
                self.send(&self.moderators, content);
            }
            E::ClaimSubmitted { claim, restaurant } => {
                log::info!(
                    "Sending e-mails to {} moderators after claim {} submitted",
                    self.moderators.len(),
                    claim.id
                );
                let content = user_communication::claim_submitted_email(claim, restaurant);
                self.send(&self.moderators, content);
            }
            E::ClaimReviewed {
                claim,
                restaurant,
                claimant,
            } => {
                log::info!(
                    "Sending e-mail to {claimant} after claim {} reviewed",
                    claim.id
                );
                let content = user_communication::claim_reviewed_email(claim, restaurant);
                self.send(std::slice::from_ref(claimant), content);
            }
            E::RestaurantRegistered { restaurant } => {
                log::info!(
                    "Sending e-mails to {} moderators after restaurant {} registered",
                    self.moderators.len(),
                    restaurant.id
                );
                let content = user_communication::restaurant_registered_email(restaurant);
                self.send(&self.moderators, content);
            }
            E::ContactMessageReceived { message } => {
                log::info!(
                    "Forwarding contact message from {} to {} moderators",
                    message.email,
                    self.moderators.len()
                );
                let content = user_communication::contact_message_email(message);
                self.send(&self.moderators, content);
            }
        }
    }
}
