use crate::config::{self, Config};
use eetgids_core::gateways::{
    email::EmailGateway, human_verification::HumanVerificationGateway,
    notify::NotificationGateway, photo_source::PhotoSourceGateway,
};
use eetgids_entities::email::{EmailAddress, EmailContent};
use eetgids_gateways::{
    email::{mailgun::Mailgun, send_to_json_file::SendToJsonFile},
    human_verification::{SiteVerify, SkipHumanVerification},
    notify::Notify,
    photo_source::{HttpPhotoSource, NoPhotoSource},
};

pub fn notification_gateway(cfg: &Config) -> anyhow::Result<Box<dyn NotificationGateway + Send + Sync>> {
    let notifications = &cfg.notifications;
    let notify_on = notifications.notify_on.clone();
    let moderators = notifications.moderators.clone();
    if moderators.is_empty() {
        log::warn!("No moderators configured: nobody will be notified about submissions");
    }
    let notify = match &cfg.email.gateway {
        Some(config::EmailGateway::MailGun {
            api_base_url,
            api_key,
            domain,
            sender_address,
        }) => Notify::new(
            Mailgun {
                api_key: api_key.clone(),
                api_base_url: api_base_url.clone(),
                domain: domain.clone(),
                from_email: sender_address.clone(),
            },
            notify_on,
            moderators,
        ),
        Some(config::EmailGateway::EmailToJsonFile { dir }) => {
            Notify::new(SendToJsonFile::try_new(dir)?, notify_on, moderators)
        }
        None => {
            log::warn!("No e-mail gateway was configured");
            Notify::new(DummyMailGw, notify_on, moderators)
        }
    };
    Ok(Box::new(notify))
}

pub fn human_verification_gateway(
    cfg: &Config,
) -> Box<dyn HumanVerificationGateway + Send + Sync> {
    match &cfg.human_verification {
        Some(config::HumanVerification {
            verify_url, secret, ..
        }) => {
            log::info!("Protect forms with human verification ({verify_url})");
            Box::new(SiteVerify {
                verify_url: verify_url.clone(),
                secret: secret.clone(),
            })
        }
        None => {
            log::warn!("Human verification is disabled");
            Box::new(SkipHumanVerification)
        }
    }
}

pub fn photo_source_gateway(cfg: &Config) -> Box<dyn PhotoSourceGateway + Send + Sync> {
    match &cfg.photos {
        Some(config::Photos { api_url, api_key }) => {
            log::info!("Use photo source at {api_url}");
            Box::new(HttpPhotoSource {
                api_url: api_url.clone(),
                api_key: api_key.clone(),
            })
        }
        None => {
            log::warn!("No photo source was configured");
            Box::new(NoPhotoSource)
        }
    }
}

struct DummyMailGw;

impl EmailGateway for DummyMailGw {
    fn compose_and_send(&self, _recipients: &[EmailAddress], email: &EmailContent) {
        log::debug!(
            "Cannot send e-mail '{}' because no e-mail gateway was configured",
            email.subject
        );
    }
}
