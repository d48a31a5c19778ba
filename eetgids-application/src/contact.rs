use super::*;

/// Forwards a message of the contact form to the moderators.
pub fn send_contact_message<G, N>(
    verification: &G,
    notify: &N,
    new_message: usecases::NewContactMessage,
    verification_token: Option<&str>,
    remote_ip: Option<&str>,
) -> Result<()>
where
    G: HumanVerificationGateway + ?Sized,
    N: NotificationGateway + ?Sized,
{
    usecases::verify_human(verification, verification_token, remote_ip)?;
    let message = usecases::prepare_contact_message(new_message)?;
    info!("Received contact message from {}", message.email);
    notify.notify(NotificationEvent::ContactMessageReceived { message: &message });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn forward_verified_message() {
        let fixture = BackendFixture::new();
        let message = usecases::NewContactMessage {
            name: "Piet".into(),
            email: "piet@example.com".into(),
            subject: None,
            message: "Mijn restaurant ontbreekt".into(),
        };
        assert!(flows::send_contact_message(
            &fixture.verification,
            &fixture.notify,
            message.clone(),
            None,
            None
        )
        .is_err());
        flows::send_contact_message(
            &fixture.verification,
            &fixture.notify,
            message,
            Some(VALID_TOKEN),
            None,
        )
        .unwrap();
        assert_eq!(
            vec![NotificationType::ContactMessageReceived],
            fixture.notify.events()
        );
    }
}
