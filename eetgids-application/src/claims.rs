use super::*;

pub fn submit_claim<G, N>(
    connections: &sqlite::Connections,
    verification: &G,
    notify: &N,
    user_id: Option<&Id>,
    new_claim: usecases::NewClaim,
    verification_token: Option<&str>,
    remote_ip: Option<&str>,
) -> Result<RestaurantClaim>
where
    G: HumanVerificationGateway + ?Sized,
    N: NotificationGateway + ?Sized,
{
    if user_id.is_none() {
        return Err(usecases::Error::Unauthorized.into());
    }
    usecases::verify_human(verification, verification_token, remote_ip)?;

    let (claim, restaurant) = connections.exclusive()?.transaction(|conn| {
        let (claim, restaurant) = usecases::prepare_new_claim(conn, user_id, new_claim)?;
        usecases::store_new_claim(conn, &claim)?;
        Ok::<_, usecases::Error>((claim, restaurant))
    })?;

    notify.notify(NotificationEvent::ClaimSubmitted {
        claim: &claim,
        restaurant: &restaurant,
    });
    Ok(claim)
}

/// Approves the claim and transfers the ownership of the
/// restaurant within a single transaction.
pub fn approve_claim<N>(
    connections: &sqlite::Connections,
    notify: &N,
    claim_id: &str,
    reviewer: &Id,
) -> Result<(RestaurantClaim, Restaurant)>
where
    N: NotificationGateway + ?Sized,
{
    let (claim, restaurant) = connections.exclusive()?.transaction(|conn| {
        usecases::approve_claim(conn, claim_id, reviewer).inspect_err(|err| {
            warn!("Failed to approve claim {claim_id}: {err}");
        })
    })?;
    notify_claimant(notify, &claim, &restaurant);
    Ok((claim, restaurant))
}

pub fn reject_claim<N>(
    connections: &sqlite::Connections,
    notify: &N,
    claim_id: &str,
    reviewer: &Id,
    reason: Option<String>,
) -> Result<RestaurantClaim>
where
    N: NotificationGateway + ?Sized,
{
    let (claim, restaurant) = connections.exclusive()?.transaction(|conn| {
        usecases::reject_claim(conn, claim_id, reviewer, reason).inspect_err(|err| {
            warn!("Failed to reject claim {claim_id}: {err}");
        })
    })?;
    notify_claimant(notify, &claim, &restaurant);
    Ok(claim)
}

fn notify_claimant<N>(notify: &N, claim: &RestaurantClaim, restaurant: &Restaurant)
where
    N: NotificationGateway + ?Sized,
{
    notify.notify(NotificationEvent::ClaimReviewed {
        claim,
        restaurant,
        claimant: &claim.business_email,
    });
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn new_claim(restaurant_id: &str) -> usecases::NewClaim {
        usecases::NewClaim {
            restaurant_id: restaurant_id.into(),
            business_email: "eigenaar@gouden-lepel.nl".into(),
            phone: None,
            message: Some("Ik ben de eigenaar".into()),
        }
    }

    fn submit(fixture: &BackendFixture, user: &str, restaurant_id: &str) -> super::Result<RestaurantClaim> {
        flows::submit_claim(
            &fixture.db_connections,
            &fixture.verification,
            &fixture.notify,
            Some(&user.into()),
            new_claim(restaurant_id),
            Some(VALID_TOKEN),
            None,
        )
    }

    #[test]
    fn duplicate_claim_is_already_claimed() {
        let fixture = BackendFixture::new();
        let restaurant = fixture.create_restaurant("amsterdam", "De Gouden Lepel");
        submit(&fixture, "u1", restaurant.id.as_str()).unwrap();
        assert!(matches!(
            submit(&fixture, "u1", restaurant.id.as_str()),
            Err(AppError::Business(BError::Parameter(usecases::Error::AlreadyClaimed)))
        ));
        assert_eq!(vec![NotificationType::ClaimSubmitted], fixture.notify.events());
    }

    #[test]
    fn anonymous_claim_is_rejected_before_verification() {
        let fixture = BackendFixture::new();
        let restaurant = fixture.create_restaurant("amsterdam", "De Gouden Lepel");
        assert!(matches!(
            flows::submit_claim(
                &fixture.db_connections,
                &fixture.verification,
                &fixture.notify,
                None,
                new_claim(restaurant.id.as_str()),
                None,
                None,
            ),
            Err(AppError::Business(BError::Parameter(usecases::Error::Unauthorized)))
        ));
    }

    #[test]
    fn approval_changes_claim_and_restaurant_together() {
        let fixture = BackendFixture::new();
        let restaurant = fixture.create_restaurant("amsterdam", "De Gouden Lepel");
        let claim = submit(&fixture, "u1", restaurant.id.as_str()).unwrap();
        let admin = Id::from("admin");

        let (claim, restaurant) =
            flows::approve_claim(&fixture.db_connections, &fixture.notify, claim.id.as_str(), &admin)
                .unwrap();
        assert_eq!(ClaimStatus::Approved, claim.status);
        assert!(restaurant.claimed);
        assert_eq!(Some(Id::from("u1")), restaurant.owner);

        let stored = fixture.get_claim(claim.id.as_str());
        assert_eq!(ClaimStatus::Approved, stored.status);
        assert_eq!(Some(admin), stored.reviewed_by);
        assert!(stored.reviewed_at.is_some());
        assert_eq!(
            Some(Id::from("u1")),
            fixture.get_restaurant(restaurant.id.as_str()).owner
        );
        assert_eq!(
            vec![NotificationType::ClaimSubmitted, NotificationType::ClaimReviewed],
            fixture.notify.events()
        );
    }

    #[test]
    fn failed_review_leaves_everything_unchanged() {
        let fixture = BackendFixture::new();
        let restaurant = fixture.create_restaurant("amsterdam", "De Gouden Lepel");
        let first = submit(&fixture, "u1", restaurant.id.as_str()).unwrap();
        let admin = Id::from("admin");
        flows::reject_claim(
            &fixture.db_connections,
            &fixture.notify,
            first.id.as_str(),
            &admin,
            Some("Geen bewijs".into()),
        )
        .unwrap();

        assert!(matches!(
            flows::approve_claim(&fixture.db_connections, &fixture.notify, first.id.as_str(), &admin),
            Err(AppError::Business(BError::Parameter(usecases::Error::ClaimNotPending)))
        ));
        let stored = fixture.get_claim(first.id.as_str());
        assert_eq!(ClaimStatus::Rejected, stored.status);
        assert_eq!(Some("Geen bewijs".to_string()), stored.rejection_reason);
        let restaurant = fixture.get_restaurant(restaurant.id.as_str());
        assert!(!restaurant.claimed);
        assert!(restaurant.owner.is_none());

        // Resubmission after a rejection
        assert!(submit(&fixture, "u1", restaurant.id.as_str()).is_ok());
    }
}
