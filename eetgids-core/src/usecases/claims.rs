use super::{parse_email, prelude::*};
use crate::util::validate::non_blank;

#[derive(Debug, Clone, Default)]
pub struct NewClaim {
    pub restaurant_id: String,
    pub business_email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

pub fn prepare_new_claim<R>(
    repo: &R,
    user_id: Option<&Id>,
    new_claim: NewClaim,
) -> Result<(RestaurantClaim, Restaurant)>
where
    R: RestaurantRepo,
{
    let user_id = user_id.ok_or(Error::Unauthorized)?;
    let NewClaim {
        restaurant_id,
        business_email,
        phone,
        message,
    } = new_claim;
    let business_email = parse_email(&business_email)?;
    let restaurant = repo.get_restaurant(&restaurant_id)?;
    if restaurant.owner.as_ref() == Some(user_id) {
        return Err(Error::AlreadyClaimed);
    }
    let claim = RestaurantClaim {
        id: Id::new(),
        restaurant_id: restaurant.id.clone(),
        user_id: user_id.clone(),
        business_email,
        phone: non_blank(phone),
        message: non_blank(message),
        status: ClaimStatus::Pending,
        rejection_reason: None,
        reviewed_by: None,
        reviewed_at: None,
        created_at: Timestamp::now(),
    };
    Ok((claim, restaurant))
}

pub fn store_new_claim<R: ClaimRepo>(repo: &R, claim: &RestaurantClaim) -> Result<()> {
    repo.create_claim(claim).map_err(|err| match err {
        RepoError::AlreadyExists => {
            log::debug!(
                "User {} has already claimed restaurant {}",
                claim.user_id,
                claim.restaurant_id
            );
            Error::AlreadyClaimed
        }
        err => err.into(),
    })?;
    log::info!(
        "User {} claimed restaurant {}",
        claim.user_id,
        claim.restaurant_id
    );
    Ok(())
}

fn review_claim<R>(
    repo: &R,
    claim_id: &str,
    reviewer: &Id,
    status: ClaimStatus,
    rejection_reason: Option<String>,
) -> Result<RestaurantClaim>
where
    R: ClaimRepo,
{
    let mut claim = repo.get_claim(claim_id)?;
    if !claim.status.is_pending() {
        return Err(Error::ClaimNotPending);
    }
    claim.status = status;
    claim.rejection_reason = rejection_reason;
    claim.reviewed_by = Some(reviewer.clone());
    claim.reviewed_at = Some(Timestamp::now());
    repo.update_claim(&claim)?;
    Ok(claim)
}

/// Approves a pending claim and makes the claimant the owner
/// of the restaurant.
///
/// Both changes must be committed together, i.e. the
/// repository should be a transaction.
pub fn approve_claim<R>(repo: &R, claim_id: &str, reviewer: &Id) -> Result<(RestaurantClaim, Restaurant)>
where
    R: ClaimRepo + RestaurantRepo,
{
    let claim = review_claim(repo, claim_id, reviewer, ClaimStatus::Approved, None)?;
    repo.set_restaurant_owner(claim.restaurant_id.as_str(), &claim.user_id)?;
    let restaurant = repo.get_restaurant(claim.restaurant_id.as_str())?;
    debug_assert!(restaurant.claimed);
    log::info!(
        "Approved claim {}: user {} owns restaurant {}",
        claim.id,
        claim.user_id,
        restaurant.id
    );
    Ok((claim, restaurant))
}

pub fn reject_claim<R>(
    repo: &R,
    claim_id: &str,
    reviewer: &Id,
    reason: Option<String>,
) -> Result<(RestaurantClaim, Restaurant)>
where
    R: ClaimRepo + RestaurantRepo,
{
    let claim = review_claim(repo, claim_id, reviewer, ClaimStatus::Rejected, non_blank(reason))?;
    let restaurant = repo.get_restaurant(claim.restaurant_id.as_str())?;
    log::info!("Rejected claim {} of restaurant {}", claim.id, restaurant.id);
    Ok((claim, restaurant))
}

pub fn claims_by_status<R: ClaimRepo>(
    repo: &R,
    status: Option<ClaimStatus>,
    pagination: &Pagination,
) -> Result<Vec<RestaurantClaim>> {
    Ok(repo.claims_by_status(status, pagination)?)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use eetgids_entities::builders::*;

    fn db() -> MockDb {
        let db = MockDb::default();
        db.restaurants
            .borrow_mut()
            .push(Restaurant::build().id("r1").finish());
        db
    }

    fn new_claim() -> NewClaim {
        NewClaim {
            restaurant_id: "r1".into(),
            business_email: "eigenaar@gouden-lepel.nl".into(),
            phone: Some("020-1234567".into()),
            message: Some(" ".into()),
        }
    }

    fn submit(db: &MockDb, user: &str) -> Result<RestaurantClaim> {
        let (claim, _) = prepare_new_claim(db, Some(&user.into()), new_claim())?;
        store_new_claim(db, &claim)?;
        Ok(claim)
    }

    #[test]
    fn submit_pending_claim() {
        let db = db();
        let claim = submit(&db, "u1").unwrap();
        assert_eq!(ClaimStatus::Pending, claim.status);
        assert!(claim.message.is_none());
        assert_eq!(1, db.claims.borrow().len());
    }

    #[test]
    fn duplicate_claim_is_already_claimed() {
        let db = db();
        submit(&db, "u1").unwrap();
        assert!(matches!(submit(&db, "u1"), Err(Error::AlreadyClaimed)));
        assert!(submit(&db, "u2").is_ok());
    }

    #[test]
    fn requires_authentication_and_valid_email() {
        let db = db();
        assert!(matches!(
            prepare_new_claim(&db, None, new_claim()),
            Err(Error::Unauthorized)
        ));
        let claim = NewClaim {
            business_email: "geen-email".into(),
            ..new_claim()
        };
        assert!(matches!(
            prepare_new_claim(&db, Some(&"u1".into()), claim),
            Err(Error::Email)
        ));
    }

    #[test]
    fn approve_sets_owner() {
        let db = db();
        let claim = submit(&db, "u1").unwrap();
        let admin = Id::from("admin");
        let (claim, restaurant) = approve_claim(&db, claim.id.as_str(), &admin).unwrap();
        assert_eq!(ClaimStatus::Approved, claim.status);
        assert_eq!(Some(admin), claim.reviewed_by);
        assert!(restaurant.claimed);
        assert_eq!(Some(Id::from("u1")), restaurant.owner);
        assert!(matches!(
            approve_claim(&db, claim.id.as_str(), &"admin".into()),
            Err(Error::ClaimNotPending)
        ));
        assert!(matches!(submit(&db, "u1"), Err(Error::AlreadyClaimed)));
    }

    #[test]
    fn reject_keeps_restaurant_unclaimed() {
        let db = db();
        let claim = submit(&db, "u1").unwrap();
        let (claim, restaurant) = reject_claim(
            &db,
            claim.id.as_str(),
            &"admin".into(),
            Some("Geen bewijs".into()),
        )
        .unwrap();
        assert_eq!(ClaimStatus::Rejected, claim.status);
        assert_eq!(Some("Geen bewijs".to_string()), claim.rejection_reason);
        assert!(!restaurant.claimed);
        assert!(restaurant.owner.is_none());
        // A rejected claim may be resubmitted
        assert!(submit(&db, "u1").is_ok());
    }
}
