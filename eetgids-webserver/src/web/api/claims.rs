use super::*;

#[post("/restaurants/<id>/claims", format = "application/json", data = "<claim>")]
pub async fn post_claim(
    db: sqlite::Connections,
    verification: &State<HumanVerification>,
    notify: &State<Notify>,
    auth: Auth,
    id: &str,
    claim: JsonResult<'_, json::NewClaim>,
) -> Result<json::Claim> {
    let (new_claim, token) = from_json::new_claim(id, claim?.into_inner());
    // Anonymous requests are rejected before contacting the verification service
    let user_id = auth.identity()?.user_id.clone();
    let verification = verification.inner().clone();
    let notify = notify.inner().clone();
    let remote_ip = auth.remote_ip();
    let claim = run_blocking(move || {
        flows::submit_claim(
            &db,
            &*verification,
            &*notify,
            Some(&user_id),
            new_claim,
            token.as_deref(),
            remote_ip.as_deref(),
        )
    })
    .await?;
    Ok(Json(claim.into()))
}

#[get("/claims?<status>&<offset>&<limit>")]
pub fn get_claims(
    db: sqlite::Connections,
    auth: Auth,
    status: Option<&str>,
    offset: Option<u64>,
    limit: Option<u64>,
) -> Result<Vec<json::Claim>> {
    require_admin(&db, &auth)?;
    let status = status
        .map(|s| {
            s.parse::<ClaimStatus>()
                .map_err(|_| from_json::UnknownValue::new("claim status", s))
        })
        .transpose()?;
    let pagination = Pagination { offset, limit };
    let claims = usecases::claims_by_status(&db.shared()?, status, &pagination)?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

#[post("/claims/<id>/approve")]
pub fn post_approve_claim(
    db: sqlite::Connections,
    notify: &State<Notify>,
    auth: Auth,
    id: &str,
) -> Result<json::Claim> {
    let admin = require_admin(&db, &auth)?;
    let (claim, _) = flows::approve_claim(&db, &***notify, id, &admin.id)?;
    Ok(Json(claim.into()))
}

#[post("/claims/<id>/reject", data = "<rejection>")]
pub fn post_reject_claim(
    db: sqlite::Connections,
    notify: &State<Notify>,
    auth: Auth,
    id: &str,
    rejection: Option<Json<json::ClaimRejection>>,
) -> Result<json::Claim> {
    let admin = require_admin(&db, &auth)?;
    let reason = rejection.and_then(|r| r.into_inner().reason);
    let claim = flows::reject_claim(&db, &***notify, id, &admin.id, reason)?;
    Ok(Json(claim.into()))
}
