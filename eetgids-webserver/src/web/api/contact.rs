use super::*;

#[post("/contact", format = "application/json", data = "<message>")]
pub async fn post_contact(
    verification: &State<HumanVerification>,
    notify: &State<Notify>,
    auth: Auth,
    message: JsonResult<'_, json::ContactMessage>,
) -> StatusResult {
    let (message, token) = from_json::new_contact_message(message?.into_inner());
    let verification = verification.inner().clone();
    let notify = notify.inner().clone();
    let remote_ip = auth.remote_ip();
    run_blocking(move || {
        flows::send_contact_message(
            &*verification,
            &*notify,
            message,
            token.as_deref(),
            remote_ip.as_deref(),
        )
    })
    .await?;
    Ok(Status::NoContent)
}
