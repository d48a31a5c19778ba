use super::prelude::*;
use crate::gateways::human_verification::HumanVerificationGateway;

/// Must succeed before any write that was requested anonymously
/// or through a public form.
pub fn verify_human<G>(gw: &G, token: Option<&str>, remote_ip: Option<&str>) -> Result<()>
where
    G: HumanVerificationGateway + ?Sized,
{
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(Error::MissingVerificationToken)?;
    gw.verify(token, remote_ip)?;
    Ok(())
}
