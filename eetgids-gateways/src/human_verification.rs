use anyhow::anyhow;
use eetgids_core::gateways::human_verification::{
    HumanVerificationError, HumanVerificationGateway,
};
use eetgids_entities::url::Url;
use serde::Deserialize;

/// Verifies challenge tokens at a `siteverify` endpoint.
#[derive(Debug, Clone)]
pub struct SiteVerify {
    pub verify_url: Url,
    pub secret: String,
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

impl SiteVerifyResponse {
    fn into_result(self) -> Result<(), HumanVerificationError> {
        if self.success {
            return Ok(());
        }
        Err(HumanVerificationError::Rejected(self.error_codes))
    }
}

impl HumanVerificationGateway for SiteVerify {
    fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<(), HumanVerificationError> {
        if token.trim().is_empty() {
            return Err(HumanVerificationError::Rejected(vec![
                "missing-input-response".into(),
            ]));
        }
        let mut params = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            params.push(("remoteip", ip));
        }
        let response = reqwest::blocking::Client::new()
            .post(self.verify_url.as_str())
            .form(&params)
            .send()
            .map_err(|err| anyhow!("Human verification request failed: {err}"))?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "Human verification service responded with {}",
                response.status()
            )
            .into());
        }
        let response: SiteVerifyResponse = response
            .json()
            .map_err(|err| anyhow!("Invalid human verification response: {err}"))?;
        log::debug!("Human verification response: {response:?}");
        response.into_result()
    }
}

/// Accepts every token. Used when human verification is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipHumanVerification;

impl HumanVerificationGateway for SkipHumanVerification {
    fn verify(&self, _token: &str, _remote_ip: Option<&str>) -> Result<(), HumanVerificationError> {
        Ok(())
    }
}
