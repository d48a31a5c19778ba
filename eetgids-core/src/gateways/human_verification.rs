use thiserror::Error;

#[derive(Debug, Error)]
pub enum HumanVerificationError {
    #[error("The verification token has been rejected: {}", .0.join(", "))]
    Rejected(Vec<String>),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Verifies a client-side challenge token against an external service.
pub trait HumanVerificationGateway {
    fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<(), HumanVerificationError>;
}
