//! Adapters of the outbound gateways: e-mail delivery,
//! notifications, human verification and the photo source.

pub mod email;
pub mod human_verification;
pub mod notify;
pub mod photo_source;
pub mod user_communication;
