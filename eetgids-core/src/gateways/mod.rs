pub mod email;
pub mod human_verification;
pub mod notify;
pub mod photo_source;
