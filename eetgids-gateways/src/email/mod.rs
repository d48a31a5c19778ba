pub mod mailgun;
pub mod send_to_json_file;

pub use eetgids_core::gateways::email::EmailGateway;
