use super::{parse_email, prelude::*};
use crate::{gateways::notify::ContactMessage, util::validate::non_blank};

#[derive(Debug, Clone, Default)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

pub fn prepare_contact_message(new: NewContactMessage) -> Result<ContactMessage> {
    let name = non_blank(Some(new.name)).ok_or(Error::Name)?;
    let email = parse_email(&new.email)?;
    let message = non_blank(Some(new.message)).ok_or(Error::EmptyMessage)?;
    Ok(ContactMessage {
        name,
        email,
        subject: non_blank(new.subject),
        message,
    })
}
