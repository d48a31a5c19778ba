use std::{fmt, str::FromStr};

use thiserror::Error;

/// A single mailbox, optionally with a display name.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EmailAddress {
    address: String,
    display_name: Option<String>,
}

impl EmailAddress {
    pub const fn new_unchecked(address: String) -> Self {
        Self {
            address,
            display_name: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn as_str(&self) -> &str {
        self.address.as_str()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn into_string(self) -> String {
        self.address
    }
}

#[derive(Debug, Error)]
#[error("Invalid e-mail address")]
pub struct EmailAddressParseError;

impl FromStr for EmailAddress {
    type Err = EmailAddressParseError;
    fn from_str(s: &str) -> Result<EmailAddress, Self::Err> {
        let info = mailparse::addrparse(s.trim())
            .ok()
            .and_then(|list| list.extract_single_info())
            .ok_or(EmailAddressParseError)?;
        if !info.addr.contains('@') {
            return Err(EmailAddressParseError);
        }
        Ok(Self {
            address: info.addr,
            display_name: info.display_name,
        })
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, r#""{}" <{}>"#, name.replace('"', r#"\""#), self.address),
            None => f.write_str(&self.address),
        }
    }
}

/// Subject and plain-text body of an outgoing e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}
