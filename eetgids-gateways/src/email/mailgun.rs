use anyhow::Result;
use eetgids_entities::{email::*, url::Url};
use itertools::Itertools;
use std::thread;

use super::EmailGateway;

/// An email gateway based on mailgun.net.
#[derive(Debug, Clone)]
pub struct Mailgun {
    pub api_key: String,
    pub api_base_url: Url,
    pub domain: String,
    pub from_email: EmailAddress,
}

impl Mailgun {
    fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.api_base_url.as_str().trim_end_matches('/'),
            self.domain
        )
    }

    fn send(&self, params: Vec<(&'static str, String)>) {
        let url = self.messages_url();
        let key = self.api_key.clone();
        // Fire and forget
        thread::spawn(move || {
            if let Err(err) = send_raw(&url, &key, params) {
                log::warn!("Could not send e-mail: {err}");
            }
        });
    }
}

#[derive(Debug, serde::Deserialize, thiserror::Error)]
#[error("{message}")]
struct JsonError {
    pub message: String,
}

#[cfg(not(test))]
fn send_raw(url: &str, api_key: &str, params: Vec<(&'static str, String)>) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let response = client
        .post(url)
        .form(&params)
        .basic_auth("api", Some(api_key))
        .send()?;
    if response.status().is_success() {
        log::debug!("Mail provider response: {:#?}", response);
        Ok(())
    } else {
        let json_error: JsonError = response.json()?;
        Err(json_error.into())
    }
}

/// Don't actually send emails while running the tests.
#[cfg(test)]
fn send_raw(_: &str, _: &str, params: Vec<(&'static str, String)>) -> Result<()> {
    log::debug!("Would send e-mail: {:?}", params);
    Ok(())
}

impl EmailGateway for Mailgun {
    fn compose_and_send(&self, recipients: &[EmailAddress], email: &EmailContent) {
        if recipients.is_empty() {
            log::warn!("No valid email addresses specified");
            return;
        }
        log::debug!(
            "Sending e-mails from {} to: {:?}",
            self.from_email,
            recipients
        );
        let recipients: String = recipients.iter().map(EmailAddress::as_str).join(",");

        let params = vec![
            ("to", self.from_email.as_str().to_owned()), // `to` is required
            ("from", self.from_email.to_string()),
            ("bcc", recipients),
            ("subject", email.subject.to_owned()),
            ("text", email.body.to_owned()),
        ];
        self.send(params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_without_duplicate_slash() {
        let gw = Mailgun {
            api_key: "key".into(),
            api_base_url: "https://api.eu.mailgun.net/v3/".parse().unwrap(),
            domain: "mg.eetgids.nl".into(),
            from_email: "noreply@eetgids.nl".parse().unwrap(),
        };
        assert_eq!(
            "https://api.eu.mailgun.net/v3/mg.eetgids.nl/messages",
            gw.messages_url()
        );
    }
}
