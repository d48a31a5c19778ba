use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = include_str!("eetgids.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
    pub auth: Option<Auth>,
    pub email: Option<Email>,
    pub gateway: Option<Gateway>,
    pub human_verification: Option<HumanVerification>,
    pub photos: Option<Photos>,
    pub notifications: Option<Notifications>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: bool,
    pub human_verification: bool,
}

impl Default for WebServer {
    fn default() -> Self {
        Config::default()
            .webserver
            .expect("Webserver configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Auth {
    pub jwt_secret: Option<String>,
    pub sign_in_url: Option<String>,
    pub worker_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Email {
    pub gateway: Option<EmailGateway>,
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailGateway {
    Mailgun,
    EmailToJsonFile,
}

impl EmailGateway {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mailgun => "mailgun",
            Self::EmailToJsonFile => "email-to-json-file",
        }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub mailgun: Option<MailGun>,
    pub email_to_json_file: Option<EmailToJsonFile>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MailGun {
    pub api_key: String,
    pub domain: String,
    pub sender_address: String,
    pub api_base_url: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmailToJsonFile {
    pub dir: PathBuf,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HumanVerification {
    pub verify_url: Option<String>,
    pub site_key: Option<String>,
    pub secret: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Photos {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Notifications {
    #[serde(default)]
    pub moderators: Vec<String>,
    pub notify_on: Vec<NotificationType>,
}

impl Default for Notifications {
    fn default() -> Self {
        Config::default()
            .notifications
            .expect("Notifications configuration")
    }
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    ReviewSubmitted,
    ClaimSubmitted,
    ClaimReviewed,
    RestaurantRegistered,
    ContactMessageReceived,
}
