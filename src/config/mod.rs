use anyhow::{anyhow, Result};
use eetgids_core::gateways::notify::NotificationType;
use eetgids_entities::{email::EmailAddress, url::Url};
use std::{
    collections::HashSet,
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "eetgids.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_JWT_SECRET: &str = "JWT_SECRET";

const DEFAULT_MAILGUN_API_BASE_URL: &str = "https://api.eu.mailgun.net/v3";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub auth: Auth,
    pub email: Email,
    pub human_verification: Option<HumanVerification>,
    pub photos: Option<Photos>,
    pub notifications: Notifications,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        if let Ok(secret) = env::var(ENV_NAME_JWT_SECRET) {
            cfg.auth.jwt_secret = Some(secret);
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct WebServer {
    pub enable_cors: bool,
}

pub struct Auth {
    pub jwt_secret: Option<String>,
    pub sign_in_url: Option<String>,
    pub worker_token: Option<String>,
}

pub struct Email {
    pub gateway: Option<EmailGateway>,
}

#[derive(Clone)]
pub enum EmailGateway {
    MailGun {
        api_base_url: Url,
        api_key: String,
        domain: String,
        sender_address: EmailAddress,
    },
    /// For local testing purposes
    EmailToJsonFile {
        /// File system directory for writing emails into JSON files.
        dir: PathBuf,
    },
}

/// Present only if forms have to be protected.
pub struct HumanVerification {
    pub verify_url: Url,
    pub site_key: String,
    pub secret: String,
}

pub struct Photos {
    pub api_url: Url,
    pub api_key: Option<String>,
}

pub struct Notifications {
    pub moderators: Vec<EmailAddress>,
    pub notify_on: HashSet<NotificationType>,
}

impl From<raw::NotificationType> for NotificationType {
    fn from(from: raw::NotificationType) -> Self {
        use raw::NotificationType as N;
        match from {
            N::ReviewSubmitted => Self::ReviewSubmitted,
            N::ClaimSubmitted => Self::ClaimSubmitted,
            N::ClaimReviewed => Self::ClaimReviewed,
            N::RestaurantRegistered => Self::RestaurantRegistered,
            N::ContactMessageReceived => Self::ContactMessageReceived,
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            webserver,
            auth,
            email,
            gateway,
            human_verification,
            photos,
            notifications,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();
        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool needs at least one connection"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::WebServer {
            cors,
            human_verification: protect_forms,
        } = webserver.unwrap_or_default();
        let webserver = WebServer { enable_cors: cors };

        let raw::Auth {
            jwt_secret,
            sign_in_url,
            worker_token,
        } = auth.unwrap_or_default();
        let auth = Auth {
            jwt_secret: non_empty(jwt_secret),
            sign_in_url: non_empty(sign_in_url),
            worker_token: non_empty(worker_token),
        };

        let email_gateway = match email.and_then(|m| m.gateway) {
            Some(gw_name) => {
                let toml_name = gw_name.name();
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::EmailGateway::Mailgun => {
                        let raw::MailGun {
                            api_key,
                            api_base_url,
                            domain,
                            sender_address,
                        } = gateway.mailgun.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        let sender_address = sender_address.parse()?;
                        let api_base_url = api_base_url
                            .as_deref()
                            .unwrap_or(DEFAULT_MAILGUN_API_BASE_URL)
                            .parse()?;
                        log::info!("Use Mailgun gateway");
                        EmailGateway::MailGun {
                            api_key,
                            api_base_url,
                            domain,
                            sender_address,
                        }
                    }
                    raw::EmailGateway::EmailToJsonFile => {
                        let raw::EmailToJsonFile { dir } =
                            gateway.email_to_json_file.ok_or_else(|| {
                                anyhow!("Missing '{toml_name}' gateway configuration")
                            })?;
                        log::info!("Use JSON file email gateway ({})", dir.display());
                        EmailGateway::EmailToJsonFile { dir }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let email = Email {
            gateway: email_gateway,
        };

        let human_verification = if protect_forms {
            let raw::HumanVerification {
                verify_url,
                site_key,
                secret,
            } = human_verification.unwrap_or_default();
            let verify_url = verify_url
                .ok_or_else(|| anyhow!("Missing human verification URL"))?
                .parse()?;
            let site_key =
                non_empty(site_key).ok_or_else(|| anyhow!("Missing human verification site key"))?;
            let secret =
                non_empty(secret).ok_or_else(|| anyhow!("Missing human verification secret"))?;
            Some(HumanVerification {
                verify_url,
                site_key,
                secret,
            })
        } else {
            None
        };

        let raw::Photos { api_url, api_key } = photos.unwrap_or_default();
        let photos = match non_empty(api_url) {
            Some(url) => Some(Photos {
                api_url: url.parse()?,
                api_key: non_empty(api_key),
            }),
            None => None,
        };

        let raw::Notifications {
            moderators,
            notify_on,
        } = notifications.unwrap_or_default();
        let moderators = moderators
            .iter()
            .map(|m| m.parse::<EmailAddress>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let notify_on = notify_on.into_iter().map(Into::into).collect();
        let notifications = Notifications {
            moderators,
            notify_on,
        };

        Ok(Self {
            db,
            webserver,
            auth,
            email,
            human_verification,
            photos,
            notifications,
        })
    }
}
