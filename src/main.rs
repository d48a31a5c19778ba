use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use eetgids_application::prelude as flows;
use eetgids_db_sqlite::Connections;
use eetgids_entities::user::Role;

mod config;
mod gateways;

use config::Config;

/// The Eetgids restaurant directory.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Configuration file (default: eetgids.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// URL of the SQLite database
    #[arg(long)]
    db_url: Option<String>,
    /// Allow cross-origin requests
    #[arg(long)]
    enable_cors: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Change the role of a user who has signed in before
    SetRole {
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: Role,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut cfg = Config::try_load_from_file_or_default(args.config.as_ref())?;
    if let Some(db_url) = args.db_url {
        cfg.db.conn_sqlite = db_url;
    }
    if args.enable_cors {
        cfg.webserver.enable_cors = true;
    }

    log::info!("Connecting to SQLite database {}", cfg.db.conn_sqlite);
    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size.into())?;
    eetgids_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    if let Some(Command::SetRole { email, role }) = args.command {
        let user = flows::set_user_role_by_email(&connections, &email, role)?;
        log::info!("{} is now {}", user.email, user.role.as_str());
        return Ok(());
    }

    let jwt_secret = cfg
        .auth
        .jwt_secret
        .clone()
        .ok_or_else(|| anyhow!("No JWT secret configured"))?;
    let web_cfg = eetgids_webserver::Cfg {
        jwt_secret,
        sign_in_url: cfg.auth.sign_in_url.clone(),
        worker_token: cfg.auth.worker_token.clone(),
        human_verification_site_key: cfg
            .human_verification
            .as_ref()
            .map(|hv| hv.site_key.clone()),
    };
    if web_cfg.worker_token.is_none() {
        log::warn!("No worker token configured: import progress reports will be rejected");
    }

    let notify = gateways::notification_gateway(&cfg)?;
    let human_verification = gateways::human_verification_gateway(&cfg);
    let photo_source = gateways::photo_source_gateway(&cfg);

    eetgids_webserver::run(
        connections,
        cfg.webserver.enable_cors,
        web_cfg,
        notify,
        human_verification,
        photo_source,
    )
    .await;
    Ok(())
}
