use core::ops::Deref;
use std::{net::IpAddr, sync::Arc};

use rocket::{
    self,
    http::Status,
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
    State,
};

use crate::{
    core::{
        gateways::{
            human_verification::HumanVerificationGateway, notify::NotificationGateway,
            photo_source::PhotoSourceGateway,
        },
        prelude::*,
        usecases,
    },
    web::{jwt, sqlite, Cfg},
};
use eetgids_application::prelude as flows;
use eetgids_core::usecases::Error as ParameterError;

pub const COOKIE_ACCESS_TOKEN_KEY: &str = "eetgids-access-token";

type Result<T> = std::result::Result<T, AppError>;

fn get_bearer_token(auth_header_val: &str) -> Option<&str> {
    auth_header_val
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// A user authenticated by the identity provider.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Id,
    pub email: String,
}

#[derive(Debug)]
pub struct Auth {
    bearer_tokens: Vec<String>,
    identity: Option<Identity>,
    remote_ip: Option<IpAddr>,
}

impl Auth {
    pub fn identity(&self) -> Result<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| ParameterError::Unauthorized.into())
    }

    pub fn user_id(&self) -> Option<&Id> {
        self.identity.as_ref().map(|i| &i.user_id)
    }

    pub fn remote_ip(&self) -> Option<String> {
        self.remote_ip.map(|ip| ip.to_string())
    }

    pub fn user_with_min_role<R>(&self, repo: &R, min_required_role: Role) -> Result<User>
    where
        R: UserRepo,
    {
        Ok(usecases::authorize_role(repo, self.user_id(), min_required_role)?)
    }

    /// The external import worker authenticates with a static token.
    pub fn has_worker_token(&self, cfg: &Cfg) -> Result<()> {
        let Some(expected) = cfg.worker_token.as_deref() else {
            debug!("No worker token configured");
            return Err(ParameterError::Unauthorized.into());
        };
        if self.bearer_tokens.iter().any(|t| t == expected) {
            Ok(())
        } else {
            Err(ParameterError::Unauthorized.into())
        }
    }

    fn bearer_tokens_from_header(request: &Request) -> Vec<String> {
        request
            .headers()
            .get("Authorization")
            .filter_map(get_bearer_token)
            .map(ToOwned::to_owned)
            .collect()
    }

    fn access_token_from_cookie(request: &Request) -> Option<String> {
        request
            .cookies()
            .get(COOKIE_ACCESS_TOKEN_KEY)
            .map(|cookie| cookie.value().to_owned())
    }

    async fn identity_from_tokens(request: &Request<'_>, tokens: &[String]) -> Option<Identity> {
        let jwt_state = request.guard::<&State<jwt::JwtState>>().await.succeeded()?;
        tokens
            .iter()
            .filter_map(|token| jwt_state.validate_token(token).ok())
            .map(|claims| Identity {
                user_id: claims.sub.into(),
                email: claims.email,
            })
            .next()
    }

    /// Mirrors the user into the local store when first seen.
    async fn sync_identity(request: &Request<'_>, identity: &Identity) {
        let Some(connections) = request.guard::<&State<sqlite::Connections>>().await.succeeded()
        else {
            return;
        };
        let known = connections
            .shared()
            .ok()
            .and_then(|db| db.try_get_user(identity.user_id.as_str()).ok().flatten())
            .is_some_and(|user| user.email.as_str() == identity.email);
        if known {
            return;
        }
        if let Err(err) = flows::sync_user(connections, &identity.user_id, &identity.email) {
            warn!("Failed to register user {}: {err}", identity.user_id);
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let bearer_tokens = Self::bearer_tokens_from_header(request);

        let mut identity = None;
        if cfg!(feature = "jwt") {
            identity = Self::identity_from_tokens(request, &bearer_tokens).await;
        }
        if cfg!(all(feature = "jwt", feature = "cookies")) && identity.is_none() {
            if let Some(token) = Self::access_token_from_cookie(request) {
                identity = Self::identity_from_tokens(request, &[token]).await;
            }
        }
        if let Some(identity) = &identity {
            Self::sync_identity(request, identity).await;
        }

        let auth = Self {
            bearer_tokens,
            identity,
            remote_ip: request.client_ip(),
        };

        Outcome::Success(auth)
    }
}

#[derive(Debug)]
pub struct Account(Identity);

impl Account {
    pub fn user_id(&self) -> &Id {
        &self.0.user_id
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Account {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth = try_outcome!(Auth::from_request(request).await);
        match auth.identity {
            Some(identity) => Outcome::Success(Account(identity)),
            None => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

#[derive(Clone)]
pub struct Notify(pub Arc<dyn NotificationGateway + Send + Sync>);

impl Deref for Notify {
    type Target = dyn NotificationGateway;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[derive(Clone)]
pub struct HumanVerification(pub Arc<dyn HumanVerificationGateway + Send + Sync>);

impl Deref for HumanVerification {
    type Target = dyn HumanVerificationGateway;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[derive(Clone)]
pub struct PhotoSource(pub Arc<dyn PhotoSourceGateway + Send + Sync>);

impl Deref for PhotoSource {
    type Target = dyn PhotoSourceGateway;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

pub struct Version(pub &'static str);
