use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Claims of an access token issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user id
    pub sub: String,
    pub email: String,
    /// Expiry time as Unix timestamp
    pub exp: u64,
}

/// Validates HS256 access tokens with a shared secret.
pub struct JwtState {
    jwt_service: jwt_service::JwtService,
}

impl JwtState {
    pub fn new(secret: &str) -> Self {
        Self {
            jwt_service: jwt_service::JwtService::new(secret),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        self.jwt_service.decode(token)
    }

    pub fn generate_token(&self, sub: &str, email: &str, valid_for: time::Duration) -> Result<String> {
        let exp = u64::try_from((time::OffsetDateTime::now_utc() + valid_for).unix_timestamp())?;
        let claims = Claims {
            sub: sub.to_owned(),
            email: email.to_owned(),
            exp,
        };
        self.jwt_service.encode(&claims)
    }
}

#[cfg(feature = "jwt")]
mod jwt_service {
    use super::{Claims, Result};
    use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

    pub struct JwtService {
        encoding_key: EncodingKey,
        decoding_key: DecodingKey,
    }

    impl JwtService {
        pub fn new(secret: &str) -> Self {
            Self {
                encoding_key: EncodingKey::from_secret(secret.as_bytes()),
                decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            }
        }
        pub fn encode(&self, claims: &Claims) -> Result<String> {
            let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;
            Ok(token)
        }
        pub fn decode(&self, token: &str) -> Result<Claims> {
            let token_data = decode::<Claims>(
                token,
                &self.decoding_key,
                &Validation::new(Algorithm::HS256),
            )?;
            Ok(token_data.claims)
        }
    }
}

#[cfg(not(feature = "jwt"))]
mod jwt_service {
    use super::{Claims, Result};
    use anyhow::anyhow;

    pub struct JwtService;

    impl JwtService {
        pub fn new(_secret: &str) -> Self {
            Self
        }
        pub fn encode(&self, _claims: &Claims) -> Result<String> {
            Err(anyhow!("Access tokens are not supported"))
        }
        pub fn decode(&self, _token: &str) -> Result<Claims> {
            Err(anyhow!("Access tokens are not supported"))
        }
    }
}
