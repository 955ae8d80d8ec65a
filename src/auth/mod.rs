//! Bearer-token issuance.
//!
//! Login checks the configured static credentials and issues an HS256 JWT
//! carrying the username as its sole identity claim, expiring one hour
//! after issuance. Downstream middleware validates issuer, audience,
//! signature, and expiry; [`TokenIssuer::verify`] applies the same checks
//! for compatibility testing.

use crate::domain::error::Result;
use crate::infra::config::AuthConfig;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated caller.
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenIssuer {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        TokenIssuer {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        username == self.config.username && password == self.config.password
    }

    pub fn issue(&self, username: &str) -> Result<String> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat,
            exp: iat + self.config.token_ttl_secs,
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(anyhow::Error::from)?;
        Ok(token)
    }

    /// Validates signature, issuer, audience, and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(anyhow::Error::from)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(AuthConfig {
            username: "mile".into(),
            password: "mile123".into(),
            secret: "my32byteverysecretkey12345678901".into(),
            issuer: "YourIssuer".into(),
            audience: "YourAudience".into(),
            token_ttl_secs: 3600,
        })
    }

    #[test]
    fn issued_token_verifies_and_expires_in_one_hour() {
        let issuer = issuer();
        let token = issuer.issue("mile").unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "mile");
        assert_eq!(claims.iss, "YourIssuer");
        assert_eq!(claims.aud, "YourAudience");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn credentials_must_match_exactly() {
        let issuer = issuer();
        assert!(issuer.check_credentials("mile", "mile123"));
        assert!(!issuer.check_credentials("mile", "wrong"));
        assert!(!issuer.check_credentials("other", "mile123"));
    }

    #[test]
    fn token_signed_with_different_key_is_rejected() {
        let token = TokenIssuer::new(AuthConfig {
            secret: "another32bytesecretkey0123456789".into(),
            ..issuer_config()
        })
        .issue("mile")
        .unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn token_for_other_audience_is_rejected() {
        let token = TokenIssuer::new(AuthConfig {
            audience: "SomeoneElse".into(),
            ..issuer_config()
        })
        .issue("mile")
        .unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    fn issuer_config() -> AuthConfig {
        AuthConfig {
            username: "mile".into(),
            password: "mile123".into(),
            secret: "my32byteverysecretkey12345678901".into(),
            issuer: "YourIssuer".into(),
            audience: "YourAudience".into(),
            token_ttl_secs: 3600,
        }
    }
}
