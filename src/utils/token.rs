use chrono::Utc;
use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, PartialEq)]
pub enum TokenCheck {
    Valid(Claims),
    Expired,
    Invalid,
}

/// HS256 signing key plus the lifetime given to every issued token.
#[derive(Clone)]
pub struct TokenKeys {
    key: Hmac<Sha256>,
    ttl_secs: i64,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Result<TokenKeys> {
        Ok(TokenKeys {
            key: Hmac::new_from_slice(secret.as_bytes())?,
            ttl_secs,
        })
    }

    pub fn issue(&self, username: &str) -> Result<String> {
        self.issue_at(username, Utc::now().timestamp())
    }

    fn issue_at(&self, username: &str, now: i64) -> Result<String> {
        let claims = Claims {
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
            jti: Uuid::new_v4().to_string(),
        };
        Ok(claims.sign_with_key(&self.key)?)
    }

    pub fn check(&self, token: &str) -> TokenCheck {
        self.check_at(token, Utc::now().timestamp())
    }

    fn check_at(&self, token: &str, now: i64) -> TokenCheck {
        let verified: std::result::Result<Claims, jwt::Error> = token.verify_with_key(&self.key);
        match verified {
            Ok(claims) if claims.exp <= now => TokenCheck::Expired,
            Ok(claims) => TokenCheck::Valid(claims),
            Err(e) => {
                tracing::debug!(error = %e, "rejected token");
                TokenCheck::Invalid
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips_until_expiry() {
        let keys = TokenKeys::new("secret", 60).unwrap();
        let token = keys.issue_at("admin", 1_000).unwrap();

        match keys.check_at(&token, 1_030) {
            TokenCheck::Valid(claims) => {
                assert_eq!(claims.username, "admin");
                assert_eq!(claims.iat, 1_000);
                assert_eq!(claims.exp, 1_060);
            }
            other => panic!("expected a valid token, got {other:?}"),
        }
        assert_eq!(keys.check_at(&token, 1_060), TokenCheck::Expired);
    }

    #[test]
    fn token_signed_with_another_key_is_invalid() {
        let ours = TokenKeys::new("secret", 60).unwrap();
        let theirs = TokenKeys::new("other", 60).unwrap();
        let token = theirs.issue("admin").unwrap();

        assert_eq!(ours.check(&token), TokenCheck::Invalid);
        assert_eq!(ours.check("garbage"), TokenCheck::Invalid);
    }

    #[test]
    fn every_token_gets_its_own_id() {
        let keys = TokenKeys::new("secret", 60).unwrap();
        assert_ne!(keys.issue_at("admin", 5).unwrap(), keys.issue_at("admin", 5).unwrap());
    }
}
