use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub server: String,
    pub user: String,
    pub pass: String,
    pub from_email: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub static_dir: String,
    pub hash_secret: String,
    pub token_secret: String,
    /// Lifetime of login tokens. The portal has always issued 60 second
    /// tokens; raise it here rather than in code.
    pub token_ttl_secs: i64,
    pub require_token: bool,
    pub cors_origin: Option<String>,
    pub smtp: Option<SmtpSettings>,
}

impl Settings {
    pub fn load() -> Result<Self, String> {
        Ok(Self {
            host: try_load("HOST", "0.0.0.0")?,
            port: try_load("PORT", "4000")?,
            database_path: try_load("DATABASE_PATH", "portal.db")?,
            static_dir: try_load("STATIC_DIR", "./dist/collegeAdmission")?,
            hash_secret: load_secret("HASH_SECRET"),
            token_secret: load_secret("TOKEN_SECRET"),
            token_ttl_secs: try_load("TOKEN_TTL_SECS", "60")?,
            require_token: try_load("REQUIRE_TOKEN", "false")?,
            cors_origin: optional("CORS_ORIGIN"),
            smtp: load_smtp(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            database_path: ":memory:".to_string(),
            static_dir: "./dist/collegeAdmission".to_string(),
            hash_secret: Uuid::new_v4().to_string(),
            token_secret: Uuid::new_v4().to_string(),
            token_ttl_secs: 60,
            require_token: false,
            cors_origin: None,
            smtp: None,
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, String>
where
    T::Err: Display,
{
    let raw = optional(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| format!("Invalid {key} value {raw:?}: {e}"))
}

fn load_secret(key: &str) -> String {
    optional(key).unwrap_or_else(|| {
        warn!("{key} not set, generated a per-process secret; sessions and hashes will not survive a restart");
        Uuid::new_v4().to_string()
    })
}

fn load_smtp() -> Option<SmtpSettings> {
    let Some(server) = optional("SMTP_SERVER") else {
        info!("SMTP_SERVER not set, notifications will only be logged");
        return None;
    };
    Some(SmtpSettings {
        server,
        user: optional("SMTP_USER").unwrap_or_default(),
        pass: optional("SMTP_PASS").unwrap_or_default(),
        from_email: optional("FROM_EMAIL").unwrap_or_else(|| "portal@localhost".to_string()),
    })
}
