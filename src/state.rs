use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::data::database::Store;
use crate::error::Result;
use crate::utils::mailer::{LogMailer, Mailer, SmtpMailer};
use crate::utils::token::TokenKeys;

/// Everything a handler needs, handed to each one through `web::Data`.
pub struct Portal {
    pub store: Store,
    pub mailer: Arc<dyn Mailer>,
    pub tokens: TokenKeys,
    pub hash_secret: String,
    pub require_token: bool,
    pub static_dir: PathBuf,
}

impl Portal {
    pub fn new(store: Store, mailer: Arc<dyn Mailer>, settings: &Settings) -> Result<Portal> {
        Ok(Portal {
            store,
            mailer,
            tokens: TokenKeys::new(&settings.token_secret, settings.token_ttl_secs)?,
            hash_secret: settings.hash_secret.clone(),
            require_token: settings.require_token,
            static_dir: PathBuf::from(&settings.static_dir),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Portal> {
        let store = Store::open(&settings.database_path)?;
        tracing::info!(path = %settings.database_path, "document store opened");

        let mailer: Arc<dyn Mailer> = match &settings.smtp {
            Some(smtp) => Arc::new(SmtpMailer::new(
                &smtp.server,
                &smtp.user,
                &smtp.pass,
                &smtp.from_email,
            )?),
            None => Arc::new(LogMailer),
        };

        Portal::new(store, mailer, settings)
    }
}
