use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::utils::enums::Outcome;
use crate::utils::structures::Reply;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Token error: {0}")]
    Token(#[from] jwt::Error),

    #[error("Invalid signing key")]
    Key(hmac::digest::InvalidLength),

    #[error("Mail error: {0}")]
    Mail(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;

impl From<hmac::digest::InvalidLength> for PortalError {
    fn from(e: hmac::digest::InvalidLength) -> Self {
        PortalError::Key(e)
    }
}

impl ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    // Details stay in the server log; the caller only learns that something failed.
    fn error_response(&self) -> HttpResponse {
        tracing::error!(error = %self, "request failed");
        HttpResponse::build(self.status_code()).json(Reply::text(Outcome::StoreError, "internal error"))
    }
}
