use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::database::Document;
use crate::error::Result;
use crate::utils::enums::Outcome;

/// Body every route answers with.
#[derive(Debug, Serialize, Deserialize)]
pub struct Reply {
    pub status: Outcome,
    pub message: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Reply {
    pub fn text(status: Outcome, message: &str) -> Reply {
        Reply {
            status,
            message: Value::String(message.to_string()),
            token: None,
            username: None,
        }
    }

    pub fn ok(message: &str) -> Reply {
        Reply::text(Outcome::Ok, message)
    }

    pub fn documents(documents: Vec<Document>) -> Reply {
        Reply {
            status: Outcome::Ok,
            message: Value::Array(documents.into_iter().map(Value::Object).collect()),
            token: None,
            username: None,
        }
    }

    pub fn items<T: Serialize>(items: &[T]) -> Result<Reply> {
        Ok(Reply {
            status: Outcome::Ok,
            message: serde_json::to_value(items)?,
            token: None,
            username: None,
        })
    }

    pub fn session(token: String, username: String) -> Reply {
        Reply {
            status: Outcome::Ok,
            message: Value::String("success".to_string()),
            token: Some(token),
            username: Some(username),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Body of the legacy `/admin/update` route.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateByName {
    pub name: String,
    pub job: Value,
}
