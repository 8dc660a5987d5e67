use serde::Deserialize;
use serde::Serialize;

/// Tag carried by every reply next to its human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Ok,
    NotFound,
    Conflict,
    Invalid,
    Unauthorized,
    StoreError,
}

/// Named document collections. The names are the ones existing clients
/// and data dumps already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Jobs,
    Applications,
    Shortlist,
    Admins,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Jobs => "Admin",
            Collection::Applications => "applications",
            Collection::Shortlist => "shortlist",
            Collection::Admins => "AdminList",
        }
    }
}
