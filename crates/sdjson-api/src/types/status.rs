//! Token, version and account status records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BaseResponse;
use super::lineup::Lineup;

/// Reply to a token request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    /// Envelope fields.
    #[serde(flatten)]
    pub base: BaseResponse,
    /// The issued bearer token.
    pub token: String,
}

/// Reply to a client version check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionResponse {
    /// Envelope fields.
    #[serde(flatten)]
    pub base: BaseResponse,
    /// Client name echoed back.
    pub client: String,
    /// Latest published version of that client.
    pub version: String,
}

/// Account and system status.
///
/// `system_status[0].status` should be `"Online"` before doing further work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusResponse {
    /// Envelope fields.
    #[serde(flatten)]
    pub base: BaseResponse,
    /// Account details.
    pub account: Option<AccountInfo>,
    /// Lineups on the account.
    pub lineups: Vec<Lineup>,
    /// When the service last refreshed its data.
    pub last_data_update: Option<DateTime<Utc>>,
    /// Notifications for the account.
    pub notifications: Vec<String>,
    /// System status entries.
    pub system_status: Vec<Status>,
}

/// One system status entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    /// When the status was recorded.
    pub date: Option<DateTime<Utc>>,
    /// Status keyword, e.g. `Online`.
    pub status: String,
    /// Free-form details.
    pub details: String,
}

/// Account information attached to a status reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountInfo {
    /// Expiry date as sent by the service.
    pub expires: String,
    /// Account messages.
    pub messages: Vec<String>,
    /// Maximum number of lineups.
    pub max_lineups: i64,
}
