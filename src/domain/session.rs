use serde::{Deserialize, Serialize};

pub const TOKEN_KEY: &str = "token";
pub const EXPIRE_TIME_KEY: &str = "expire_time";
pub const EXPIRE_TIMESTAMP_KEY: &str = "expire_timestamp";

/// Session values as persisted in key-value storage. Any of them may be
/// missing when no login happened yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub token: Option<String>,
    pub expire_time: Option<String>,
    pub expire_timestamp: Option<String>,
}

/// The part of a login response the session keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub expire_time: String,
}
