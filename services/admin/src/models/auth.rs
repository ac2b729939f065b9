//! Login payloads and the user profile

use serde::{Deserialize, Serialize};

/// User login credentials
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for user login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(
        rename = "accessToken",
        alias = "token",
        alias = "access_token",
        default
    )]
    pub access_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Profile of the logged in administrator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    /// Any additional fields the backend includes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
