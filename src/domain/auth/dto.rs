use serde::{Deserialize, Serialize};

/// Password login request
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Second-factor verification for a pending login
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyLoginRequest {
    pub login_request_id: String,
    pub code: String,
}

/// Token set issued on login, OTP verification or OAuth callback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    pub expires_in: i64,
}

/// Pending login waiting for a one-time code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OtpChallenge {
    pub login_request_id: String,
    pub expires_in: i64,
}

/// Body of a login response: either tokens or an OTP challenge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LoginOutcome {
    Authenticated(TokenResponse),
    OtpRequired(OtpChallenge),
}

/// Refresh token request
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Refresh response; `refresh_token` is present only when the server rotates it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}
