use super::{
    LoginOutcome, LoginRequest, RefreshResponse, TokenResponse, VerifyLoginRequest,
};
use crate::error::ApiResult;
use crate::infrastructure::http::{ApiClient, AttemptState, RequestDescriptor};
use std::sync::Arc;

const LOGIN_PATH: &str = "/api/v1/auth/login";
const VERIFY_LOGIN_PATH: &str = "/api/v1/auth/verify-login";

pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Password login. Stores the tokens unless the server asks for an OTP.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginOutcome> {
        let request = RequestDescriptor::post(LOGIN_PATH).with_json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        // A 401 here means bad credentials, not an expired session
        let outcome: LoginOutcome = self
            .client
            .execute_as(&request, AttemptState::Retried)
            .await?
            .into_json()?;

        match &outcome {
            LoginOutcome::Authenticated(tokens) => {
                self.accept_tokens(tokens);
                tracing::info!("Logged in");
            }
            LoginOutcome::OtpRequired(challenge) => {
                tracing::info!(
                    expires_in = challenge.expires_in,
                    "Login pending one-time code verification"
                );
            }
        }

        Ok(outcome)
    }

    /// Complete a pending login with its one-time code.
    pub async fn verify_login(&self, login_request_id: &str, code: &str) -> ApiResult<TokenResponse> {
        let request = RequestDescriptor::post(VERIFY_LOGIN_PATH).with_json(&VerifyLoginRequest {
            login_request_id: login_request_id.to_string(),
            code: code.to_string(),
        })?;

        let tokens: TokenResponse = self
            .client
            .execute_as(&request, AttemptState::Retried)
            .await?
            .into_json()?;

        self.accept_tokens(&tokens);
        tracing::info!("Login verified");
        Ok(tokens)
    }

    /// Install a token set obtained elsewhere, e.g. from an OAuth callback.
    ///
    /// A token set without a refresh token replaces the whole session, so a
    /// refresh token from an earlier login cannot outlive it.
    pub fn accept_tokens(&self, tokens: &TokenResponse) {
        let store = self.client.token_store();
        match tokens.refresh_token.as_deref() {
            Some(refresh_token) => {
                store.set_tokens(&tokens.access_token, refresh_token, tokens.expires_in)
            }
            None => {
                store.clear_tokens();
                store.set_access_token(&tokens.access_token, tokens.expires_in);
            }
        }
    }

    /// Refresh the session with the stored refresh token.
    pub async fn refresh(&self) -> ApiResult<RefreshResponse> {
        self.client.refresh_session().await
    }

    pub async fn logout(&self) {
        self.client.logout().await;
        tracing::info!("Logged out");
    }

    /// An access token is stored and has not expired yet.
    pub fn is_authenticated(&self) -> bool {
        let store = self.client.token_store();
        store.access_token().is_some() && !store.is_token_expired()
    }
}
