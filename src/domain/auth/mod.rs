pub mod dto;
pub mod service;

pub use dto::{
    LoginOutcome, LoginRequest, OtpChallenge, RefreshResponse, RefreshTokenRequest,
    TokenResponse, VerifyLoginRequest,
};
pub use service::AuthService;
