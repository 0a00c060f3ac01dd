pub mod client;
pub mod request;
pub mod response;

pub use client::{ApiClient, LOGOUT_PATH, REFRESH_PATH};
pub use request::{AttemptState, RequestDescriptor};
pub use response::ApiPayload;
