pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ApiError, ApiResult};
pub use infrastructure::http::{ApiClient, ApiPayload, AttemptState, RequestDescriptor};
pub use infrastructure::token_store::TokenStore;
