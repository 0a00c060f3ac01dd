pub mod model;
pub mod service;

pub use model::{ChangePasswordRequest, Profile, UpdateProfileRequest};
pub use service::ProfileService;
