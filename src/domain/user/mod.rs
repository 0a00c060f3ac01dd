pub mod model;
pub mod service;

pub use model::{UpdateUserRequest, User};
pub use service::UserService;
