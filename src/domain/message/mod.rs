pub mod model;
pub mod service;

pub use model::{DishProposal, Message, MessageRole, SendMessageRequest};
pub use service::MessageService;
