pub mod model;
pub mod service;

pub use model::{Conversation, CreateConversationRequest};
pub use service::ConversationService;
