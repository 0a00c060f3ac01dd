use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Dishes the assistant matched from a natural-language description
    #[serde(default)]
    pub dish_proposals: Vec<DishProposal>,
}

/// A candidate dish suggested by the assistant; selection happens in the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DishProposal {
    #[serde(default)]
    pub dish_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub amount_g: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Request to post a user message to a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}
