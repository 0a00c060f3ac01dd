use super::{Message, SendMessageRequest};
use crate::domain::conversation::service::conversation_path;
use crate::domain::shared::Pagination;
use crate::error::ApiResult;
use crate::infrastructure::http::{ApiClient, RequestDescriptor};
use std::sync::Arc;

const MESSAGES_PATH: &str = "/api/v1/messages";

pub struct MessageService {
    client: Arc<ApiClient>,
}

impl MessageService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_messages(
        &self,
        conversation_id: i64,
        pagination: Pagination,
    ) -> ApiResult<Vec<Message>> {
        let request = pagination.apply(RequestDescriptor::get(messages_path(conversation_id)));
        self.client.fetch_json(&request).await
    }

    /// Post a user message; the server answers with the assistant's reply.
    pub async fn send_message(&self, conversation_id: i64, content: &str) -> ApiResult<Message> {
        let request = RequestDescriptor::post(messages_path(conversation_id)).with_json(
            &SendMessageRequest {
                content: content.to_string(),
            },
        )?;

        let reply: Message = self.client.fetch_json(&request).await?;
        tracing::debug!(
            conversation_id,
            proposals = reply.dish_proposals.len(),
            "Assistant replied"
        );
        Ok(reply)
    }

    pub async fn delete_message(&self, message_id: i64) -> ApiResult<()> {
        self.client
            .send(&RequestDescriptor::delete(format!(
                "{}/{}",
                MESSAGES_PATH, message_id
            )))
            .await
    }
}

fn messages_path(conversation_id: i64) -> String {
    format!("{}/messages", conversation_path(conversation_id))
}
