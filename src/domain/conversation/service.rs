use super::{Conversation, CreateConversationRequest};
use crate::domain::shared::Pagination;
use crate::error::ApiResult;
use crate::infrastructure::http::{ApiClient, RequestDescriptor};
use std::sync::Arc;

pub(crate) const CONVERSATIONS_PATH: &str = "/api/v1/conversations";

pub struct ConversationService {
    client: Arc<ApiClient>,
}

impl ConversationService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_conversations(&self, pagination: Pagination) -> ApiResult<Vec<Conversation>> {
        let request = pagination.apply(RequestDescriptor::get(CONVERSATIONS_PATH));
        self.client.fetch_json(&request).await
    }

    pub async fn get_conversation(&self, conversation_id: i64) -> ApiResult<Conversation> {
        self.client
            .fetch_json(&RequestDescriptor::get(conversation_path(conversation_id)))
            .await
    }

    pub async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> ApiResult<Conversation> {
        let request = RequestDescriptor::post(CONVERSATIONS_PATH).with_json(request)?;
        self.client.fetch_json(&request).await
    }

    pub async fn delete_conversation(&self, conversation_id: i64) -> ApiResult<()> {
        self.client
            .send(&RequestDescriptor::delete(conversation_path(conversation_id)))
            .await
    }
}

pub(crate) fn conversation_path(conversation_id: i64) -> String {
    format!("{}/{}", CONVERSATIONS_PATH, conversation_id)
}
