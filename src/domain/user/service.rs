use super::{UpdateUserRequest, User};
use crate::domain::shared::Pagination;
use crate::error::ApiResult;
use crate::infrastructure::http::{ApiClient, RequestDescriptor};
use std::sync::Arc;

const USERS_PATH: &str = "/api/v1/users";

/// Account administration; the server restricts these calls to superusers.
pub struct UserService {
    client: Arc<ApiClient>,
}

impl UserService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_users(&self, pagination: Pagination) -> ApiResult<Vec<User>> {
        let request = pagination.apply(RequestDescriptor::get(USERS_PATH));
        self.client.fetch_json(&request).await
    }

    pub async fn get_user(&self, user_id: i64) -> ApiResult<User> {
        self.client
            .fetch_json(&RequestDescriptor::get(user_path(user_id)))
            .await
    }

    pub async fn update_user(&self, user_id: i64, request: &UpdateUserRequest) -> ApiResult<User> {
        let request = RequestDescriptor::put(user_path(user_id)).with_json(request)?;
        self.client.fetch_json(&request).await
    }

    pub async fn delete_user(&self, user_id: i64) -> ApiResult<()> {
        self.client
            .send(&RequestDescriptor::delete(user_path(user_id)))
            .await
    }
}

fn user_path(user_id: i64) -> String {
    format!("{}/{}", USERS_PATH, user_id)
}
