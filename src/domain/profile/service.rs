use super::{ChangePasswordRequest, Profile, UpdateProfileRequest};
use crate::error::ApiResult;
use crate::infrastructure::http::{ApiClient, RequestDescriptor};
use std::sync::Arc;

const PROFILE_PATH: &str = "/api/v1/profile";
const PASSWORD_PATH: &str = "/api/v1/profile/password";

pub struct ProfileService {
    client: Arc<ApiClient>,
}

impl ProfileService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_profile(&self) -> ApiResult<Profile> {
        self.client
            .fetch_json(&RequestDescriptor::get(PROFILE_PATH))
            .await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<Profile> {
        let request = RequestDescriptor::put(PROFILE_PATH).with_json(request)?;
        self.client.fetch_json(&request).await
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> ApiResult<()> {
        let request = RequestDescriptor::put(PASSWORD_PATH).with_json(&ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        })?;
        self.client.send(&request).await
    }
}
