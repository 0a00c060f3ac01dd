use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Successful outcome of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    /// Parsed JSON body.
    Json(Value),
    /// HTTP 204; the body is never parsed.
    NoContent,
    /// 2xx with a non-JSON content type, e.g. a plain-text acknowledgement.
    Acknowledged { status: u16, status_text: String },
}

impl ApiPayload {
    /// Decode a JSON payload into `T`. Anything else is an invalid response.
    pub fn into_json<T: DeserializeOwned>(self) -> ApiResult<T> {
        match self {
            ApiPayload::Json(value) => {
                serde_json::from_value(value).map_err(ApiError::invalid_response)
            }
            ApiPayload::NoContent => Err(ApiError::invalid_response(
                "expected a JSON body but got 204 No Content",
            )),
            ApiPayload::Acknowledged { status, .. } => Err(ApiError::invalid_response(format!(
                "expected a JSON body but got a non-JSON {} response",
                status
            ))),
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, ApiPayload::NoContent)
    }
}
