use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Serialize, Serializer};

/// Response envelope shared by every endpoint:
/// `{ "status": <int>, "message": <string>, "data"?: <payload> }`.
///
/// The HTTP status of the response always equals the `status` field.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 response carrying data
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data: Some(data),
        }
    }

    /// 201 response carrying the created resource
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Data-less response, used for failures
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}
