use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
}

/// Acknowledgement body returned to webhook callers. `received` is true for
/// every acknowledged delivery, including those whose application failed and
/// was recorded; external systems must not retry these.
#[derive(Debug, Serialize)]
pub struct WebhookAckDto {
    pub received: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookAckDto {
    pub fn ok(result: &str) -> Self {
        Self {
            received: true,
            result: Some(result.to_string()),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            received: true,
            result: None,
            error: Some(error),
        }
    }
}
