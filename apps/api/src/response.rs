use serde::Serialize;

/// Standard JSON envelope for successful responses.
/// Error responses use the same shape with `success: false`, built in `errors.rs`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data: Some(data),
            count: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Envelope for list endpoints; `count` mirrors the number of items returned.
    pub fn list(message: impl Into<String>, data: Vec<T>) -> Self {
        let count = data.len();
        ApiResponse {
            success: true,
            message: message.into(),
            data: Some(data),
            count: Some(count),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope with no data payload (e.g. resume deletion).
    pub fn message_only(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data: None,
            count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_includes_data() {
        let body = serde_json::to_value(ApiResponse::new("ok", 7)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "ok");
        assert_eq!(body["data"], 7);
        assert!(body.get("count").is_none());
    }

    #[test]
    fn test_list_envelope_carries_count() {
        let body = serde_json::to_value(ApiResponse::list("ok", vec![1, 2, 3])).unwrap();
        assert_eq!(body["count"], 3);
    }

    #[test]
    fn test_message_only_omits_data() {
        let body = serde_json::to_value(ApiResponse::message_only("deleted")).unwrap();
        assert!(body.get("data").is_none());
        assert!(body.get("count").is_none());
    }
}
