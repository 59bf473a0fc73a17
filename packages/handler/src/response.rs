use serde::{Deserialize, Serialize};

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// `{ statusCode, body }` result handed back to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub body: String,
}

/// JSON document serialized into [`ResponseEnvelope::body`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl ResponseEnvelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::with_message(STATUS_OK, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(STATUS_INTERNAL_ERROR, message)
    }

    fn with_message(status_code: u16, message: impl Into<String>) -> Self {
        let body = serde_json::json!({ "message": message.into() }).to_string();
        Self { status_code, body }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// Parse the body back into its message document.
    pub fn message_body(&self) -> serde_json::Result<MessageBody> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_gateway_field_names() {
        let envelope = ResponseEnvelope::ok("hi");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "statusCode": 200, "body": "{\"message\":\"hi\"}" })
        );
    }

    #[test]
    fn error_body_escapes_message() {
        let envelope = ResponseEnvelope::internal_error("bad \"quote\"");

        assert_eq!(envelope.status_code, STATUS_INTERNAL_ERROR);
        assert!(!envelope.is_success());
        assert_eq!(envelope.message_body().unwrap().message, "bad \"quote\"");
    }
}
