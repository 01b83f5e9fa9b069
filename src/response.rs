use serde::{Deserialize, Serialize};

/// JSON envelope shared by the validation and chirp endpoints.
///
/// Every field is optional and left out of the payload when it carries no
/// information, so `{"valid":true}` and `{"error":"..."}` share one type.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaned_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ApiResponse {
    pub fn error(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn valid() -> Self {
        Self {
            valid: Some(true),
            ..Self::default()
        }
    }

    pub fn cleaned(cleaned_body: String) -> Self {
        Self {
            cleaned_body: Some(cleaned_body),
            ..Self::default()
        }
    }
}
