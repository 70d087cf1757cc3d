use serde::{Deserialize, Serialize};

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicFailedReply {
    pub errors: Vec<BasicFailedReplyElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicFailedReplyElement {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}
