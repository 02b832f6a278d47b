use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}

/// The body returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiIndex {
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}

/// The body returned by a `GET` on the webhook path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookStatus {
    pub status: String,
    pub message: String,
}

impl WebhookStatus {
    pub fn active() -> Self {
        Self {
            status: "Webhook endpoint active".into(),
            message: "Send POST requests to this endpoint to process webhooks".into(),
        }
    }
}
