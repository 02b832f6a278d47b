use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use price_watch_engine::PriceTrackerError;
use thiserror::Error;

use crate::integrations::shopify::ProductConversionError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Webhook signature verification failed. {0}")]
    VerificationFailure(String),
    #[error("The webhook payload is malformed. {0}")]
    MalformedPayload(String),
    #[error("Could not send the price alert. {0}")]
    NotificationFailure(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Method not allowed. {0}")]
    MethodNotAllowed(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::VerificationFailure(_) => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::MalformedPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotificationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<PriceTrackerError> for ServerError {
    fn from(e: PriceTrackerError) -> Self {
        match e {
            PriceTrackerError::StoreError(e) => Self::BackendError(e.to_string()),
            PriceTrackerError::NotificationFailed(e) => Self::NotificationFailure(e.to_string()),
        }
    }
}

impl From<ProductConversionError> for ServerError {
    fn from(e: ProductConversionError) -> Self {
        Self::MalformedPayload(e.to_string())
    }
}
