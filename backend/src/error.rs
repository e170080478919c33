//! Service error model.
//!
//! The API distinguishes exactly two failure kinds: a capacity rejection the
//! operator can act on (the admission check tripped), and everything else.
//! Store, serialization and I/O failures all collapse into `Processing`; the
//! underlying error is logged server-side and never returned to the client.

use actix_web::HttpResponse;
use common::requests::{ErrorResponse, MessageResponse};
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopupError {
    /// Admission check failed. The message names the threshold that tripped.
    #[error("{0}")]
    Capacity(String),

    /// Any store or I/O failure. Details stay server-side.
    #[error("Failed to process request")]
    Processing(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PopupError {
    /// Single mapping from error kind to HTTP response, shared by every
    /// handler.
    pub fn to_response(&self) -> HttpResponse {
        match self {
            PopupError::Capacity(reason) => HttpResponse::BadRequest().json(MessageResponse {
                message: reason.clone(),
            }),
            PopupError::Processing(source) => {
                error!("request failed: {}", source);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to process request".to_string(),
                })
            }
        }
    }
}

impl From<rusqlite::Error> for PopupError {
    fn from(e: rusqlite::Error) -> Self {
        PopupError::Processing(Box::new(e))
    }
}

impl From<std::io::Error> for PopupError {
    fn from(e: std::io::Error) -> Self {
        PopupError::Processing(Box::new(e))
    }
}

impl From<serde_json::Error> for PopupError {
    fn from(e: serde_json::Error) -> Self {
        PopupError::Processing(Box::new(e))
    }
}
