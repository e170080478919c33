use serde::{Deserialize, Serialize};

use crate::model::popup::{Frequency, PopupConfig, Weekday};

/// Body of `POST /api/popups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePopupRequest {
    pub heading: String,
    #[serde(rename = "bodyText")]
    pub body_text: String,
    #[serde(rename = "footerText")]
    pub footer_text: String,
    pub frequency: Frequency,
    #[serde(
        rename = "timeFrequency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_frequency: Option<u32>,
    /// Accepted for wire compatibility with older clients; the server always
    /// creates popups active regardless of this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup: Option<bool>,
    #[serde(rename = "onDay", default, skip_serializing_if = "Option::is_none")]
    pub on_day: Option<Weekday>,
    /// Data URL or raw base64; a `data:image/png;base64,` prefix is stripped
    /// before storage.
    #[serde(rename = "previewImage")]
    pub preview_image: String,
}

/// Body of `PUT /api/popups`. `popup` is the new activation flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogglePopupRequest {
    pub uuid: String,
    pub popup: bool,
}

/// Body of `DELETE /api/popups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePopupRequest {
    pub uuid: String,
}

/// Success envelope for create and update: a message plus the stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupResponse {
    pub message: String,
    pub data: PopupConfig,
}

/// Success envelope for delete, and the capacity-rejection body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of a `500` processing failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
