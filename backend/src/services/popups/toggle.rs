//! `PUT /api/popups` — set the activation flag of one record.
//!
//! The body carries the canonical external key (`uuid`) and the new flag;
//! content fields are immutable after creation, activation is the only
//! mutation. An unknown uuid surfaces as a processing error.

use actix_web::{web, HttpResponse, Responder};
use common::model::popup::PopupConfig;
use common::requests::TogglePopupRequest;
use serde_json::json;

use super::store::PopupStore;
use crate::error::PopupError;

pub async fn process(
    store: web::Data<PopupStore>,
    payload: web::Json<TogglePopupRequest>,
) -> impl Responder {
    match toggle_popup(&store, payload.into_inner()) {
        Ok(popup) => HttpResponse::Ok().json(json!({
            "message": "Popup updated successfully",
            "data": popup,
        })),
        Err(e) => e.to_response(),
    }
}

pub fn toggle_popup(
    store: &PopupStore,
    request: TogglePopupRequest,
) -> Result<PopupConfig, PopupError> {
    match store.set_active(&request.uuid, request.popup)? {
        Some(popup) => Ok(popup),
        None => Err(PopupError::Processing(
            format!("no popup matches uuid {}", request.uuid).into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::super::create::create_popup;
    use super::super::test_util::{create_request, test_store};
    use super::*;

    #[test]
    fn deactivation_moves_a_record_to_the_recent_partition() {
        let (_dir, store) = test_store();
        let created = create_popup(&store, create_request()).unwrap();

        let toggled = toggle_popup(
            &store,
            TogglePopupRequest { uuid: created.uuid.clone(), popup: false },
        )
        .unwrap();
        assert!(!toggled.is_active);
        assert_eq!(store.counts().unwrap(), (0, 1));

        // Applying the same flag twice leaves the same state.
        let again = toggle_popup(
            &store,
            TogglePopupRequest { uuid: created.uuid, popup: false },
        )
        .unwrap();
        assert!(!again.is_active);
        assert_eq!(store.counts().unwrap(), (0, 1));
    }

    #[test]
    fn unknown_uuid_is_a_processing_error() {
        let (_dir, store) = test_store();
        let err = toggle_popup(
            &store,
            TogglePopupRequest { uuid: "missing".into(), popup: true },
        )
        .unwrap_err();
        assert!(matches!(err, PopupError::Processing(_)));
    }
}
