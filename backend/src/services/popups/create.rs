//! `POST /api/popups` — create a popup configuration.
//!
//! The handler strips a known data-URL prefix from the preview image, runs
//! the admission check against the current counts, assigns a fresh uuid and
//! inserts the record active. A capacity rejection returns `400` with the
//! reason and inserts nothing; any store failure returns the generic `500`.

use actix_web::{web, HttpResponse, Responder};
use common::model::popup::PopupConfig;
use common::requests::CreatePopupRequest;
use serde_json::json;
use uuid::Uuid;

use super::admission::check_capacity;
use super::store::PopupStore;
use crate::error::PopupError;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

pub async fn process(
    store: web::Data<PopupStore>,
    payload: web::Json<CreatePopupRequest>,
) -> impl Responder {
    match create_popup(&store, payload.into_inner()) {
        Ok(popup) => HttpResponse::Ok().json(json!({
            "message": "Popup configuration received successfully",
            "data": popup,
        })),
        Err(e) => e.to_response(),
    }
}

pub fn create_popup(
    store: &PopupStore,
    request: CreatePopupRequest,
) -> Result<PopupConfig, PopupError> {
    // No transaction spans the count and the insert; two near-simultaneous
    // creations can both pass the check. Accepted, not mitigated.
    let (active, inactive) = store.counts()?;
    check_capacity(active, inactive)
        .map_err(|limit| PopupError::Capacity(limit.message().to_string()))?;

    let preview_image = request
        .preview_image
        .strip_prefix(DATA_URL_PREFIX)
        .unwrap_or(&request.preview_image)
        .to_string();

    let popup = PopupConfig {
        id: None,
        uuid: Uuid::new_v4().to_string(),
        heading: request.heading,
        body_text: request.body_text,
        footer_text: request.footer_text,
        preview_image,
        frequency: request.frequency,
        time_frequency: request.time_frequency,
        on_day: request.on_day,
        is_active: true,
    };
    store.insert(&popup)?;
    Ok(popup)
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{create_request, test_store};
    use super::*;

    #[test]
    fn created_popups_are_active_with_unique_uuids() {
        let (_dir, store) = test_store();
        let first = create_popup(&store, create_request()).unwrap();
        let second = create_popup(&store, create_request()).unwrap();

        assert!(first.is_active);
        assert!(second.is_active);
        assert_ne!(first.uuid, second.uuid);
        assert_eq!(store.counts().unwrap(), (2, 0));
    }

    #[test]
    fn data_url_prefix_is_stripped_before_storage() {
        let (_dir, store) = test_store();
        let mut request = create_request();
        request.preview_image = format!("{}{}", DATA_URL_PREFIX, "aGVsbG8=");
        let popup = create_popup(&store, request).unwrap();
        assert_eq!(popup.preview_image, "aGVsbG8=");

        // Raw base64 passes through untouched.
        let stored = store.select_all().unwrap();
        assert_eq!(stored[0].preview_image, "aGVsbG8=");
    }

    #[test]
    fn capacity_rejection_inserts_nothing() {
        let (_dir, store) = test_store();
        create_popup(&store, create_request()).unwrap();
        create_popup(&store, create_request()).unwrap();

        let err = create_popup(&store, create_request()).unwrap_err();
        assert!(matches!(err, PopupError::Capacity(_)));
        assert_eq!(store.select_all().unwrap().len(), 2);
    }

    #[test]
    fn admission_follows_the_lifecycle_scenario() {
        let (_dir, store) = test_store();

        // Two active, zero recent: full.
        let a = create_popup(&store, create_request()).unwrap();
        create_popup(&store, create_request()).unwrap();
        assert!(matches!(
            create_popup(&store, create_request()),
            Err(PopupError::Capacity(_))
        ));

        // Deactivate one (1 active, 1 recent): still rejected.
        store.set_active(&a.uuid, false).unwrap();
        assert!(matches!(
            create_popup(&store, create_request()),
            Err(PopupError::Capacity(_))
        ));

        // Delete the recent one (1 active, 0 recent): permitted again.
        store.delete(&a.uuid).unwrap();
        assert!(create_popup(&store, create_request()).is_ok());
    }
}
