//! `DELETE /api/popups` — remove one record by uuid.
//!
//! Deleting a uuid that matches nothing still acknowledges success: the
//! underlying filter simply hits zero rows, which makes repeated deletes
//! harmless.

use actix_web::{web, HttpResponse, Responder};
use common::requests::DeletePopupRequest;
use serde_json::json;

use super::store::PopupStore;
use crate::error::PopupError;

pub async fn process(
    store: web::Data<PopupStore>,
    payload: web::Json<DeletePopupRequest>,
) -> impl Responder {
    match delete_popup(&store, payload.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "Popup deleted successfully",
        })),
        Err(e) => e.to_response(),
    }
}

pub fn delete_popup(store: &PopupStore, request: DeletePopupRequest) -> Result<(), PopupError> {
    store.delete(&request.uuid)
}

#[cfg(test)]
mod tests {
    use super::super::create::create_popup;
    use super::super::test_util::{create_request, test_store};
    use super::*;

    #[test]
    fn delete_of_a_missing_uuid_succeeds_with_no_state_change() {
        let (_dir, store) = test_store();
        let kept = create_popup(&store, create_request()).unwrap();

        delete_popup(&store, DeletePopupRequest { uuid: "missing".into() }).unwrap();
        let all = store.select_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].uuid, kept.uuid);

        delete_popup(&store, DeletePopupRequest { uuid: kept.uuid }).unwrap();
        assert!(store.select_all().unwrap().is_empty());
    }
}
