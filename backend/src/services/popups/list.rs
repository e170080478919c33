//! `GET /api/popups` — all stored configurations, unfiltered.
//!
//! The client partitions the result by `isActive` into the active and recent
//! lists; the server applies no filter or ordering guarantee beyond rowid.

use actix_web::{web, HttpResponse, Responder};
use common::model::popup::PopupConfig;

use super::store::PopupStore;
use crate::error::PopupError;

pub async fn process(store: web::Data<PopupStore>) -> impl Responder {
    match list_popups(&store) {
        Ok(popups) => HttpResponse::Ok().json(popups),
        Err(e) => e.to_response(),
    }
}

pub fn list_popups(store: &PopupStore) -> Result<Vec<PopupConfig>, PopupError> {
    store.select_all()
}

#[cfg(test)]
mod tests {
    use super::super::create::create_popup;
    use super::super::test_util::{create_request, test_store};
    use super::*;

    #[test]
    fn partition_matches_creates_minus_deletes_with_last_set_flags() {
        let (_dir, store) = test_store();
        let a = create_popup(&store, create_request()).unwrap();
        let b = create_popup(&store, create_request()).unwrap();
        store.set_active(&a.uuid, false).unwrap();
        store.delete(&b.uuid).unwrap();

        let all = list_popups(&store).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].uuid, a.uuid);
        assert!(!all[0].is_active);
    }
}
