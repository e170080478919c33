//! # Popup Service Module
//!
//! Aggregates the CRUD endpoints for popup configurations under
//! `/api/popups`, one verb per operation on the same path:
//!
//! - **`POST`** (`create::process`) — admission-checked creation; assigns a
//!   fresh uuid and stores the record active.
//! - **`GET`** (`list::process`) — every stored record, unfiltered.
//! - **`PUT`** (`toggle::process`) — sets the activation flag by uuid.
//! - **`DELETE`** (`delete::process`) — removes a record by uuid.
//!
//! Any other verb on the path answers `405` with an `Allow` header listing
//! the four supported methods. The `store` sub-module holds the SQLite
//! repository and `admission` the pre-insert capacity rule.

pub mod admission;
mod create;
mod delete;
mod list;
pub mod store;
mod toggle;

use actix_web::web::{self, scope};
use actix_web::{HttpResponse, Scope};

/// The base path for the popup configuration endpoint.
const API_PATH: &str = "/api/popups";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", web::post().to(create::process))
        .route("", web::get().to(list::process))
        .route("", web::put().to(toggle::process))
        .route("", web::delete().to(delete::process))
        .default_service(web::route().to(method_not_allowed))
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header(("Allow", "POST, GET, PUT, DELETE"))
        .finish()
}

#[cfg(test)]
pub(crate) mod test_util {
    use common::model::popup::{Frequency, PopupConfig};
    use common::requests::CreatePopupRequest;
    use tempfile::TempDir;

    use super::store::PopupStore;

    /// A store over a fresh on-disk database. The TempDir must outlive the
    /// store, so both are returned.
    pub fn test_store() -> (TempDir, PopupStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PopupStore::new(dir.path().join("popups.sqlite"));
        store.init_schema().unwrap();
        (dir, store)
    }

    pub fn sample_popup(uuid: &str) -> PopupConfig {
        PopupConfig {
            id: None,
            uuid: uuid.to_string(),
            heading: "Summer sale".into(),
            body_text: "Everything half off".into(),
            footer_text: "While stocks last".into(),
            preview_image: "aGVsbG8=".into(),
            frequency: Frequency::Repeatedly,
            time_frequency: Some(30),
            on_day: None,
            is_active: true,
        }
    }

    pub fn create_request() -> CreatePopupRequest {
        CreatePopupRequest {
            heading: "Summer sale".into(),
            body_text: "Everything half off".into(),
            footer_text: "While stocks last".into(),
            frequency: Frequency::Once,
            time_frequency: None,
            popup: Some(true),
            on_day: None,
            preview_image: "aGVsbG8=".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::App;

    use super::store::PopupStore;
    use super::test_util::{create_request, test_store};
    use super::*;

    #[actix_web::test]
    async fn unknown_verb_answers_405_naming_the_supported_methods() {
        let (_dir, store) = test_store();
        let app = init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(configure_routes()),
        )
        .await;

        let resp = call_service(&app, TestRequest::patch().uri("/api/popups").to_request()).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let allow = resp.headers().get("Allow").unwrap().to_str().unwrap();
        assert_eq!(allow, "POST, GET, PUT, DELETE");
    }

    #[actix_web::test]
    async fn capacity_rejection_surfaces_as_400_with_the_reason() {
        let (_dir, store) = test_store();
        let app = init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(configure_routes()),
        )
        .await;

        for _ in 0..2 {
            let req = TestRequest::post()
                .uri("/api/popups")
                .set_json(create_request())
                .to_request();
            assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = TestRequest::post()
            .uri("/api/popups")
            .set_json(create_request())
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = read_body_json(resp).await;
        assert_eq!(body["message"], "Maximum number of active popups reached");
    }

    #[actix_web::test]
    async fn store_failure_surfaces_as_500_with_a_generic_error() {
        // A database path under a directory that does not exist fails on
        // every open; the client only ever sees the generic body.
        let dir = tempfile::tempdir().unwrap();
        let store = PopupStore::new(dir.path().join("missing").join("popups.sqlite"));
        let app = init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(configure_routes()),
        )
        .await;

        let resp = call_service(&app, TestRequest::get().uri("/api/popups").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = read_body_json(resp).await;
        assert_eq!(body["error"], "Failed to process request");
        assert!(body.get("message").is_none());
    }
}
