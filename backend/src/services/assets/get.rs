use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::AssetStore;

pub async fn process(store: web::Data<AssetStore>, asset_id: web::Path<String>) -> impl Responder {
    match store.load(&asset_id) {
        Ok(Some(asset)) => HttpResponse::Ok().json(asset),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Data not found" })),
        Err(e) => e.to_response(),
    }
}
