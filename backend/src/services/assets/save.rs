use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{Asset, AssetStore};
use crate::error::PopupError;

#[derive(Debug, Deserialize)]
pub struct SaveAssetRequest {
    pub image: String,
    pub buttons: serde_json::Value,
}

pub async fn process(
    store: web::Data<AssetStore>,
    payload: web::Json<SaveAssetRequest>,
) -> impl Responder {
    match save_asset(&store, payload.into_inner()) {
        Ok(id) => HttpResponse::Ok().json(json!({
            "message": "Data saved successfully",
            "id": id,
        })),
        Err(e) => e.to_response(),
    }
}

pub fn save_asset(store: &AssetStore, request: SaveAssetRequest) -> Result<String, PopupError> {
    let asset = Asset {
        id: Uuid::new_v4().to_string(),
        image: request.image,
        buttons: request.buttons,
    };
    store.save(&asset)?;
    Ok(asset.id)
}
