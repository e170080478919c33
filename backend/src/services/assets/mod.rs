//! # Asset Service Module
//!
//! A small standalone persistence endpoint, independent of the popup table:
//! `POST /api/assets` stores an arbitrary `{image, buttons}` blob as a JSON
//! file named by a generated id under the configured data directory, and
//! `GET /api/assets/{asset_id}` reads it back. Not used by the composer.

mod get;
mod save;

use actix_web::web::{self, scope};
use actix_web::Scope;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::PopupError;

const API_PATH: &str = "/api/assets";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", web::post().to(save::process))
        .route("/{asset_id}", web::get().to(get::process))
}

/// A stored asset: the payload fields plus the generated id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub image: String,
    pub buttons: serde_json::Value,
}

/// File-per-asset store under a single directory.
#[derive(Clone)]
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    pub fn save(&self, asset: &Asset) -> Result<(), PopupError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(asset)?;
        fs::write(self.path_for(&asset.id), json)?;
        Ok(())
    }

    /// Returns `None` when no file exists for the id. Ids containing path
    /// separators never match a stored asset.
    pub fn load(&self, id: &str) -> Result<Option<Asset>, PopupError> {
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Ok(None);
        }
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_assets() -> (tempfile::TempDir, AssetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = test_assets();
        let asset = Asset {
            id: "abc-123".into(),
            image: "aGVsbG8=".into(),
            buttons: json!([{ "label": "Buy", "url": "/shop" }]),
        };
        store.save(&asset).unwrap();

        let loaded = store.load("abc-123").unwrap().unwrap();
        assert_eq!(loaded.id, "abc-123");
        assert_eq!(loaded.buttons[0]["label"], "Buy");
    }

    #[test]
    fn missing_or_malformed_ids_load_nothing() {
        let (_dir, store) = test_assets();
        assert!(store.load("nope").unwrap().is_none());
        assert!(store.load("../escape").unwrap().is_none());
    }
}
