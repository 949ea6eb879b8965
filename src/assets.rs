//! Sprite lookup
//!
//! The game only needs to know which sprite keys are available; decoding
//! and uploading images happens outside the simulation. Entities ask the
//! [`Assets`] store by key at draw time and fall back to a procedural
//! placeholder when nothing is bound.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A loaded (or loadable) image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub key: String,
    /// Source URL or path from the manifest
    pub path: String,
}

/// Read-only sprite store
pub trait Assets {
    fn get(&self, key: &str) -> Option<&Sprite>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Store with nothing in it; every entity draws its placeholder
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl Assets for NoAssets {
    fn get(&self, _key: &str) -> Option<&Sprite> {
        None
    }
}

/// Sprites keyed by name
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    sprites: HashMap<String, Sprite>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `{ "key": "path", ... }` manifest.
    ///
    /// Keys starting with `_` are comments and skipped, as are entries whose
    /// value is not a string.
    pub fn from_manifest_json(json: &str) -> Result<Self, serde_json::Error> {
        let manifest: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (key, value) in manifest {
            if key.starts_with('_') {
                continue;
            }
            match value.as_str() {
                Some(path) => catalog.insert(key, path),
                None => log::warn!("Asset manifest: \"{}\" has no path, skipped", key),
            }
        }
        log::info!("Asset manifest: {} sprites", catalog.len());
        Ok(catalog)
    }

    /// Parse a manifest, degrading to an empty catalog on bad input
    pub fn from_manifest_or_empty(json: &str) -> Self {
        Self::from_manifest_json(json).unwrap_or_else(|e| {
            log::warn!("Could not parse asset manifest, using placeholders: {}", e);
            Self::new()
        })
    }

    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<String>) {
        let key = key.into();
        let sprite = Sprite {
            key: key.clone(),
            path: path.into(),
        };
        self.sprites.insert(key, sprite);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl Assets for AssetCatalog {
    fn get(&self, key: &str) -> Option<&Sprite> {
        self.sprites.get(key)
    }
}
