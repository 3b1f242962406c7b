//! Food sprite resource
//!
//! The sprite is a text file whose first glyph is drawn in the food cell. It
//! is loaded off the game loop; until it arrives, or if it cannot be read,
//! the renderer falls back to a plain colored block.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodSprite {
    Loading,
    Loaded(String),
    Unavailable,
}

impl FoodSprite {
    /// The glyph to draw, if one is ready
    pub fn glyph(&self) -> Option<&str> {
        match self {
            FoodSprite::Loaded(glyph) => Some(glyph),
            FoodSprite::Loading | FoodSprite::Unavailable => None,
        }
    }
}

/// First visible character of the sprite file
pub fn parse_glyph(raw: &str) -> Option<String> {
    raw.trim().chars().next().map(String::from)
}

pub async fn load_sprite(path: &Path) -> Result<String> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read food sprite {:?}", path))?;
    parse_glyph(&raw).with_context(|| format!("Food sprite {:?} is empty", path))
}

/// Load the sprite on a background task
pub fn spawn_sprite_load(path: PathBuf) -> oneshot::Receiver<Result<String>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        // The receiver is gone if the game already quit
        let _ = tx.send(load_sprite(&path).await);
    });
    rx
}
