//! Terminal rendering

pub mod renderer;
pub mod sprite;

pub use renderer::Renderer;
pub use sprite::{FoodSprite, load_sprite, spawn_sprite_load};
