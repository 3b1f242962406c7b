//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Randomness is injected through [`FoodPlacer`], so every tick can be replayed
//! from a seed.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{SimulationEngine, TickResult};
pub use food::FoodPlacer;
pub use state::{CollisionType, GameStatus, GridModel, Position, Snake};
