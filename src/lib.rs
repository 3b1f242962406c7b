//! Grid snake - a single-player snake game for the terminal
//!
//! This library provides:
//! - Core game logic: grid model, food placement, tick simulation (game module)
//! - Keyboard mapping and the pending-direction slot (input module)
//! - The session state machine and tick scheduler (controller module)
//! - TUI rendering (render module) and in-memory session stats (metrics module)
//! - The interactive terminal runtime (app module)

pub mod app;
pub mod controller;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
