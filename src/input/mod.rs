//! Keyboard input: raw key mapping and the pending-direction slot

pub mod controller;
pub mod handler;

pub use controller::InputController;
pub use handler::{InputHandler, KeyAction};
