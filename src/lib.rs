//! Wrap-around Snake on a fixed grid.
//!
//! The core (`game`, `snake`, `food`) knows nothing about terminals; the loop
//! in `runtime` talks to its collaborators through the `Surface`,
//! `InputSource` and `TickPacer` traits.

pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod render;
pub mod runtime;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
