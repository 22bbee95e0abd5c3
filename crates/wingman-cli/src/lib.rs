//! Wingman command line library: configuration, logging, transcript replay,
//! and session rendering.
//!
//! Kept separate from main.rs so the pieces can be tested on their own.

pub mod config;
pub mod logging;
pub mod render;
pub mod replay;
