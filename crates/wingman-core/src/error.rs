//! Error types for Wingman.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WingmanError {
    /// A classified member reached health banding with no hit points left.
    /// The game never reports this, so it points at a caller bug.
    #[error("Invalid health for {name}: current hit points {current} must be at least 1")]
    InvalidHealth { name: String, current: i32 },

    #[error("Ingest queue closed")]
    QueueClosed,
}
