//! Shared types for the Wingman session tracker.

mod character;
mod effect;
mod event;
mod snapshot;
mod status;

pub use character::*;
pub use effect::*;
pub use event::*;
pub use snapshot::*;
pub use status::*;
