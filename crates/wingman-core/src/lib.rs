//! Stream reassembly, event recognition, and session aggregation for Wingman.

mod clock;
mod error;
mod group;
mod health;
mod ingest;
mod meditation;
pub mod parser;
pub mod reassembler;
mod room;
pub mod scrub;
mod session;

pub use clock::{format_hms, xp_per_hour, SessionClock};
pub use error::WingmanError;
pub use group::Group;
pub use health::HealthBand;
pub use ingest::{ingest_queue, IngestReceiver, IngestSender, StreamIngestor};
pub use meditation::{MeditationTimer, Regeneration};
pub use reassembler::StreamReassembler;
pub use room::RoomOccupants;
pub use session::{Session, SessionOptions};

/// Result type for Wingman operations.
pub type Result<T> = std::result::Result<T, WingmanError>;
