//! Hand-off between the capture side and the session aggregator.
//!
//! The producer pushes lines and room snapshots in arrival order; the
//! consumer drains whatever is available without waiting. The channel is
//! unbounded, so a slow consumer only costs memory.

use crate::parser::room::parse_room_entities;
use crate::reassembler::StreamReassembler;
use crate::{Result, WingmanError};
use tokio::sync::mpsc;
use tracing::{debug, trace};
use wingman_types::IngestItem;

/// Create a connected producer/consumer pair.
pub fn ingest_queue() -> (IngestSender, IngestReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (IngestSender { tx }, IngestReceiver { rx })
}

/// Producer half. Cheap to clone.
#[derive(Debug, Clone)]
pub struct IngestSender {
    tx: mpsc::UnboundedSender<IngestItem>,
}

impl IngestSender {
    /// Enqueue one item. Fails only once the receiver is gone.
    pub fn push(&self, item: impl Into<IngestItem>) -> Result<()> {
        self.tx.send(item.into()).map_err(|_| WingmanError::QueueClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half.
#[derive(Debug)]
pub struct IngestReceiver {
    rx: mpsc::UnboundedReceiver<IngestItem>,
}

impl IngestReceiver {
    /// Take everything queued right now, oldest first. Never blocks.
    pub fn drain(&mut self) -> Vec<IngestItem> {
        let mut items = Vec::new();
        while let Ok(item) = self.rx.try_recv() {
            items.push(item);
        }
        items
    }

    /// Wait for the next item. `None` once every sender is dropped and the
    /// queue is empty.
    pub async fn recv(&mut self) -> Option<IngestItem> {
        self.rx.recv().await
    }
}

/// Producer-side pipeline: reassemble raw chunks and queue the results.
#[derive(Debug)]
pub struct StreamIngestor {
    reassembler: StreamReassembler,
    sender: IngestSender,
}

impl StreamIngestor {
    pub fn new(sender: IngestSender) -> Self {
        Self {
            reassembler: StreamReassembler::new(),
            sender,
        }
    }

    /// Feed one raw chunk. Completed non-blank lines are queued first, then a
    /// room snapshot if the chunk listed the room's creatures. Returns the
    /// number of items queued.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<usize> {
        let text = self.reassembler.decode(chunk);
        let room = parse_room_entities(&text);

        let mut queued = 0;
        for line in self.reassembler.feed_str(&text) {
            if line.trim().is_empty() {
                continue;
            }
            trace!(target: "wingman::ingest", "Queued line: {}", line);
            self.sender.push(IngestItem::Line(line))?;
            queued += 1;
        }

        if let Some(creatures) = room {
            debug!(target: "wingman::room", "Room listing with {} creature(s)", creatures.len());
            self.sender.push(IngestItem::RoomOccupants(creatures))?;
            queued += 1;
        }

        Ok(queued)
    }

    /// Text held back waiting for a newline.
    pub fn backlog(&self) -> &str {
        self.reassembler.backlog()
    }
}
