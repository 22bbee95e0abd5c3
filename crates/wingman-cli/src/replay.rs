//! Replay of a captured transcript as if it were arriving from the network.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use wingman_core::{StreamIngestor, WingmanError};

/// Where captured bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaySource {
    Stdin,
    File(PathBuf),
}

impl ReplaySource {
    /// `-` means stdin.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            ReplaySource::Stdin
        } else {
            ReplaySource::File(PathBuf::from(arg))
        }
    }
}

/// Totals for one finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub bytes: u64,
    pub chunks: u64,
    pub items: u64,
}

/// Read `reader` in chunks of at most `chunk_size` bytes and feed each one to
/// the ingestor. Stops early, without error, once the session side is gone.
pub async fn replay<R>(mut reader: R, chunk_size: usize, mut ingestor: StreamIngestor) -> Result<ReplayStats>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut stats = ReplayStats::default();

    loop {
        let n = reader.read(&mut buf).await.context("Failed to read capture source")?;
        if n == 0 {
            break;
        }
        stats.bytes += n as u64;
        stats.chunks += 1;

        match ingestor.feed(&buf[..n]) {
            Ok(items) => stats.items += items as u64,
            Err(WingmanError::QueueClosed) => {
                debug!(target: "wingman::ingest", "Session closed, stopping replay");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !ingestor.backlog().is_empty() {
        debug!(
            target: "wingman::ingest",
            "Replay ended with {} byte(s) of unterminated text",
            ingestor.backlog().len()
        );
    }
    info!(
        target: "wingman::ingest",
        "Replay finished: {} byte(s) in {} chunk(s), {} item(s) queued",
        stats.bytes,
        stats.chunks,
        stats.items
    );
    Ok(stats)
}

/// Open `source` and replay it on a background task.
pub async fn spawn_replay(
    source: ReplaySource,
    chunk_size: usize,
    ingestor: StreamIngestor,
) -> Result<JoinHandle<Result<ReplayStats>>> {
    let handle = match source {
        ReplaySource::Stdin => {
            tokio::spawn(async move { replay(tokio::io::stdin(), chunk_size, ingestor).await })
        }
        ReplaySource::File(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            tokio::spawn(async move { replay(file, chunk_size, ingestor).await })
        }
    };
    Ok(handle)
}
