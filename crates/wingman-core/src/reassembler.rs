//! Reassembly of network payloads into complete lines.
//!
//! Payloads arrive split at arbitrary byte offsets: in the middle of a line,
//! a multi-byte character, or an escape sequence. The reassembler keeps a
//! backlog per connection and only releases a line once its terminator has
//! been seen, so lines come out in exactly the order their newlines arrived.

use crate::parser::effects::refresh_window;
use crate::scrub;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Per-connection line reassembly state.
#[derive(Debug, Default)]
pub struct StreamReassembler {
    /// Scrubbed text after the last newline seen so far.
    backlog: String,
    /// Leading bytes of a multi-byte character cut off by the previous chunk.
    pending_utf8: Vec<u8>,
}

impl StreamReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode, scrub, and split a raw chunk. Returns every line completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.decode(chunk);
        self.feed_str(&text)
    }

    /// Decode a raw chunk as UTF-8, carrying an incomplete trailing character
    /// over to the next call. Invalid bytes become U+FFFD.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending_utf8);
        bytes.extend_from_slice(chunk);

        let keep = incomplete_tail_len(&bytes);
        self.pending_utf8 = bytes.split_off(bytes.len() - keep);

        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Append already-decoded text and return the lines it completes.
    pub fn feed_str(&mut self, text: &str) -> Vec<String> {
        let text = suppress_refreshes(text);
        self.backlog.push_str(&scrub::strip(&text));

        let Some(last_newline) = self.backlog.rfind('\n') else {
            return Vec::new();
        };

        let rest = self.backlog.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.backlog, rest);

        let lines: Vec<String> = complete[..last_newline]
            .split('\n')
            .map(|line| line.replace('\r', ""))
            .collect();

        trace!(
            target: "wingman::ingest",
            "Reassembled {} line(s), {} byte(s) held back",
            lines.len(),
            self.backlog.len()
        );
        lines
    }

    /// Text received after the last newline.
    pub fn backlog(&self) -> &str {
        &self.backlog
    }

    /// Drop any partial line and partial character.
    pub fn reset(&mut self) {
        self.backlog.clear();
        self.pending_utf8.clear();
    }
}

/// Remove every effect refresh window from a chunk.
///
/// When an effect's end marker is followed in the same chunk by that effect's
/// start marker, everything from the end marker through the start marker (and
/// its line terminator) is dropped, so the refresh never surfaces as an end.
pub fn suppress_refreshes(text: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(text);
    while let Some((effect, window)) = refresh_window(&current) {
        debug!(target: "wingman::ingest", "Suppressed refresh of {}", effect);
        let mut next = String::with_capacity(current.len() - window.len());
        next.push_str(&current[..window.start]);
        next.push_str(&current[window.end..]);
        current = Cow::Owned(next);
    }
    current
}

/// Number of trailing bytes that start a UTF-8 character but do not finish it.
fn incomplete_tail_len(bytes: &[u8]) -> usize {
    let start = bytes.len().saturating_sub(3);
    for i in (start..bytes.len()).rev() {
        let byte = bytes[i];
        if byte & 0b1100_0000 == 0b1000_0000 {
            continue;
        }
        let needed = match byte {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return 0,
        };
        let available = bytes.len() - i;
        return if available < needed { available } else { 0 };
    }
    0
}
