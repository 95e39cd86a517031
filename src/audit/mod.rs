//! Audit trace recording.
//!
//! # Responsibilities
//! - Record a trace for every mutating CRUD operation (create/update/delete)
//! - Keep a bounded in-memory ring of recent traces for the admin surface
//!
//! # Design Decisions
//! - Traces also emit a structured `tracing` event; the log format itself
//!   is a deployment concern, not part of this interface
//! - The ring is bounded; oldest entries drop first

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;

/// One recorded trace.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    /// Monotonic sequence number, unique per process.
    pub seq: u64,
    /// Short machine-readable message, e.g. `group.create`.
    pub message: String,
    /// Operation payload as the service saw it.
    pub payload: Value,
    /// Seconds since epoch.
    pub recorded_at: u64,
}

/// Bounded, thread-safe trace recorder.
pub struct TraceLog {
    entries: Mutex<VecDeque<TraceEntry>>,
    seq: AtomicU64,
    capacity: usize,
}

impl TraceLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            seq: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    /// Record one trace.
    pub fn record(&self, message: &str, payload: Value) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        tracing::info!(seq, trace = message, payload = %payload, "Audit trace");

        let entry = TraceEntry {
            seq,
            message: message.to_string(),
            payload,
            recorded_at,
        };
        let mut entries = self.entries.lock().expect("trace log mutex poisoned");
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Most recent traces, newest last, at most `limit`.
    pub fn recent(&self, limit: usize) -> Vec<TraceEntry> {
        let entries = self.entries.lock().expect("trace log mutex poisoned");
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    /// Total traces recorded over the process lifetime.
    pub fn recorded(&self) -> u64 {
        self.seq.load(Ordering::Relaxed)
    }
}

impl Default for TraceLog {
    fn default() -> Self {
        Self::new(512)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ring_drops_oldest_first() {
        let log = TraceLog::new(2);
        log.record("a", json!(1));
        log.record("b", json!(2));
        log.record("c", json!(3));

        let recent = log.recent(10);
        let messages: Vec<&str> = recent.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["b", "c"]);
        assert_eq!(log.recorded(), 3);
    }

    #[test]
    fn recent_respects_limit() {
        let log = TraceLog::new(8);
        for i in 0..5 {
            log.record("m", json!(i));
        }
        assert_eq!(log.recent(2).len(), 2);
        assert_eq!(log.recent(2)[1].payload, json!(4));
    }
}
