/*
 * Defines the value types exchanged between the lookup coordinator, the
 * resolver boundary and the presentation layer: submitted requests, resolver
 * payloads, finished results and the bounded recent-history list. These are
 * plain data carriers; the state machine producing them lives in
 * `coordinator.rs`.
 */
use std::time::{Duration, Instant};

/// Number of recently submitted inputs kept for quick re-submission.
pub const RECENT_HISTORY_CAPACITY: usize = 3;

// Distinguishes fresh text-entry submissions from re-submissions triggered
// through one of the recent-history slots. Only fresh submissions shift the
// history; a slot re-submission leaves the slots as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOrigin {
    TextEntry,
    RecentSlot,
}

// A single lookup in flight. Created on a successful submit and consumed by
// the dispatcher. `submitted_at` anchors the elapsed-time measurement that
// is reported with the completion.
#[derive(Debug, Clone, Copy)]
pub struct LookupRequest {
    pub code: i32,
    pub submitted_at: Instant,
}

/*
 * The resolver's successful payload. Only `description` participates in
 * result formatting; the long description and help URI are extra detail the
 * system service sometimes returns and are surfaced through debug logging.
 * An absent or empty description means the service had no answer for the
 * code, which is a normal outcome rather than an error.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDetails {
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub help_uri: Option<String>,
}

impl ResolvedDetails {
    pub fn with_description(description: impl Into<String>) -> Self {
        ResolvedDetails {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// True when the service returned a non-empty description.
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}

// Outcome of a single `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Parsing succeeded and a lookup for the given code was issued.
    Started(i32),
    /// Another lookup is still in flight; the input was dropped, not queued.
    Ignored,
    /// The input was not a valid decimal or 0x-prefixed hex integer.
    ParseError(String),
}

/*
 * The finished product of one lookup, built by the coordinator when the
 * resolver completes. Immutable once created and consumed once by the
 * presentation layer. `found` is true only when the resolver produced a
 * non-empty description; `failure` carries the rendered resolver error when
 * the lookup failed outright.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub code: i32,
    pub description: Option<String>,
    pub elapsed: Duration,
    pub found: bool,
    pub failure: Option<String>,
}

impl LookupResult {
    /*
     * Renders the transcript line for this result. A successful lookup
     * reports the elapsed time, the code in decimal and in 8-digit uppercase
     * hex, and the description. A lookup the service could not answer gets
     * the fixed "no result" line, and a resolver failure a generic notice.
     */
    pub fn transcript_line(&self) -> String {
        if let Some(failure) = &self.failure {
            return format!(
                "Failed to retrieve error code 0x{:08X}: {}",
                self.code, failure
            );
        }
        if !self.found {
            return "Sorry, no result found".to_string();
        }
        format!(
            "Retrieved error code in {}ms\nError Code: {}\nError Code: 0x{:08X}\nError Message: {}",
            self.elapsed.as_millis(),
            self.code,
            self.code,
            self.description.as_deref().unwrap_or_default()
        )
    }
}

/*
 * The bounded, most-recent-first list of successfully submitted raw inputs.
 * Insertion at the front evicts the oldest entry once the capacity of
 * RECENT_HISTORY_CAPACITY is reached. Inputs that fail to parse never reach
 * this list.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentHistory {
    entries: Vec<String>,
}

impl RecentHistory {
    pub fn new() -> Self {
        RecentHistory {
            entries: Vec::new(),
        }
    }

    // Restores a history snapshot, e.g. one loaded from the config file.
    // Anything beyond the capacity is discarded.
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = RecentHistory { entries };
        history.entries.truncate(RECENT_HISTORY_CAPACITY);
        history
    }

    pub fn push_front(&mut self, entry: String) {
        self.entries.insert(0, entry);
        self.entries.truncate(RECENT_HISTORY_CAPACITY);
    }

    /// The stored inputs, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
