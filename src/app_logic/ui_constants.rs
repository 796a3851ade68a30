/*
 * Defines shared constants for the presenter's user-visible strings and the
 * recent-slot surface. The shell maps these logical values to whatever its
 * toolkit actually renders.
 */
use crate::core::RECENT_HISTORY_CAPACITY;

// Number of recent-slot surfaces exposed by the presentation shell. Matches
// the bounded history by construction.
pub const RECENT_SLOT_COUNT: usize = RECENT_HISTORY_CAPACITY;

// Transcript line prepended on each ping while a lookup is still pending.
pub const QUERY_PENDING_TEXT: &str = "Querying HResult...";
