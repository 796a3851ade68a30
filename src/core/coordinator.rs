/*
 * The lookup coordinator: a small state machine owning the
 * at-most-one-lookup-in-flight policy, the recent-history list and the ping
 * schedule used for "still querying" feedback. Submissions are parsed here,
 * dispatched through `LookupDispatchOperations`, and finished by feeding the
 * dispatcher's completion back into `on_resolved`.
 *
 * The ping schedule is part of the Busy phase itself rather than a separate
 * timer object, so arming and disarming cannot drift apart from the phase
 * transitions that require them.
 */
use super::dispatch::{LookupCompletion, LookupDispatchOperations};
use super::models::{
    LookupRequest, LookupResult, RecentHistory, SubmitOrigin, SubmitOutcome,
};

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Delay before the first "still querying" ping of a fresh lookup.
pub const PING_INITIAL_DELAY: Duration = Duration::from_millis(10);
/// Interval between subsequent pings while the lookup stays pending.
pub const PING_INTERVAL: Duration = Duration::from_secs(1);

// Idle/Busy phase of the coordinator. The ping deadline lives inside `Busy`,
// so leaving the phase disables the schedule with no separate bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupPhase {
    Idle,
    Busy {
        code: i32,
        started_at: Instant,
        next_ping: Instant,
    },
}

pub struct LookupCoordinator {
    phase: LookupPhase,
    history: RecentHistory,
    dispatcher: Arc<dyn LookupDispatchOperations>,
}

impl LookupCoordinator {
    pub fn new(dispatcher: Arc<dyn LookupDispatchOperations>) -> Self {
        LookupCoordinator {
            phase: LookupPhase::Idle,
            history: RecentHistory::new(),
            dispatcher,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, LookupPhase::Busy { .. })
    }

    pub fn history(&self) -> &RecentHistory {
        &self.history
    }

    /// Replaces the history with a snapshot, e.g. one loaded from the config
    /// file at startup.
    pub fn restore_history(&mut self, entries: Vec<String>) {
        self.history = RecentHistory::from_entries(entries);
    }

    /*
     * Handles one submission attempt. The input is trimmed, then parsed as
     * base-16 when it carries the exact "0x" prefix and as base-10 otherwise.
     * While a lookup is in flight every submission is ignored outright; this
     * is a drop policy, not a queue. On success the trimmed input is pushed
     * onto the history (fresh text entries only), the Busy phase is entered
     * with the ping schedule armed, and the request goes to the dispatcher.
     */
    pub fn submit(&mut self, raw_input: &str, origin: SubmitOrigin, now: Instant) -> SubmitOutcome {
        if self.is_busy() {
            log::debug!("Coordinator: submission ignored, a lookup is already in flight.");
            return SubmitOutcome::Ignored;
        }

        let trimmed = raw_input.trim();
        let code = match Self::parse_code(trimmed) {
            Ok(code) => code,
            Err(message) => {
                log::debug!("Coordinator: could not parse '{trimmed}': {message}");
                return SubmitOutcome::ParseError(message);
            }
        };

        if origin == SubmitOrigin::TextEntry {
            self.history.push_front(trimmed.to_string());
        }

        self.phase = LookupPhase::Busy {
            code,
            started_at: now,
            next_ping: now + PING_INITIAL_DELAY,
        };
        log::info!("Coordinator: starting lookup for code {code} (0x{code:08X}).");
        self.dispatcher.dispatch(LookupRequest {
            code,
            submitted_at: now,
        });
        SubmitOutcome::Started(code)
    }

    /*
     * Parses a trimmed error-code string. A "0x" prefix selects base-16 with
     * case-insensitive digits; the magnitude may use the full 32-bit range
     * and is reinterpreted as the signed bit pattern, so "0x80004005" yields
     * the negative HRESULT it denotes. Everything else parses as a signed
     * base-10 integer. The returned message is the standard library's parse
     * failure description.
     */
    fn parse_code(trimmed: &str) -> Result<i32, String> {
        if let Some(hex_digits) = trimmed.strip_prefix("0x") {
            u32::from_str_radix(hex_digits, 16)
                .map(|magnitude| magnitude as i32)
                .map_err(|e| e.to_string())
        } else {
            trimmed.parse::<i32>().map_err(|e| e.to_string())
        }
    }

    /*
     * Consumes a completion delivered by the dispatcher and returns the
     * finished result. The Busy phase is left unconditionally, on every
     * completion path including resolver failures and worker panics; nothing
     * else ever re-enables submissions, so this must not be skipped.
     */
    pub fn on_resolved(&mut self, completion: LookupCompletion) -> LookupResult {
        match std::mem::replace(&mut self.phase, LookupPhase::Idle) {
            LookupPhase::Busy { code, .. } => {
                if code != completion.code {
                    log::warn!(
                        "Coordinator: completion for code {} arrived while code {} was pending.",
                        completion.code,
                        code
                    );
                }
            }
            LookupPhase::Idle => {
                log::warn!(
                    "Coordinator: completion for code {} arrived while idle.",
                    completion.code
                );
            }
        }

        match completion.outcome {
            Ok(details) => {
                if let Some(long_description) = &details.long_description {
                    log::debug!("Coordinator: long description: {long_description}");
                }
                if let Some(help_uri) = &details.help_uri {
                    log::debug!("Coordinator: help URI: {help_uri}");
                }
                let found = details.has_description();
                if found {
                    log::info!(
                        "Coordinator: resolved code {} in {}ms.",
                        completion.code,
                        completion.elapsed.as_millis()
                    );
                } else {
                    log::info!("Coordinator: no description for code {}.", completion.code);
                }
                LookupResult {
                    code: completion.code,
                    description: if found { details.description } else { None },
                    elapsed: completion.elapsed,
                    found,
                    failure: None,
                }
            }
            Err(e) => {
                log::error!(
                    "Coordinator: lookup for code {} failed: {e}",
                    completion.code
                );
                LookupResult {
                    code: completion.code,
                    description: None,
                    elapsed: completion.elapsed,
                    found: false,
                    failure: Some(e.to_string()),
                }
            }
        }
    }

    /// Next instant at which a "still querying" ping is due, if a lookup is
    /// pending. Idle coordinators have no deadline at all.
    pub fn next_ping_deadline(&self) -> Option<Instant> {
        match self.phase {
            LookupPhase::Busy { next_ping, .. } => Some(next_ping),
            LookupPhase::Idle => None,
        }
    }

    // Reports whether a ping is due at `now` and, if so, advances the
    // schedule by one interval. Spurious calls while idle or ahead of the
    // deadline are harmless and return false.
    pub fn take_due_ping(&mut self, now: Instant) -> bool {
        match &mut self.phase {
            LookupPhase::Busy {
                code,
                started_at,
                next_ping,
            } if now >= *next_ping => {
                log::debug!(
                    "Coordinator: lookup for code {} still pending after {}ms.",
                    code,
                    now.duration_since(*started_at).as_millis()
                );
                *next_ping = now + PING_INTERVAL;
                true
            }
            _ => false,
        }
    }
}
