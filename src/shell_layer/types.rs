/*
 * This module defines the data types used for communication between the
 * application logic and the presentation shell. It includes the
 * platform-agnostic event types (`ShellEvent`), commands for the shell
 * (`ShellCommand`), the recent-slot identifier, and the
 * `ShellEventHandler` trait that the application logic must implement.
 */
use crate::core::LookupCompletion;
use std::time::Instant;

// Identifies one of the recent-history slots, zero-based from the most
// recent entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotIndex(pub usize);

// Events flowing from the shell to the application logic. A submit button
// and the Enter key both arrive as `InputSubmitted`; the shell owns no
// submission logic of its own.
#[derive(Debug)]
pub enum ShellEvent {
    // Signals that the shell is up and the presenter may restore state.
    SessionStarted,
    InputSubmitted {
        text: String,
    },
    RecentSlotActivated {
        slot: SlotIndex,
    },
    // Synthesized by the shell whenever the handler's wakeup deadline
    // passes. The handler decides whether a ping is actually due, so
    // spurious wakeups are harmless.
    PingDue,
    LookupCompleted {
        completion: LookupCompletion,
    },
    QuitRequested,
}

// Commands sent from the application logic to the shell. These instruct the
// shell to update what the user sees; the shell performs no interpretation
// of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    // A finished transcript entry; the newest entry belongs above older ones.
    PrependTranscriptLine { text: String },
    // Current contents of the recent slots, most recent first. Empty strings
    // mark unused slots.
    SetRecentSlots { slots: Vec<String> },
    Quit,
}

// A trait to be implemented by the application logic layer to handle shell
// events. The shell calls `handle_event` for every event and executes the
// returned commands; `next_wakeup` tells the shell when to synthesize the
// next `PingDue` event.
pub trait ShellEventHandler: Send {
    fn handle_event(&mut self, event: ShellEvent) -> Vec<ShellCommand>;

    /// The next instant the handler wants a `PingDue` event, if any.
    fn next_wakeup(&self) -> Option<Instant>;

    // Called once when the shell is about to exit its event loop.
    fn on_quit(&mut self) {}
}
