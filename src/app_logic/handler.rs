use crate::core::{
    ConfigManagerOperations, LookupCompletion, LookupCoordinator, LookupDispatchOperations,
    PersistedHistory, SubmitOrigin, SubmitOutcome,
};
use crate::shell_layer::{ShellCommand, ShellEvent, ShellEventHandler, SlotIndex};

use super::session_view_state::SessionViewState;
use super::ui_constants::QUERY_PENDING_TEXT;

use std::sync::Arc;
use std::time::Instant;

// Made pub(crate) for access from handler_tests.rs
pub(crate) const APP_NAME_FOR_CONFIG: &str = "HrLookup";

/*
 * Manages the application state and UI logic in a shell-agnostic manner.
 * It processes events received from the presentation shell, drives the
 * lookup coordinator, and generates commands to update what the user sees.
 * It depends on a `ConfigManagerOperations` trait for persisting the
 * recent-history slots between runs.
 */
pub struct LookupAppLogic {
    pub(crate) coordinator: LookupCoordinator,
    pub(crate) view_state: SessionViewState,
    pub(crate) config_manager: Arc<dyn ConfigManagerOperations>,
}

impl LookupAppLogic {
    /*
     * Initializes a new instance of the application logic. The dispatcher is
     * handed to the coordinator, which is the only component allowed to
     * issue lookups; the config manager is kept for history persistence.
     */
    pub fn new(
        dispatcher: Arc<dyn LookupDispatchOperations>,
        config_manager: Arc<dyn ConfigManagerOperations>,
    ) -> Self {
        LookupAppLogic {
            coordinator: LookupCoordinator::new(dispatcher),
            view_state: SessionViewState::new(),
            config_manager,
        }
    }

    /*
     * Restores the recent-history slots persisted by a previous run. Load
     * failures are logged and the session simply starts with empty slots;
     * a missing snapshot is the normal first-run case.
     */
    fn restore_persisted_history(&mut self) -> Vec<ShellCommand> {
        match self.config_manager.load_recent_history(APP_NAME_FOR_CONFIG) {
            Ok(Some(history)) if !history.entries.is_empty() => {
                log::info!(
                    "AppLogic: restored {} recent code(s) from the previous session.",
                    history.entries.len()
                );
                self.coordinator.restore_history(history.entries);
                self.view_state
                    .set_recent_slots(self.coordinator.history().entries());
                vec![ShellCommand::SetRecentSlots {
                    slots: self.view_state.recent_slots_for_display(),
                }]
            }
            Ok(_) => {
                log::debug!("AppLogic: no persisted recent history found.");
                Vec::new()
            }
            Err(e) => {
                log::error!("AppLogic: failed to load recent history: {e}");
                Vec::new()
            }
        }
    }

    // Persistence failures must never disturb the session; they are logged
    // and otherwise ignored.
    fn persist_history(&self) {
        let snapshot = PersistedHistory {
            entries: self.coordinator.history().entries().to_vec(),
        };
        if let Err(e) = self
            .config_manager
            .save_recent_history(APP_NAME_FOR_CONFIG, &snapshot)
        {
            log::error!("AppLogic: failed to save recent history: {e}");
        }
    }

    /*
     * Common submission path for fresh text entries and slot re-submissions.
     * Only a fresh entry that actually starts a lookup shifts the slots and
     * triggers persistence; a slot re-submission leaves the displayed slots
     * untouched, and a parse failure only produces a transcript entry.
     */
    fn submit_input(&mut self, raw_input: &str, origin: SubmitOrigin) -> Vec<ShellCommand> {
        let mut commands = Vec::new();
        match self.coordinator.submit(raw_input, origin, Instant::now()) {
            SubmitOutcome::Started(code) => {
                log::debug!("AppLogic: lookup started for code {code}.");
                if origin == SubmitOrigin::TextEntry {
                    self.view_state
                        .set_recent_slots(self.coordinator.history().entries());
                    self.persist_history();
                    commands.push(ShellCommand::SetRecentSlots {
                        slots: self.view_state.recent_slots_for_display(),
                    });
                }
            }
            SubmitOutcome::Ignored => {
                // Deliberately silent toward the user; the in-flight lookup
                // keeps reporting through the ping notices.
                log::debug!("AppLogic: submission ignored while a lookup is pending.");
            }
            SubmitOutcome::ParseError(message) => {
                self.view_state.prepend_transcript_entry(message.clone());
                commands.push(ShellCommand::PrependTranscriptLine { text: message });
            }
        }
        commands
    }

    fn handle_slot_activation(&mut self, slot: SlotIndex) -> Vec<ShellCommand> {
        let Some(entry) = self.view_state.recent_slot(slot.0).map(str::to_string) else {
            log::debug!(
                "AppLogic: recent slot {} is empty, nothing to re-submit.",
                slot.0 + 1
            );
            return Vec::new();
        };
        self.submit_input(&entry, SubmitOrigin::RecentSlot)
    }

    fn handle_completion(&mut self, completion: LookupCompletion) -> Vec<ShellCommand> {
        let result = self.coordinator.on_resolved(completion);
        let line = result.transcript_line();
        self.view_state.prepend_transcript_entry(line.clone());
        vec![ShellCommand::PrependTranscriptLine { text: line }]
    }
}

impl ShellEventHandler for LookupAppLogic {
    fn handle_event(&mut self, event: ShellEvent) -> Vec<ShellCommand> {
        match event {
            ShellEvent::SessionStarted => self.restore_persisted_history(),
            ShellEvent::InputSubmitted { text } => {
                self.submit_input(&text, SubmitOrigin::TextEntry)
            }
            ShellEvent::RecentSlotActivated { slot } => self.handle_slot_activation(slot),
            ShellEvent::PingDue => {
                if self.coordinator.take_due_ping(Instant::now()) {
                    self.view_state
                        .prepend_transcript_entry(QUERY_PENDING_TEXT.to_string());
                    vec![ShellCommand::PrependTranscriptLine {
                        text: QUERY_PENDING_TEXT.to_string(),
                    }]
                } else {
                    Vec::new()
                }
            }
            ShellEvent::LookupCompleted { completion } => self.handle_completion(completion),
            ShellEvent::QuitRequested => {
                log::info!("AppLogic: quit requested.");
                vec![ShellCommand::Quit]
            }
        }
    }

    fn next_wakeup(&self) -> Option<Instant> {
        self.coordinator.next_ping_deadline()
    }

    fn on_quit(&mut self) {
        log::info!("AppLogic: on_quit called by shell. Application is exiting.");
    }
}
