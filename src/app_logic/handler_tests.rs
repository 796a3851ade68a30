use super::handler::*;
use super::ui_constants::QUERY_PENDING_TEXT;

use crate::core::{
    ConfigError, ConfigManagerOperations, LookupCompletion, LookupDispatchOperations,
    LookupRequest, PersistedHistory, ResolvedDetails, ResolverError,
};
use crate::shell_layer::{ShellCommand, ShellEvent, ShellEventHandler, SlotIndex};

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/*
 * This module contains unit tests for `LookupAppLogic` from the
 * `super::handler` module. It utilizes mock implementations of the core
 * dependencies (`ConfigManagerOperations`, `LookupDispatchOperations`) to
 * isolate the presenter's behavior. Tests focus on event handling, the
 * single-in-flight policy as seen from the shell, recent-slot behavior,
 * command generation and error paths.
 */

fn clone_config_error(e: &ConfigError) -> ConfigError {
    match e {
        ConfigError::Io(io_err) => ConfigError::Io(io::Error::new(io_err.kind(), "mocked io error")),
        ConfigError::NoConfigDirectory => ConfigError::NoConfigDirectory,
        // serde_json errors cannot be constructed directly; an I/O stand-in
        // is close enough for exercising the error path.
        ConfigError::Serde(_) => ConfigError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            "mocked serde error",
        )),
    }
}

// --- MockConfigManager ---
struct MockConfigManager {
    load_result: Mutex<Result<Option<PersistedHistory>, ConfigError>>,
    save_result: Mutex<Result<(), ConfigError>>,
    saved_histories: Mutex<Vec<(String, PersistedHistory)>>,
}

impl MockConfigManager {
    fn new() -> Self {
        MockConfigManager {
            load_result: Mutex::new(Ok(None)),
            save_result: Mutex::new(Ok(())),
            saved_histories: Mutex::new(Vec::new()),
        }
    }

    fn set_load_result(&self, result: Result<Option<PersistedHistory>, ConfigError>) {
        *self.load_result.lock().unwrap() = result;
    }

    fn set_save_result(&self, result: Result<(), ConfigError>) {
        *self.save_result.lock().unwrap() = result;
    }

    fn get_saved_histories(&self) -> Vec<(String, PersistedHistory)> {
        self.saved_histories.lock().unwrap().clone()
    }
}

impl ConfigManagerOperations for MockConfigManager {
    fn load_recent_history(&self, _app_name: &str) -> Result<Option<PersistedHistory>, ConfigError> {
        match &*self.load_result.lock().unwrap() {
            Ok(opt) => Ok(opt.clone()),
            Err(e) => Err(clone_config_error(e)),
        }
    }

    fn save_recent_history(
        &self,
        app_name: &str,
        history: &PersistedHistory,
    ) -> Result<(), ConfigError> {
        match &*self.save_result.lock().unwrap() {
            Ok(()) => {
                self.saved_histories
                    .lock()
                    .unwrap()
                    .push((app_name.to_string(), history.clone()));
                Ok(())
            }
            Err(e) => Err(clone_config_error(e)),
        }
    }
}
// --- End MockConfigManager ---

// --- MockDispatcher ---
struct MockDispatcher {
    dispatched: Mutex<Vec<LookupRequest>>,
}

impl MockDispatcher {
    fn new() -> Self {
        MockDispatcher {
            dispatched: Mutex::new(Vec::new()),
        }
    }

    fn dispatched_codes(&self) -> Vec<i32> {
        self.dispatched.lock().unwrap().iter().map(|r| r.code).collect()
    }
}

impl LookupDispatchOperations for MockDispatcher {
    fn dispatch(&self, request: LookupRequest) {
        self.dispatched.lock().unwrap().push(request);
    }
}
// --- End MockDispatcher ---

fn setup_logic() -> (LookupAppLogic, Arc<MockDispatcher>, Arc<MockConfigManager>) {
    crate::initialize_logging(); // Ensure logging is initialized for tests
    let dispatcher = Arc::new(MockDispatcher::new());
    let config_manager = Arc::new(MockConfigManager::new());
    let logic = LookupAppLogic::new(dispatcher.clone(), config_manager.clone());
    (logic, dispatcher, config_manager)
}

fn submitted(text: &str) -> ShellEvent {
    ShellEvent::InputSubmitted {
        text: text.to_string(),
    }
}

fn success_completion(code: i32, description: &str, ms: u64) -> ShellEvent {
    ShellEvent::LookupCompleted {
        completion: LookupCompletion {
            code,
            outcome: Ok(ResolvedDetails::with_description(description)),
            elapsed: Duration::from_millis(ms),
        },
    }
}

fn transcript_lines(commands: &[ShellCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            ShellCommand::PrependTranscriptLine { text } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn slot_updates(commands: &[ShellCommand]) -> Vec<Vec<String>> {
    commands
        .iter()
        .filter_map(|c| match c {
            ShellCommand::SetRecentSlots { slots } => Some(slots.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_session_started_restores_persisted_slots() {
    // Arrange
    let (mut logic, _dispatcher, config_manager) = setup_logic();
    config_manager.set_load_result(Ok(Some(PersistedHistory {
        entries: vec!["0x2B".to_string(), "5".to_string()],
    })));

    // Act
    let commands = logic.handle_event(ShellEvent::SessionStarted);

    // Assert
    assert_eq!(
        slot_updates(&commands),
        vec![vec!["0x2B".to_string(), "5".to_string(), String::new()]]
    );
}

#[test]
fn test_session_started_without_history_emits_nothing() {
    let (mut logic, _dispatcher, _config_manager) = setup_logic();
    let commands = logic.handle_event(ShellEvent::SessionStarted);
    assert!(commands.is_empty());
}

#[test]
fn test_session_started_survives_load_failure() {
    // Arrange
    let (mut logic, dispatcher, config_manager) = setup_logic();
    config_manager.set_load_result(Err(ConfigError::Io(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "denied",
    ))));

    // Act
    let commands = logic.handle_event(ShellEvent::SessionStarted);

    // Assert: no commands, and the session still accepts submissions.
    assert!(commands.is_empty());
    logic.handle_event(submitted("5"));
    assert_eq!(dispatcher.dispatched_codes(), vec![5]);
}

#[test]
fn test_text_submission_updates_slots_and_persists() {
    // Arrange
    let (mut logic, dispatcher, config_manager) = setup_logic();

    // Act
    let commands = logic.handle_event(submitted("0x2B"));

    // Assert
    assert_eq!(dispatcher.dispatched_codes(), vec![43]);
    assert_eq!(
        slot_updates(&commands),
        vec![vec!["0x2B".to_string(), String::new(), String::new()]]
    );
    let saved = config_manager.get_saved_histories();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, APP_NAME_FOR_CONFIG);
    assert_eq!(saved[0].1.entries, vec!["0x2B".to_string()]);
}

#[test]
fn test_submission_while_busy_is_dropped_silently() {
    // Arrange
    let (mut logic, dispatcher, config_manager) = setup_logic();
    logic.handle_event(submitted("5"));

    // Act
    let commands = logic.handle_event(submitted("6"));

    // Assert: no dispatch, no commands, no slot shift, no extra save.
    assert!(commands.is_empty());
    assert_eq!(dispatcher.dispatched_codes(), vec![5]);
    assert_eq!(config_manager.get_saved_histories().len(), 1);
    assert_eq!(logic.view_state.recent_slot(0), Some("5"));
}

#[test]
fn test_parse_error_prepends_message_only() {
    // Arrange
    let (mut logic, dispatcher, config_manager) = setup_logic();

    // Act
    let commands = logic.handle_event(submitted("abc"));

    // Assert
    let lines = transcript_lines(&commands);
    assert_eq!(lines.len(), 1);
    assert!(slot_updates(&commands).is_empty());
    assert!(dispatcher.dispatched_codes().is_empty());
    assert!(config_manager.get_saved_histories().is_empty());
}

#[test]
fn test_completion_prepends_result_line_and_unlocks() {
    // Arrange
    let (mut logic, dispatcher, _config_manager) = setup_logic();
    logic.handle_event(submitted("0x2B"));

    // Act
    let commands = logic.handle_event(success_completion(43, "Success", 120));

    // Assert
    let lines = transcript_lines(&commands);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("120ms"));
    assert!(lines[0].contains("0x0000002B"));
    assert!(lines[0].contains("Success"));

    // The next submission goes through again.
    logic.handle_event(submitted("5"));
    assert_eq!(dispatcher.dispatched_codes(), vec![43, 5]);
}

#[test]
fn test_not_found_completion_uses_fixed_line() {
    let (mut logic, _dispatcher, _config_manager) = setup_logic();
    logic.handle_event(submitted("7"));

    let commands = logic.handle_event(ShellEvent::LookupCompleted {
        completion: LookupCompletion {
            code: 7,
            outcome: Ok(ResolvedDetails::default()),
            elapsed: Duration::from_millis(9),
        },
    });

    assert_eq!(
        transcript_lines(&commands),
        vec!["Sorry, no result found".to_string()]
    );
}

#[test]
fn test_resolver_failure_reports_and_unlocks() {
    // Arrange
    let (mut logic, dispatcher, _config_manager) = setup_logic();
    logic.handle_event(submitted("5"));

    // Act
    let commands = logic.handle_event(ShellEvent::LookupCompleted {
        completion: LookupCompletion {
            code: 5,
            outcome: Err(ResolverError::ServiceFailed("offline".to_string())),
            elapsed: Duration::from_millis(4),
        },
    });

    // Assert
    let lines = transcript_lines(&commands);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Failed to retrieve error code"));
    assert!(lines[0].contains("offline"));

    logic.handle_event(submitted("6"));
    assert_eq!(dispatcher.dispatched_codes(), vec![5, 6]);
}

#[test]
fn test_slot_activation_resubmits_without_shifting_slots() {
    // Arrange: two completed lookups, slots are ["6", "5", ""].
    let (mut logic, dispatcher, config_manager) = setup_logic();
    logic.handle_event(submitted("5"));
    logic.handle_event(success_completion(5, "x", 1));
    logic.handle_event(submitted("6"));
    logic.handle_event(success_completion(6, "x", 1));
    let saves_before = config_manager.get_saved_histories().len();

    // Act: re-submit "5" through its slot.
    let commands = logic.handle_event(ShellEvent::RecentSlotActivated {
        slot: SlotIndex(1),
    });

    // Assert: the lookup was issued, but the slots were neither redrawn nor
    // shifted nor re-persisted.
    assert_eq!(dispatcher.dispatched_codes(), vec![5, 6, 5]);
    assert!(slot_updates(&commands).is_empty());
    assert_eq!(logic.view_state.recent_slot(0), Some("6"));
    assert_eq!(logic.view_state.recent_slot(1), Some("5"));
    assert_eq!(config_manager.get_saved_histories().len(), saves_before);
}

#[test]
fn test_activating_empty_slot_is_a_noop() {
    let (mut logic, dispatcher, _config_manager) = setup_logic();
    let commands = logic.handle_event(ShellEvent::RecentSlotActivated {
        slot: SlotIndex(0),
    });
    assert!(commands.is_empty());
    assert!(dispatcher.dispatched_codes().is_empty());
}

#[test]
fn test_ping_due_is_silent_while_idle() {
    let (mut logic, _dispatcher, _config_manager) = setup_logic();
    let commands = logic.handle_event(ShellEvent::PingDue);
    assert!(commands.is_empty());
}

#[test]
fn test_ping_due_emits_query_notice_while_pending() {
    // Arrange
    let (mut logic, _dispatcher, _config_manager) = setup_logic();
    logic.handle_event(submitted("5"));
    // Let the initial ping delay pass.
    std::thread::sleep(Duration::from_millis(20));

    // Act
    let commands = logic.handle_event(ShellEvent::PingDue);

    // Assert
    assert_eq!(
        transcript_lines(&commands),
        vec![QUERY_PENDING_TEXT.to_string()]
    );
}

#[test]
fn test_next_wakeup_follows_the_busy_phase() {
    let (mut logic, _dispatcher, _config_manager) = setup_logic();
    assert!(logic.next_wakeup().is_none());

    logic.handle_event(submitted("5"));
    assert!(logic.next_wakeup().is_some());

    logic.handle_event(success_completion(5, "x", 1));
    assert!(logic.next_wakeup().is_none());
}

#[test]
fn test_save_failure_does_not_disturb_the_session() {
    // Arrange
    let (mut logic, dispatcher, config_manager) = setup_logic();
    config_manager.set_save_result(Err(ConfigError::NoConfigDirectory));

    // Act
    let commands = logic.handle_event(submitted("5"));

    // Assert: the lookup still started and the slots were still redrawn.
    assert_eq!(dispatcher.dispatched_codes(), vec![5]);
    assert_eq!(slot_updates(&commands).len(), 1);
}

#[test]
fn test_quit_requested_returns_quit_command() {
    let (mut logic, _dispatcher, _config_manager) = setup_logic();
    let commands = logic.handle_event(ShellEvent::QuitRequested);
    assert_eq!(commands, vec![ShellCommand::Quit]);
}
