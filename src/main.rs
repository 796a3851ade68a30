// src/main.rs

mod app_logic;
mod core;
mod shell_layer;

use crate::core::{
    ConfigManagerOperations, CoreConfigManager, LookupDispatchOperations, LookupDispatcher,
};
use app_logic::LookupAppLogic;
use shell_layer::{ConsoleShell, EventChannelNotifier, ShellResult};

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::sync::{Arc, Once};

static LOGGING_INIT: Once = Once::new();

/*
 * Initializes the global logger exactly once. Log output goes to stderr so
 * the transcript on stdout stays readable. Tests call this as well; repeated
 * calls are no-ops.
 */
pub fn initialize_logging() {
    LOGGING_INIT.call_once(|| {
        let level = if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let config = ConfigBuilder::new()
            .set_time_format_custom(time::macros::format_description!(
                "[hour]:[minute]:[second].[subsecond digits:3]"
            ))
            .build();
        if let Err(e) = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto) {
            eprintln!("Failed to initialize logging: {e}");
        }
    });
}

// Picks the error-description source for this platform: the system message
// service on Windows, the built-in table elsewhere.
#[cfg(target_os = "windows")]
fn default_resolver() -> Arc<dyn crate::core::ErrorResolverOperations> {
    Arc::new(crate::core::SystemMessageResolver::new())
}

#[cfg(not(target_os = "windows"))]
fn default_resolver() -> Arc<dyn crate::core::ErrorResolverOperations> {
    Arc::new(crate::core::StaticTableResolver::new())
}

fn main() -> ShellResult<()> {
    initialize_logging();
    log::info!("Main: starting error code lookup session.");

    let shell = ConsoleShell::new();
    let notifier = Arc::new(EventChannelNotifier::new(shell.event_sender()));
    let dispatcher: Arc<dyn LookupDispatchOperations> =
        Arc::new(LookupDispatcher::new(default_resolver(), notifier));
    let config_manager: Arc<dyn ConfigManagerOperations> = Arc::new(CoreConfigManager::new());

    let mut logic = LookupAppLogic::new(dispatcher, config_manager);
    let run_result = shell.run(&mut logic);
    log::info!("Main: session ended.");
    run_result
}
