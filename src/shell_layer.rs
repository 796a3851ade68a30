pub mod console;
pub mod error;
pub mod types;
pub use console::{ConsoleShell, EventChannelNotifier};
pub use error::{Result as ShellResult, ShellError};
pub use types::{ShellCommand, ShellEvent, ShellEventHandler, SlotIndex};
