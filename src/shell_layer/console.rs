/*
 * Line-oriented console front end, the replaceable presentation shell around
 * the lookup workflow. It owns the single event channel: stdin lines are
 * mapped to events on a reader thread, lookup completions are forwarded into
 * the same channel through `EventChannelNotifier`, and ping deadlines become
 * `PingDue` events via `recv_timeout`. All handler state is therefore
 * mutated from the one thread running `run`.
 *
 * Input conventions: a line of text is submitted as an error code; "!1",
 * "!2" and "!3" activate the recent slots; "quit" or "exit" (or end of
 * input) ends the session.
 */
use super::error::{Result as ShellResult, ShellError};
use super::types::{ShellCommand, ShellEvent, ShellEventHandler, SlotIndex};
use crate::core::{CompletionNotifier, LookupCompletion, RECENT_HISTORY_CAPACITY};

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread;
use std::time::Instant;

// Forwards resolver completions into the shell's event channel, so they are
// handled on the same thread as every other event instead of on the worker
// that produced them.
pub struct EventChannelNotifier {
    sender: Mutex<Sender<ShellEvent>>,
}

impl EventChannelNotifier {
    pub fn new(sender: Sender<ShellEvent>) -> Self {
        EventChannelNotifier {
            sender: Mutex::new(sender),
        }
    }
}

impl CompletionNotifier for EventChannelNotifier {
    fn notify(&self, completion: LookupCompletion) {
        let Ok(sender) = self.sender.lock() else {
            log::error!("ConsoleShell: completion notifier lock poisoned.");
            return;
        };
        if sender
            .send(ShellEvent::LookupCompleted { completion })
            .is_err()
        {
            log::warn!("ConsoleShell: completion arrived after the shell shut down.");
        }
    }
}

pub struct ConsoleShell {
    event_tx: Sender<ShellEvent>,
    event_rx: Receiver<ShellEvent>,
}

impl ConsoleShell {
    pub fn new() -> Self {
        let (event_tx, event_rx) = channel();
        ConsoleShell { event_tx, event_rx }
    }

    /// Sender half of the event channel, for wiring the dispatcher notifier.
    pub fn event_sender(&self) -> Sender<ShellEvent> {
        self.event_tx.clone()
    }

    /*
     * Maps one raw input line to a shell event. Slot activations and quit
     * words are recognized here; everything else is handed to the handler
     * untouched, including leading/trailing whitespace, so that trimming
     * stays the coordinator's business.
     */
    fn classify_input_line(line: &str) -> ShellEvent {
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            return ShellEvent::QuitRequested;
        }
        if let Some(digits) = trimmed.strip_prefix('!') {
            if let Ok(n) = digits.parse::<usize>() {
                if (1..=RECENT_HISTORY_CAPACITY).contains(&n) {
                    return ShellEvent::RecentSlotActivated {
                        slot: SlotIndex(n - 1),
                    };
                }
            }
        }
        ShellEvent::InputSubmitted {
            text: line.to_string(),
        }
    }

    fn spawn_stdin_reader(&self) {
        let sender = self.event_tx.clone();
        let spawn_result = thread::Builder::new()
            .name("hrlookup-stdin".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    match line {
                        Ok(line) => {
                            if sender.send(Self::classify_input_line(&line)).is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            log::error!("ConsoleShell: failed to read input line: {e}");
                            break;
                        }
                    }
                }
                // End of input ends the session.
                let _ = sender.send(ShellEvent::QuitRequested);
            });
        if let Err(e) = spawn_result {
            log::error!("ConsoleShell: failed to spawn stdin reader: {e}");
        }
    }

    /*
     * Runs the shell's event loop until the handler commands a quit or the
     * input ends. Between events the loop sleeps no longer than the
     * handler's next wakeup deadline, synthesizing a `PingDue` event when
     * the deadline passes so pending-lookup feedback keeps flowing.
     */
    pub fn run(&self, handler: &mut dyn ShellEventHandler) -> ShellResult<()> {
        self.print_banner()?;
        self.spawn_stdin_reader();

        let startup_commands = handler.handle_event(ShellEvent::SessionStarted);
        if self.execute_commands(startup_commands)? {
            handler.on_quit();
            return Ok(());
        }

        loop {
            let event = match handler.next_wakeup() {
                Some(deadline) => {
                    let timeout = deadline.saturating_duration_since(Instant::now());
                    match self.event_rx.recv_timeout(timeout) {
                        Ok(event) => event,
                        Err(RecvTimeoutError::Timeout) => ShellEvent::PingDue,
                        Err(RecvTimeoutError::Disconnected) => {
                            return Err(ShellError::EventChannelClosed);
                        }
                    }
                }
                None => self
                    .event_rx
                    .recv()
                    .map_err(|_| ShellError::EventChannelClosed)?,
            };

            let commands = handler.handle_event(event);
            if self.execute_commands(commands)? {
                handler.on_quit();
                return Ok(());
            }
        }
    }

    fn print_banner(&self) -> ShellResult<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(
            out,
            "Enter an error code (decimal or 0x-prefixed hex) and press Enter."
        )?;
        writeln!(out, "Use !1..!3 to re-submit a recent code, 'quit' to leave.")?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    // Executes commands by writing to stdout. Returns true when the session
    // should end.
    fn execute_commands(&self, commands: Vec<ShellCommand>) -> ShellResult<bool> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for command in commands {
            match command {
                ShellCommand::PrependTranscriptLine { text } => {
                    // The transcript model is newest-first; a terminal can
                    // only append, so each entry is printed as its own block.
                    writeln!(out, "{text}")?;
                    writeln!(out)?;
                }
                ShellCommand::SetRecentSlots { slots } => {
                    let rendered = slots
                        .iter()
                        .enumerate()
                        .map(|(i, slot)| {
                            if slot.is_empty() {
                                format!("[{}] -", i + 1)
                            } else {
                                format!("[{}] {}", i + 1, slot)
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("  ");
                    writeln!(out, "Recent: {rendered}")?;
                }
                ShellCommand::Quit => return Ok(true),
            }
        }
        out.flush()?;
        Ok(false)
    }
}

impl Default for ConsoleShell {
    fn default() -> Self {
        Self::new()
    }
}
