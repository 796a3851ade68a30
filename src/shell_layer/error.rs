// Represents errors that can occur within the presentation shell.
//
// This enum centralizes error handling for the console front end, such as
// failures writing to the terminal or a torn-down event channel.
#[derive(Debug)]
pub enum ShellError {
    /// An I/O error while reading input or writing output.
    Io(std::io::Error),
    /// The event channel was closed while the shell still expected events.
    EventChannelClosed,
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Io(e) => write!(f, "Shell I/O error: {e}"),
            ShellError::EventChannelClosed => write!(f, "Shell event channel closed"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized `Result` type for shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;
