/*
 * Defines the boundary to the error-description service. The coordinator only
 * ever sees the `ErrorResolverOperations` trait, so the actual source of the
 * descriptions is pluggable: the Windows system message service (see
 * `resolver_windows.rs`), the built-in table below, or a mock in tests.
 */
use super::models::ResolvedDetails;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// The description service reported a failure for this request.
    ServiceFailed(String),
    /// The worker running the resolver call panicked before completing.
    WorkerPanicked,
}

impl std::fmt::Display for ResolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolverError::ServiceFailed(s) => write!(f, "description service failed: {s}"),
            ResolverError::WorkerPanicked => write!(f, "lookup worker panicked"),
        }
    }
}

impl std::error::Error for ResolverError {}

pub type Result<T> = std::result::Result<T, ResolverError>;

/*
 * Contract for a service that maps a numeric error code to a human-readable
 * description. `resolve` is a plain blocking call; asynchrony is supplied by
 * the dispatcher, which runs it on a worker thread. Completing with a payload
 * whose description is absent or empty means "no result", which callers must
 * treat as a normal outcome.
 */
pub trait ErrorResolverOperations: Send + Sync {
    fn resolve(&self, code: i32) -> Result<ResolvedDetails>;
}

// Descriptions for HRESULT values common enough to be worth answering without
// any platform service. Matches the system wording where one exists.
const WELL_KNOWN_CODES: &[(u32, &str)] = &[
    (0x00000000, "The operation completed successfully."),
    (0x80004001, "Not implemented"),
    (0x80004002, "No such interface supported"),
    (0x80004003, "Invalid pointer"),
    (0x80004004, "Operation aborted"),
    (0x80004005, "Unspecified error"),
    (0x8000FFFF, "Catastrophic failure"),
    (0x80070002, "The system cannot find the file specified."),
    (0x80070005, "Access is denied."),
    (0x8007000E, "Not enough memory resources are available to complete this operation."),
    (0x80070057, "The parameter is incorrect."),
    (0x800700C1, "%1 is not a valid Win32 application."),
    (0x80070490, "Element not found."),
];

/*
 * A resolver backed by the static table above. It is the default strategy on
 * platforms without a system description service and a convenient
 * deterministic choice for exercising the full pipeline in tests. Codes
 * missing from the table resolve to an empty payload, not an error.
 */
pub struct StaticTableResolver;

impl StaticTableResolver {
    pub fn new() -> Self {
        StaticTableResolver
    }
}

impl Default for StaticTableResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorResolverOperations for StaticTableResolver {
    fn resolve(&self, code: i32) -> Result<ResolvedDetails> {
        let entry = WELL_KNOWN_CODES
            .iter()
            .find(|(known, _)| *known == code as u32);
        match entry {
            Some((_, description)) => {
                log::debug!("StaticTableResolver: code 0x{code:08X} found in table.");
                Ok(ResolvedDetails::with_description(*description))
            }
            None => {
                log::debug!("StaticTableResolver: code 0x{code:08X} not in table.");
                Ok(ResolvedDetails::default())
            }
        }
    }
}
