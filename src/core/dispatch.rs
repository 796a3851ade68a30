/*
 * Runs resolver calls off the submitting thread and delivers each completion
 * through a `CompletionNotifier`. The notifier is expected to hand the
 * completion back to whichever thread owns the coordinator (the console shell
 * forwards it over its event channel), so no coordinator state is ever
 * touched from a worker.
 *
 * The dispatcher's one hard obligation is that every dispatched request
 * produces exactly one completion, whatever happens to the resolver call.
 * A lost completion would leave the coordinator busy forever.
 */
use super::models::{LookupRequest, ResolvedDetails};
use super::resolver::{ErrorResolverOperations, ResolverError};

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// Everything known about one finished lookup: the code it was for, how the
// resolver call ended, and the wall time from submission to completion.
#[derive(Debug, Clone)]
pub struct LookupCompletion {
    pub code: i32,
    pub outcome: std::result::Result<ResolvedDetails, ResolverError>,
    pub elapsed: Duration,
}

/// Receives completions on the worker thread and marshals them to the owner
/// of the coordinator state.
pub trait CompletionNotifier: Send + Sync {
    fn notify(&self, completion: LookupCompletion);
}

pub trait LookupDispatchOperations: Send + Sync {
    fn dispatch(&self, request: LookupRequest);
}

pub struct LookupDispatcher {
    resolver: Arc<dyn ErrorResolverOperations>,
    notifier: Arc<dyn CompletionNotifier>,
}

impl LookupDispatcher {
    pub fn new(
        resolver: Arc<dyn ErrorResolverOperations>,
        notifier: Arc<dyn CompletionNotifier>,
    ) -> Self {
        LookupDispatcher { resolver, notifier }
    }
}

impl LookupDispatchOperations for LookupDispatcher {
    /*
     * Issues the resolver call on a freshly spawned worker thread. A panic in
     * the resolver is caught and reported as a `WorkerPanicked` completion,
     * and a failure to spawn the worker is reported synchronously, so the
     * caller always gets its completion.
     */
    fn dispatch(&self, request: LookupRequest) {
        let resolver = Arc::clone(&self.resolver);
        let notifier = Arc::clone(&self.notifier);
        log::debug!("LookupDispatcher: dispatching lookup for code {}.", request.code);

        let spawn_result = thread::Builder::new()
            .name("hrlookup-resolver".to_string())
            .spawn(move || {
                let outcome = match catch_unwind(AssertUnwindSafe(|| resolver.resolve(request.code)))
                {
                    Ok(result) => result,
                    Err(_) => {
                        log::error!(
                            "LookupDispatcher: resolver panicked for code {}.",
                            request.code
                        );
                        Err(ResolverError::WorkerPanicked)
                    }
                };
                notifier.notify(LookupCompletion {
                    code: request.code,
                    outcome,
                    elapsed: request.submitted_at.elapsed(),
                });
            });

        if let Err(e) = spawn_result {
            log::error!("LookupDispatcher: failed to spawn resolver worker: {e}");
            self.notifier.notify(LookupCompletion {
                code: request.code,
                outcome: Err(ResolverError::ServiceFailed(e.to_string())),
                elapsed: request.submitted_at.elapsed(),
            });
        }
    }
}
