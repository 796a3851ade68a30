/*
 * This module consolidates the core, platform-agnostic logic of the
 * application. It re-exports the data model, the lookup coordinator and the
 * abstractions (`ErrorResolverOperations`, `LookupDispatchOperations`,
 * `ConfigManagerOperations`) that the presenter and the presentation shell
 * are wired against, plus the concrete resolver strategies.
 */
pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod models;
pub mod path_utils;
pub mod resolver;
#[cfg(target_os = "windows")]
pub mod resolver_windows;

// Re-export the data model
pub use models::{
    LookupRequest, LookupResult, RECENT_HISTORY_CAPACITY, RecentHistory, ResolvedDetails,
    SubmitOrigin, SubmitOutcome,
};

// Re-export the coordinator and the dispatch boundary
pub use coordinator::LookupCoordinator;
pub use dispatch::{
    CompletionNotifier, LookupCompletion, LookupDispatchOperations, LookupDispatcher,
};

// Re-export resolver related items
pub use resolver::{ErrorResolverOperations, ResolverError, StaticTableResolver};
#[cfg(target_os = "windows")]
pub use resolver_windows::SystemMessageResolver;

// Re-export config related items
pub use config::{ConfigManagerOperations, CoreConfigManager, PersistedHistory};

#[cfg(test)]
pub use config::ConfigError;
