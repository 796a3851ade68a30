/*
 * Windows-specific resolver implementation. Delegates to the system message
 * facility through `windows::core::HRESULT`, which is the same description
 * source the OS itself uses for error reporting. Only compiled on Windows;
 * other targets use `StaticTableResolver` instead.
 */
use super::models::ResolvedDetails;
use super::resolver::{ErrorResolverOperations, Result};

use windows::core::HRESULT;

pub struct SystemMessageResolver;

impl SystemMessageResolver {
    pub fn new() -> Self {
        SystemMessageResolver
    }
}

impl Default for SystemMessageResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorResolverOperations for SystemMessageResolver {
    /*
     * Asks the system for the message text of `code`. An unknown code yields
     * an empty message, which is reported as an empty payload so callers
     * treat it as "no result" rather than a failure.
     */
    fn resolve(&self, code: i32) -> Result<ResolvedDetails> {
        let message = HRESULT(code).message();
        let trimmed = message.trim();
        if trimmed.is_empty() {
            log::debug!("SystemMessageResolver: no system message for code 0x{code:08X}.");
            return Ok(ResolvedDetails::default());
        }
        log::debug!("SystemMessageResolver: resolved code 0x{code:08X}.");
        Ok(ResolvedDetails::with_description(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message_resolver_known_code_has_description() {
        let resolver = SystemMessageResolver::new();
        // E_ACCESSDENIED has had a system message on every Windows release.
        let details = resolver.resolve(0x80070005u32 as i32).unwrap();
        assert!(details.has_description());
    }

    #[test]
    fn test_system_message_resolver_description_is_trimmed() {
        let resolver = SystemMessageResolver::new();
        let details = resolver.resolve(0x80070005u32 as i32).unwrap();
        let description = details.description.unwrap();
        assert_eq!(description, description.trim());
    }
}
