//! Synchronous entry points
//!
//! For callers without an async runtime (command-line front ends, scripts).
//! Each call drives the async resolver to completion on a private
//! current-thread runtime, so it must not be called from inside one.

use tokio::runtime::{Builder, Runtime};
use tracing::warn;

use crate::provider::Provider;
use crate::resolver::ResultsResolver;
use crate::types::{SessionClassification, SessionKind};
use crate::Result;

fn runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

/// Blocking [`ResultsResolver::try_latest`].
pub fn try_latest_results<P: Provider>(
    resolver: &ResultsResolver<P>,
    kind: Option<SessionKind>,
) -> Result<SessionClassification> {
    runtime()?.block_on(resolver.try_latest(kind))
}

/// Blocking [`ResultsResolver::latest`]; always returns usable data.
pub fn latest_results<P: Provider>(
    resolver: &ResultsResolver<P>,
    kind: Option<SessionKind>,
) -> SessionClassification {
    match runtime() {
        Ok(runtime) => runtime.block_on(resolver.latest(kind)),
        Err(error) => {
            warn!(%error, "Returning placeholder data");
            SessionClassification::placeholder(chrono::Utc::now())
        }
    }
}

/// Blocking [`ResultsResolver::try_practice`].
pub fn try_practice_results<P: Provider>(
    resolver: &ResultsResolver<P>,
    segment: Option<u8>,
) -> Result<Vec<SessionClassification>> {
    runtime()?.block_on(resolver.try_practice(segment))
}

/// Blocking [`ResultsResolver::practice`]; always returns usable data.
pub fn practice_results<P: Provider>(
    resolver: &ResultsResolver<P>,
    segment: Option<u8>,
) -> Vec<SessionClassification> {
    match runtime() {
        Ok(runtime) => runtime.block_on(resolver.practice(segment)),
        Err(error) => {
            warn!(%error, "Returning placeholder data");
            vec![SessionClassification::placeholder(chrono::Utc::now())]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::provider::Collection;
    use crate::test_utils::{self, timestamp};

    fn resolver(
        provider: crate::providers::MemoryProvider,
    ) -> ResultsResolver<crate::providers::MemoryProvider> {
        let config = ResolverConfig { year: Some(2025), ..ResolverConfig::default() };
        ResultsResolver::new(provider, config).with_now(timestamp("2025-04-14T00:00:00Z"))
    }

    #[test]
    fn blocking_latest_resolves_race() {
        let race = latest_results(&resolver(test_utils::bahrain_provider()), None);
        assert_eq!(race.kind, SessionKind::Race);
        assert!(!race.synthetic);
    }

    #[test]
    fn blocking_practice_resolves_meeting() {
        let practice = try_practice_results(&resolver(test_utils::bahrain_provider()), None).unwrap();
        assert_eq!(practice.len(), 3);
        assert!(practice[2].is_empty());
    }

    #[test]
    fn blocking_calls_keep_the_never_fail_contract() {
        let failing = resolver(test_utils::bahrain_provider().failing(Collection::Sessions));
        assert!(latest_results(&failing, None).synthetic);
        assert!(practice_results(&failing, Some(1))[0].synthetic);
        assert!(try_latest_results(&failing, None).is_err());
    }
}
