//! Waiting for the reasoning service to come up.

use super::ReasoningService;
use crate::config::ServiceConfig;
use crate::{Error, Result};
use std::time::{Duration, Instant};

/// Blocks until `service` reports itself available.
///
/// Probes every `poll_interval_ms`. With `wait_timeout_ms == 0` the wait is
/// unbounded. Returns how long the wait took.
///
/// # Errors
///
/// Returns [`Error::ServiceUnavailable`] once the timeout elapses.
pub fn wait_for_service(service: &dyn ReasoningService, config: &ServiceConfig) -> Result<Duration> {
    let start = Instant::now();
    let interval = Duration::from_millis(config.poll_interval_ms.max(1));
    let timeout = (config.wait_timeout_ms > 0).then(|| Duration::from_millis(config.wait_timeout_ms));
    let mut probes: u64 = 0;

    loop {
        probes += 1;
        if service.is_available() {
            let waited = start.elapsed();
            tracing::info!(
                service = service.name(),
                probes,
                waited_ms = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
                "Reasoning service is available"
            );
            return Ok(waited);
        }

        if probes == 1 {
            tracing::info!(service = service.name(), "Waiting for the reasoning service");
        }

        let waited = start.elapsed();
        if let Some(timeout) = timeout {
            if waited >= timeout {
                return Err(Error::ServiceUnavailable {
                    service: service.name().to_string(),
                    waited_ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
                });
            }
        }

        std::thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Directive, DirectiveResponse};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Becomes available after a fixed number of probes.
    struct SlowStart {
        remaining: AtomicU32,
    }

    impl ReasoningService for SlowStart {
        fn name(&self) -> &str {
            "slow"
        }

        fn is_available(&self) -> bool {
            self.remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_err()
        }

        fn execute(&self, _directive: &Directive) -> Result<DirectiveResponse> {
            Ok(DirectiveResponse::ok())
        }
    }

    fn fast_config(wait_timeout_ms: u64) -> ServiceConfig {
        ServiceConfig {
            poll_interval_ms: 1,
            wait_timeout_ms,
            ..ServiceConfig::default()
        }
    }

    #[test]
    fn test_returns_once_available() {
        let service = SlowStart {
            remaining: AtomicU32::new(3),
        };
        assert!(wait_for_service(&service, &fast_config(0)).is_ok());
        assert_eq!(service.remaining.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_times_out() {
        let service = SlowStart {
            remaining: AtomicU32::new(u32::MAX),
        };
        let result = wait_for_service(&service, &fast_config(20));
        assert!(matches!(
            result,
            Err(Error::ServiceUnavailable { ref service, .. }) if service == "slow"
        ));
    }
}
