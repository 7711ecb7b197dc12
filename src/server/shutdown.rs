// Graceful shutdown module
// Waits for in-flight connections after the listener stops accepting

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::logger;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Wait until `conn_counter` reaches zero or `grace_period` elapses.
///
/// Returns the number of connections still open when the wait ended. Those
/// tasks are abandoned with the runtime.
pub async fn drain_connections(conn_counter: &AtomicUsize, grace_period: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace_period;

    let initial = conn_counter.load(Ordering::SeqCst);
    if initial > 0 {
        logger::log_info(&format!(
            "[SHUTDOWN] Waiting up to {}s for {initial} active connection(s)",
            grace_period.as_secs()
        ));
    }

    loop {
        let active = conn_counter.load(Ordering::SeqCst);
        if active == 0 {
            return 0;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Grace period elapsed with {active} connection(s) still open"
            ));
            return active;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_drain_idle_returns_immediately() {
        let counter = AtomicUsize::new(0);
        assert_eq!(drain_connections(&counter, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_grace_period() {
        let counter = AtomicUsize::new(2);
        assert_eq!(drain_connections(&counter, Duration::from_millis(120)).await, 2);
    }

    #[tokio::test]
    async fn test_drain_waits_for_connections() {
        let counter = Arc::new(AtomicUsize::new(1));
        let closer = Arc::clone(&counter);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            closer.fetch_sub(1, Ordering::SeqCst);
        });
        assert_eq!(drain_connections(&counter, Duration::from_secs(10)).await, 0);
    }
}
