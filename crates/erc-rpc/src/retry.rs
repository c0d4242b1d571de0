//! Retry with exponential backoff for transport failures

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::RpcError;

/// Exponential backoff schedule, capped at `max_delay_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one (0 is treated as 1)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Upper bound for any single delay
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    5_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (0-based)
    pub fn delay(&self, retry: u32) -> Duration {
        let factor = 2u64.saturating_pow(retry.min(16));
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms))
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, runs out
    /// of attempts, or `cancel` fires.
    pub async fn run<T, F, Fut>(
        &self,
        method: &str,
        cancel: &CancellationToken,
        mut op: F,
    ) -> Result<T, RpcError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RpcError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut retry = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(RpcError::Cancelled);
            }

            let result = tokio::select! {
                _ = cancel.cancelled() => return Err(RpcError::Cancelled),
                result = op() => result,
            };

            match result {
                Err(e) if e.is_retryable() && retry + 1 < attempts => {
                    let delay = self.delay(retry);
                    warn!(method, attempt = retry + 1, ?delay, error = %e, "request failed, retrying");
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(RpcError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                    retry += 1;
                }
                Ok(value) => {
                    if retry > 0 {
                        info!(method, attempts = retry + 1, "request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 2,
        }
    }

    // ==================== Schedule ====================

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay_ms: 100,
            max_delay_ms: 1_000,
        };
        assert_eq!(policy.delay(0), Duration::from_millis(100));
        assert_eq!(policy.delay(1), Duration::from_millis(200));
        assert_eq!(policy.delay(3), Duration::from_millis(800));
        assert_eq!(policy.delay(4), Duration::from_millis(1_000));
        assert_eq!(policy.delay(u32::MAX), Duration::from_millis(1_000));
    }

    #[test]
    fn test_policy_serde_defaults() {
        let policy: RetryPolicy = serde_json::from_str(r#"{"max_attempts": 5}"#).unwrap();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay_ms, 500);
        assert_eq!(policy.max_delay_ms, 5_000);
    }

    // ==================== Run loop ====================

    #[tokio::test]
    async fn test_run_retries_transport_errors() {
        let count = Arc::new(AtomicU32::new(0));
        let cancel = CancellationToken::new();

        let result = fast()
            .run("eth_call", &cancel, || {
                let count = count.clone();
                async move {
                    if count.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(RpcError::Transport("reset".into()))
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_gives_up_after_max_attempts() {
        let count = Arc::new(AtomicU32::new(0));
        let cancel = CancellationToken::new();

        let result: Result<(), _> = fast()
            .run("eth_call", &cancel, || {
                let count = count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Err(RpcError::Transport("down".into()))
                }
            })
            .await;

        assert!(matches!(result, Err(RpcError::Transport(_))));
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_does_not_retry_rpc_errors() {
        let count = Arc::new(AtomicU32::new(0));
        let cancel = CancellationToken::new();

        let result: Result<(), _> = fast()
            .run("eth_call", &cancel, || {
                let count = count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Err(RpcError::Rpc {
                        code: 3,
                        message: "execution reverted".into(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(RpcError::Rpc { .. })));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = fast().run("eth_call", &cancel, || async { Ok(1) }).await;
        assert!(matches!(result, Err(RpcError::Cancelled)));
    }

    #[tokio::test]
    async fn test_run_cancelled_during_backoff() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay_ms: 60_000,
            max_delay_ms: 60_000,
        };
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result: Result<(), _> = policy
            .run("eth_call", &cancel, || async {
                Err(RpcError::Transport("down".into()))
            })
            .await;
        assert!(matches!(result, Err(RpcError::Cancelled)));
    }
}
