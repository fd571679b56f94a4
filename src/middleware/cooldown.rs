//! Per-caller command cooldowns.
//!
//! Each cooldown-bearing command owns a [`CooldownManager`] mapping caller
//! identity to a cooldown expiry. The claim is taken atomically in the
//! `before` phase (two concurrent invocations by the same caller resolve to
//! exactly one success) and rolled back in the `after` phase unless the
//! result consumed the cooldown.

use super::Middleware;
use crate::context::CommandContext;
use crate::result::{CommandResult, ResultKind};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::{Duration, Instant};
use tracing::debug;

/// Per-caller expiry map for one command.
#[derive(Debug)]
pub struct CooldownManager {
    duration: Duration,
    entries: DashMap<String, Instant>,
}

impl CooldownManager {
    /// Create a manager enforcing the given window between successes.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            entries: DashMap::new(),
        }
    }

    /// The configured cooldown window.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Atomically claim the cooldown for `key`.
    ///
    /// If the caller is still inside the window, returns the remaining time
    /// and changes nothing. Otherwise the expiry is set to now plus the
    /// window; the claim is provisional until the invocation finishes and
    /// must be rolled back with [`release`](Self::release) when the result
    /// does not consume the cooldown. The check-then-set runs under the
    /// entry lock, so two concurrent claims resolve to exactly one success.
    pub fn try_claim(&self, key: &str) -> Result<(), Duration> {
        let now = Instant::now();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let expiry = *entry.get();
                if now < expiry {
                    Err(expiry - now)
                } else {
                    entry.insert(now + self.duration);
                    Ok(())
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now + self.duration);
                Ok(())
            }
        }
    }

    /// Roll back a claim taken by [`try_claim`](Self::try_claim).
    pub fn release(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Time left in the window for `key`, if any.
    pub fn time_left(&self, key: &str) -> Option<Duration> {
        let expiry = *self.entries.get(key)?;
        expiry.checked_duration_since(Instant::now())
    }

    /// Number of tracked callers. Stale entries are overwritten on claim,
    /// not expired eagerly.
    pub fn tracked(&self) -> usize {
        self.entries.len()
    }
}

/// Middleware enforcing per-command cooldowns.
pub struct CooldownMiddleware;

#[async_trait]
impl Middleware for CooldownMiddleware {
    fn name(&self) -> &'static str {
        "cooldown"
    }

    async fn before(&self, ctx: &CommandContext) -> Option<CommandResult> {
        let cooldown = ctx.command().cooldown()?;
        match cooldown.try_claim(ctx.sender().name()) {
            Ok(()) => None,
            Err(time_left) => {
                debug!(
                    command = %ctx.command().name(),
                    sender = %ctx.sender().name(),
                    left_ms = time_left.as_millis() as u64,
                    "cooldown rejection"
                );
                Some(CommandResult::cooldown(ctx.messages().cooldown(time_left)))
            }
        }
    }

    async fn after(&self, ctx: &CommandContext, result: &CommandResult) {
        let Some(cooldown) = ctx.command().cooldown() else {
            return;
        };
        // A cooldown-kind result means this invocation never claimed
        if result.kind() == ResultKind::Cooldown {
            return;
        }
        // Only a cooldown-consuming success keeps the claim
        if !(result.is_success() && result.consumes_cooldown()) {
            cooldown.release(ctx.sender().name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_then_reject_then_expire() {
        let manager = CooldownManager::new(Duration::from_millis(50));
        assert!(manager.try_claim("alice").is_ok());

        let left = manager.try_claim("alice").unwrap_err();
        assert!(left > Duration::ZERO);

        std::thread::sleep(Duration::from_millis(60));
        assert!(manager.try_claim("alice").is_ok());
    }

    #[test]
    fn test_release_rolls_back_claim() {
        let manager = CooldownManager::new(Duration::from_secs(60));
        assert!(manager.try_claim("bob").is_ok());
        manager.release("bob");
        assert!(manager.try_claim("bob").is_ok());
    }

    #[test]
    fn test_callers_are_independent() {
        let manager = CooldownManager::new(Duration::from_secs(60));
        assert!(manager.try_claim("alice").is_ok());
        assert!(manager.try_claim("bob").is_ok());
        assert!(manager.try_claim("alice").is_err());
        assert_eq!(manager.tracked(), 2);
    }

    #[test]
    fn test_concurrent_claims_resolve_to_one_success() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let manager = Arc::new(CooldownManager::new(Duration::from_secs(60)));
        let successes = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(std::sync::Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let manager = Arc::clone(&manager);
                let successes = Arc::clone(&successes);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    if manager.try_claim("racer").is_ok() {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(successes.load(Ordering::SeqCst), 1);
    }
}
