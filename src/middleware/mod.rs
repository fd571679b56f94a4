//! Middleware: interceptors around command execution.
//!
//! Middlewares run in registration order. Each `before` hook may
//! short-circuit the invocation by returning a result; the first result
//! returned stops the chain and the command body never runs. `after` hooks
//! observe the final result and run, in the same order, for every
//! middleware whose `before` hook ran - including the one that
//! short-circuited.

mod cooldown;
mod permission;
mod results;

pub use cooldown::{CooldownManager, CooldownMiddleware};
pub use permission::PermissionMiddleware;
pub use results::ResultHandlingMiddleware;

use crate::context::CommandContext;
use crate::result::CommandResult;
use async_trait::async_trait;
use std::sync::Arc;

/// An interceptor around command execution.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// A stable name, used by commands to include or exclude this
    /// middleware.
    fn name(&self) -> &'static str;

    /// Runs before argument resolution. Returning `Some` short-circuits the
    /// invocation with that result.
    async fn before(&self, _ctx: &CommandContext) -> Option<CommandResult> {
        None
    }

    /// Observes the final result of the invocation.
    async fn after(&self, _ctx: &CommandContext, _result: &CommandResult) {}
}

/// Compose the middleware chain for one command at registration time:
/// global middlewares minus the command's excludes, pool middlewares the
/// command opted into by name, then command-local middlewares.
pub(crate) fn compose(
    global: &[Arc<dyn Middleware>],
    pool: &[Arc<dyn Middleware>],
    include: &[String],
    exclude: &[String],
    local: Vec<Arc<dyn Middleware>>,
) -> Vec<Arc<dyn Middleware>> {
    let mut chain: Vec<Arc<dyn Middleware>> = global
        .iter()
        .filter(|m| !exclude.iter().any(|name| name == m.name()))
        .cloned()
        .collect();
    chain.extend(
        pool.iter()
            .filter(|m| include.iter().any(|name| name == m.name()))
            .cloned(),
    );
    chain.extend(local);
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    #[async_trait]
    impl Middleware for Named {
        fn name(&self) -> &'static str {
            self.0
        }
    }

    fn names(chain: &[Arc<dyn Middleware>]) -> Vec<&'static str> {
        chain.iter().map(|m| m.name()).collect()
    }

    #[test]
    fn test_compose_respects_include_and_exclude() {
        let global: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(Named("cooldown")), Arc::new(Named("result-handling"))];
        let pool: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(Named("audit")), Arc::new(Named("tracing"))];

        let chain = compose(
            &global,
            &pool,
            &["audit".to_string()],
            &["cooldown".to_string()],
            vec![Arc::new(Named("local"))],
        );
        assert_eq!(names(&chain), ["result-handling", "audit", "local"]);
    }

    #[test]
    fn test_compose_defaults_to_all_globals() {
        let global: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(Named("cooldown")), Arc::new(Named("result-handling"))];
        let chain = compose(&global, &[], &[], &[], Vec::new());
        assert_eq!(names(&chain), ["cooldown", "result-handling"]);
    }
}
