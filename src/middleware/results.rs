//! Result delivery.

use super::Middleware;
use crate::context::CommandContext;
use crate::result::CommandResult;
use async_trait::async_trait;

/// Delivers the result message to the sender after every invocation.
///
/// Front-ends that render results themselves (embeds, colored output)
/// should exclude this middleware and read the result returned by
/// `dispatch` instead.
pub struct ResultHandlingMiddleware;

#[async_trait]
impl Middleware for ResultHandlingMiddleware {
    fn name(&self) -> &'static str {
        "result-handling"
    }

    async fn after(&self, ctx: &CommandContext, result: &CommandResult) {
        if let Some(message) = result.message() {
            ctx.sender().send_message(message);
        }
    }
}
