//! Permission checks.

use super::Middleware;
use crate::context::CommandContext;
use crate::result::CommandResult;
use async_trait::async_trait;
use tracing::debug;

/// Rejects the invocation when the command declares a permission node the
/// sender lacks. Commands without a permission node always pass.
pub struct PermissionMiddleware;

#[async_trait]
impl Middleware for PermissionMiddleware {
    fn name(&self) -> &'static str {
        "permission"
    }

    async fn before(&self, ctx: &CommandContext) -> Option<CommandResult> {
        let node = ctx.command().permission()?;
        if ctx.sender().has_permission(node) {
            None
        } else {
            debug!(
                command = %ctx.command().name(),
                sender = %ctx.sender().name(),
                node = %node,
                "permission rejection"
            );
            Some(CommandResult::error(ctx.messages().not_allowed()))
        }
    }
}
