//! The command object and its invocation pipeline.

mod builder;
mod executor;

pub use builder::CommandBuilder;
pub use executor::{CommandExecutor, FnExecutor, ResolvedArgs};

use crate::arguments::{Argument, generate_usage};
use crate::context::CommandContext;
use crate::flags::CommandOption;
use crate::middleware::{CooldownManager, Middleware};
use crate::resolver;
use crate::result::CommandResult;
use futures_util::FutureExt;
use parking_lot::RwLock;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::error;

/// Index of a command in its manager's arena.
///
/// Parents hold child ids and children hold a parent id instead of owning
/// each other; the manager's table is the single owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(pub(crate) usize);

impl CommandId {
    /// The raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A registered, invokable command.
///
/// Built once at registration time and immutable afterwards, except for the
/// child list (children may be registered after their parent) and the
/// cooldown state (mutated per invocation).
pub struct Command {
    aliases: Vec<String>,
    description: String,
    permission: Option<String>,
    options: Vec<CommandOption>,
    arguments: Vec<Argument>,
    middlewares: Vec<Arc<dyn Middleware>>,
    cooldown: Option<CooldownManager>,
    children: RwLock<Vec<CommandId>>,
    parent: Option<CommandId>,
    executor: Box<dyn CommandExecutor>,
}

impl Command {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        aliases: Vec<String>,
        description: String,
        permission: Option<String>,
        options: Vec<CommandOption>,
        arguments: Vec<Argument>,
        middlewares: Vec<Arc<dyn Middleware>>,
        cooldown: Option<CooldownManager>,
        parent: Option<CommandId>,
        executor: Box<dyn CommandExecutor>,
    ) -> Self {
        Self {
            aliases,
            description,
            permission,
            options,
            arguments,
            middlewares,
            cooldown,
            children: RwLock::new(Vec::new()),
            parent,
            executor,
        }
    }

    /// The canonical name (first alias).
    pub fn name(&self) -> &str {
        &self.aliases[0]
    }

    /// All aliases, canonical name first.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Check an alias, case-insensitively.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias))
    }

    /// The declared description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The permission node guarding this command, if any.
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// The flags this command declares.
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// The argument list, in declaration order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// The composed middleware chain.
    pub fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }

    /// The cooldown state, if the command declares one.
    pub fn cooldown(&self) -> Option<&CooldownManager> {
        self.cooldown.as_ref()
    }

    /// Ids of this command's children, in registration order.
    pub fn children(&self) -> Vec<CommandId> {
        self.children.read().clone()
    }

    /// Whether this command has children.
    pub fn is_parent(&self) -> bool {
        !self.children.read().is_empty()
    }

    /// The parent command's id, for child commands.
    pub fn parent(&self) -> Option<CommandId> {
        self.parent
    }

    pub(crate) fn add_child(&self, id: CommandId) {
        self.children.write().push(id);
    }

    /// Render this command's argument usage: `<required> [optional]`.
    pub fn usage(&self) -> String {
        generate_usage(&self.arguments)
    }

    /// Run the full invocation pipeline: before-middlewares, argument
    /// resolution, the command body, after-middlewares.
    pub async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        let mut ran = 0usize;
        let mut short_circuit = None;
        for middleware in &self.middlewares {
            ran += 1;
            if let Some(result) = middleware.before(ctx).await {
                short_circuit = Some(result);
                break;
            }
        }

        let result = match short_circuit {
            Some(result) => result,
            None => self.run(ctx).await,
        };

        // After-hooks run for exactly the middlewares whose before-hook
        // ran, in the same order, the short-circuiting one included
        for middleware in self.middlewares.iter().take(ran) {
            middleware.after(ctx, &result).await;
        }
        result
    }

    /// Resolve arguments and invoke the command body, converting every
    /// failure into a result. Expected failures (missing or unparsable
    /// input) surface their message; anything else is logged and collapsed
    /// into an opaque unknown-error result.
    async fn run(&self, ctx: &CommandContext) -> CommandResult {
        let args = match resolver::resolve(ctx) {
            Ok(args) => args,
            Err(err) => return resolver::failure_result(&err, ctx.messages()),
        };

        match AssertUnwindSafe(self.executor.invoke(ctx, args))
            .catch_unwind()
            .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(crate::error::ExecutorError::Failed(message))) if !message.is_empty() => {
                CommandResult::error(message)
            }
            Ok(Err(err)) => {
                error!(
                    command = %self.name(),
                    code = err.error_code(),
                    error = %err,
                    "command executor failed"
                );
                CommandResult::unknown(ctx.messages().unknown_error())
            }
            Err(payload) => {
                error!(
                    command = %self.name(),
                    panic = %panic_message(payload.as_ref()),
                    "command executor panicked"
                );
                CommandResult::unknown(ctx.messages().unknown_error())
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::ExecutorError;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl CommandExecutor for Noop {
        async fn invoke(
            &self,
            _ctx: &CommandContext,
            _args: ResolvedArgs,
        ) -> Result<CommandResult, ExecutorError> {
            Ok(CommandResult::ok())
        }
    }

    /// A minimal command for unit tests that only need a context.
    pub(crate) fn noop_command() -> Arc<Command> {
        Arc::new(Command::new(
            vec!["noop".to_string()],
            String::new(),
            None,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            None,
            None,
            Box::new(Noop),
        ))
    }
}
