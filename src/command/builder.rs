//! Declarative command construction.

use super::{Command, CommandExecutor, CommandId, FnExecutor, ResolvedArgs};
use crate::arguments::{ArgumentBehaviour, ArgumentSpec, build_arguments};
use crate::context::CommandContext;
use crate::error::{ExecutorError, RegistrationError};
use crate::flags::CommandOption;
use crate::middleware::{self, CooldownManager, Middleware};
use crate::providers::ProvidersRegistry;
use crate::result::CommandResult;
use std::sync::Arc;
use std::time::Duration;

/// Builder for a [`Command`].
///
/// Collects aliases, the argument schema, flags, middleware filters and the
/// executor; validation happens when the builder is handed to
/// [`CommandManager::register`](crate::manager::CommandManager::register).
pub struct CommandBuilder {
    aliases: Vec<String>,
    description: String,
    permission: Option<String>,
    options: Vec<CommandOption>,
    specs: Vec<ArgumentSpec>,
    include: Vec<String>,
    exclude: Vec<String>,
    local_middlewares: Vec<Arc<dyn Middleware>>,
    cooldown: Option<Duration>,
    executor: Option<Box<dyn CommandExecutor>>,
}

impl CommandBuilder {
    /// Start a command with its aliases; the first one is canonical.
    pub fn new(aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            description: String::new(),
            permission: None,
            options: Vec::new(),
            specs: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            local_middlewares: Vec::new(),
            cooldown: None,
            executor: None,
        }
    }

    /// Set the description shown in help output.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Guard the command behind a permission node.
    pub fn permission(mut self, node: impl Into<String>) -> Self {
        self.permission = Some(node.into());
        self
    }

    /// Declare a flag.
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Declare a context-resolved parameter of type `T`.
    pub fn extra<T: Send + 'static>(mut self) -> Self {
        self.specs.push(ArgumentSpec::extra::<T>());
        self
    }

    /// Declare a required positional parameter of type `T`.
    pub fn required<T: Send + 'static>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.specs.push(ArgumentSpec::required::<T>(name, description));
        self
    }

    /// Declare an optional positional parameter of type `T`; it resolves to
    /// `Option<T>`.
    pub fn optional<T: Send + 'static>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.specs.push(ArgumentSpec::optional::<T>(name, description));
        self
    }

    /// Declare a required parameter consuming the whole rest of the input.
    pub fn continuous<T: Send + 'static>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.specs.push(
            ArgumentSpec::required::<T>(name, description).behaviour(ArgumentBehaviour::Continuous),
        );
        self
    }

    /// Append a pre-built argument spec.
    pub fn argument(mut self, spec: ArgumentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Append argument specs, e.g. from
    /// [`schema::parse`](crate::arguments::schema::parse).
    pub fn arguments(mut self, specs: impl IntoIterator<Item = ArgumentSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Opt into a pool middleware by name.
    pub fn include_middleware(mut self, name: impl Into<String>) -> Self {
        self.include.push(name.into());
        self
    }

    /// Opt out of a global middleware by name.
    pub fn exclude_middleware(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    /// Attach a middleware to this command only.
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.local_middlewares.push(Arc::new(middleware));
        self
    }

    /// Enforce a cooldown window between consuming invocations.
    pub fn cooldown(mut self, duration: Duration) -> Self {
        self.cooldown = Some(duration);
        self
    }

    /// Set the command body.
    pub fn executor(mut self, executor: impl CommandExecutor + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    /// Set a synchronous command body.
    pub fn handler<F>(self, f: F) -> Self
    where
        F: Fn(&CommandContext, ResolvedArgs) -> Result<CommandResult, ExecutorError>
            + Send
            + Sync
            + 'static,
    {
        self.executor(FnExecutor::new(f))
    }

    /// Validate and construct the command. Called by the manager with its
    /// middleware sets; fails on malformed aliases, a missing executor, a
    /// misplaced continuous argument, or an argument type no registered
    /// provider can supply.
    pub(crate) fn build(
        self,
        global: &[Arc<dyn Middleware>],
        pool: &[Arc<dyn Middleware>],
        registry: &ProvidersRegistry,
        parent: Option<CommandId>,
    ) -> Result<Command, RegistrationError> {
        if self.aliases.is_empty() {
            return Err(RegistrationError::NoAliases);
        }
        for alias in &self.aliases {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                return Err(RegistrationError::InvalidAlias(alias.clone()));
            }
        }
        let Some(executor) = self.executor else {
            return Err(RegistrationError::NoExecutor);
        };

        let arguments = build_arguments(&self.specs)?;
        for spec in &self.specs {
            let provided = if spec.is_extra() {
                registry.has_extra(spec.type_id())
            } else {
                registry.has_contextual(spec.type_id())
            };
            if !provided {
                return Err(RegistrationError::UnprovidedType {
                    argument: spec.display_name().to_string(),
                    type_name: spec.type_name().to_string(),
                });
            }
        }

        let middlewares =
            middleware::compose(global, pool, &self.include, &self.exclude, self.local_middlewares);
        let cooldown = self
            .cooldown
            .filter(|d| !d.is_zero())
            .map(CooldownManager::new);

        Ok(Command::new(
            self.aliases,
            self.description,
            self.permission,
            self.options,
            arguments,
            middlewares,
            cooldown,
            parent,
            executor,
        ))
    }
}
