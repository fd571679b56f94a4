//! Invocation context and the sender boundary.
//!
//! A [`CommandContext`] is created fresh for every invocation and owned by
//! that invocation alone. It bundles everything the resolver, middlewares
//! and command body need: the sender, the parsed command line, the provider
//! registry, the messages provider and the resolved command.

use crate::command::Command;
use crate::flags::FlagValue;
use crate::messages::MessagesProvider;
use crate::parser::ParsedLine;
use crate::providers::ProvidersRegistry;
use std::any::Any;
use std::sync::Arc;

/// The identity on whose behalf a command runs.
///
/// Front-ends implement this for their own caller types (console user, chat
/// member, proxied player). Extra providers can recover the concrete type
/// through [`CommandSender::as_any`].
pub trait CommandSender: Send + Sync + 'static {
    /// A stable identity string; used as the cooldown key.
    fn name(&self) -> &str;

    /// Deliver a message to the caller.
    fn send_message(&self, message: &str);

    /// Check a permission node. The default sender is all-powerful.
    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    /// Downcast hook for context providers.
    fn as_any(&self) -> &dyn Any;
}

/// Per-invocation state handed to middlewares, providers and executors.
#[derive(Clone)]
pub struct CommandContext {
    sender: Arc<dyn CommandSender>,
    line: ParsedLine,
    registry: Arc<ProvidersRegistry>,
    messages: Arc<dyn MessagesProvider>,
    command: Arc<Command>,
}

impl CommandContext {
    pub(crate) fn new(
        sender: Arc<dyn CommandSender>,
        line: ParsedLine,
        registry: Arc<ProvidersRegistry>,
        messages: Arc<dyn MessagesProvider>,
        command: Arc<Command>,
    ) -> Self {
        Self {
            sender,
            line,
            registry,
            messages,
            command,
        }
    }

    /// The sender of this invocation.
    pub fn sender(&self) -> &Arc<dyn CommandSender> {
        &self.sender
    }

    /// Downcast the sender to a concrete front-end type.
    pub fn sender_as<T: CommandSender>(&self) -> Option<&T> {
        self.sender.as_any().downcast_ref::<T>()
    }

    /// The parsed command line (flags already separated out).
    pub fn line(&self) -> &ParsedLine {
        &self.line
    }

    /// The positional tokens left after flag extraction.
    pub fn tokens(&self) -> &[String] {
        self.line.tokens()
    }

    /// Whether the given flag was present on the command line.
    pub fn has_flag(&self, name: &str) -> bool {
        self.line.has_flag(name)
    }

    /// The flag with the given canonical name, if present.
    pub fn flag(&self, name: &str) -> Option<FlagValue> {
        self.line.flag(name)
    }

    /// The value carried by a flag, if present.
    pub fn flag_value(&self, name: &str) -> Option<&str> {
        self.line.flag_value(name)
    }

    /// The provider registry serving this invocation.
    pub fn registry(&self) -> &ProvidersRegistry {
        &self.registry
    }

    /// The messages provider serving this invocation.
    pub fn messages(&self) -> &dyn MessagesProvider {
        self.messages.as_ref()
    }

    /// The command being executed.
    pub fn command(&self) -> &Arc<Command> {
        &self.command
    }
}
