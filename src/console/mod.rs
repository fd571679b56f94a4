//! In-process console front-end.
//!
//! The thinnest possible adapter over the dispatch core: lines are read
//! from stdin, lines starting with the configured prefix are dispatched on
//! behalf of a [`ConsoleSender`], and result delivery happens through the
//! standard result-handling middleware.

use crate::command::CommandBuilder;
use crate::config::ConsoleConfig;
use crate::context::CommandSender;
use crate::manager::CommandManager;
use crate::result::CommandResult;
use std::any::Any;
use std::sync::{Arc, Weak};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// The identity behind console input. Messages go to stdout.
pub struct ConsoleSender {
    name: String,
}

impl ConsoleSender {
    /// Create a console sender with the given identity string.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str) {
        println!("{message}");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reads stdin and dispatches prefixed lines until EOF.
pub struct ConsoleListener {
    manager: Arc<CommandManager>,
    sender: Arc<dyn CommandSender>,
    prefix: String,
}

impl ConsoleListener {
    /// Create a listener over a manager, configured by `config`.
    pub fn new(manager: Arc<CommandManager>, config: &ConsoleConfig) -> Self {
        Self {
            manager,
            sender: Arc::new(ConsoleSender::new(config.sender_name.clone())),
            prefix: config.prefix.clone(),
        }
    }

    /// Run the read-dispatch loop until stdin closes.
    pub async fn run(&self) -> std::io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            let Some(body) = trimmed.strip_prefix(&self.prefix) else {
                continue;
            };
            if body.trim().is_empty() {
                continue;
            }
            let result = self.manager.dispatch(Arc::clone(&self.sender), body).await;
            debug!(kind = result.kind().label(), "console dispatch finished");
        }
        Ok(())
    }
}

/// Register the console's built-in commands: `help` and `stats`.
pub fn register_builtins(manager: &Arc<CommandManager>) -> Result<(), crate::error::RegistrationError> {
    let weak: Weak<CommandManager> = Arc::downgrade(manager);
    manager.register(
        CommandBuilder::new(["help", "?"])
            .description("List registered commands and their usage")
            .handler(move |_ctx, _args| {
                let Some(manager) = weak.upgrade() else {
                    return Ok(CommandResult::ok());
                };
                Ok(CommandResult::of(render_help(&manager)))
            }),
    )?;

    let weak: Weak<CommandManager> = Arc::downgrade(manager);
    manager.register(
        CommandBuilder::new(["stats"])
            .description("Show command usage counters")
            .handler(move |_ctx, _args| {
                let Some(manager) = weak.upgrade() else {
                    return Ok(CommandResult::ok());
                };
                let stats = manager.command_stats();
                if stats.is_empty() {
                    return Ok(CommandResult::of("No commands have been used yet"));
                }
                let lines: Vec<String> = stats
                    .into_iter()
                    .map(|(name, count)| format!("{name}: {count}"))
                    .collect();
                Ok(CommandResult::of(lines.join("\n")))
            }),
    )?;
    Ok(())
}

fn render_help(manager: &CommandManager) -> String {
    let mut lines = Vec::new();
    for root in manager.roots() {
        append_help_line(manager, root, &mut lines);
        let Some(command) = manager.command(root) else {
            continue;
        };
        for child in command.children() {
            append_help_line(manager, child, &mut lines);
        }
    }
    lines.join("\n")
}

fn append_help_line(manager: &CommandManager, id: crate::command::CommandId, lines: &mut Vec<String>) {
    let Some(command) = manager.command(id) else {
        return;
    };
    let Some(usage) = manager.usage_of(id) else {
        return;
    };
    if command.description().is_empty() {
        lines.push(usage);
    } else {
        lines.push(format!("{usage} - {}", command.description()));
    }
}
