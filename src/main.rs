//! herald-console - interactive console front-end for the herald dispatch
//! core.
//!
//! Reads prefixed lines from stdin and routes them through a command
//! manager wired with the default providers and middlewares.

use herald::command::CommandBuilder;
use herald::config::ConsoleConfig;
use herald::console::{ConsoleListener, register_builtins};
use herald::manager::CommandManager;
use herald::result::CommandResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration; a missing file falls back to defaults
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "herald.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        ConsoleConfig::load(&config_path).map_err(|e| {
            error!(path = %config_path, error = %e, "Failed to load config");
            e
        })?
    } else {
        ConsoleConfig::default()
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone())),
        )
        .with_target(true)
        .init();

    info!(prefix = %config.prefix, "Starting herald-console");

    let manager = Arc::new(CommandManager::with_defaults());
    manager.add_default_middlewares();
    register_builtins(&manager)?;
    register_demo_commands(&manager)?;

    let listener = ConsoleListener::new(Arc::clone(&manager), &config);
    listener.run().await?;

    info!("stdin closed, shutting down");
    Ok(())
}

/// A few commands exercising the argument model end to end.
fn register_demo_commands(manager: &Arc<CommandManager>) -> anyhow::Result<()> {
    manager
        .registry()
        .add_extra_provider::<String, _>(herald::providers::SenderNameProvider);
    manager.register(
        CommandBuilder::new(["whoami"])
            .description("Show who the console sender is")
            .extra::<String>()
            .handler(|_ctx, mut args| {
                let name: String = args.next()?;
                Ok(CommandResult::of(format!("You are {name}")))
            }),
    )?;

    manager.register(
        CommandBuilder::new(["greet", "hello"])
            .description("Greet someone")
            .required::<String>("name", "who to greet")
            .optional::<u64>("times", "how many times")
            .handler(|_ctx, mut args| {
                let name: String = args.next()?;
                let times = args.optional::<u64>()?.unwrap_or(1);
                let line = format!("Hello, {name}!");
                Ok(CommandResult::of(
                    std::iter::repeat_n(line, times as usize)
                        .collect::<Vec<_>>()
                        .join("\n"),
                ))
            }),
    )?;

    manager.register(
        CommandBuilder::new(["echo"])
            .description("Repeat the rest of the line")
            .continuous::<String>("message", "what to repeat")
            .cooldown(Duration::from_secs(3))
            .handler(|_ctx, mut args| {
                let message: String = args.next()?;
                Ok(CommandResult::of(message).consuming_cooldown())
            }),
    )?;

    let parent = manager.register(
        CommandBuilder::new(["timer"])
            .description("Duration parsing playground")
            .handler(|_ctx, _args| {
                Ok(CommandResult::of("Usage: timer parse <duration>"))
            }),
    )?;
    manager.register_child(
        parent,
        CommandBuilder::new(["parse"])
            .description("Parse a duration token")
            .required::<Duration>("duration", "e.g. 90, 10s, 5m, 2h")
            .handler(|_ctx, mut args| {
                let duration: Duration = args.next()?;
                Ok(CommandResult::of(format!("{duration:?}")))
            }),
    )?;

    Ok(())
}
