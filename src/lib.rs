//! # herald
//!
//! A command dispatch core for chat front-ends: declare commands with a
//! typed argument schema, register providers that turn raw tokens into
//! typed values, and let the manager route incoming lines through a
//! middleware chain into your command bodies.
//!
//! ## Features
//!
//! - Typed argument model: required/optional positional arguments, context
//!   supplied extras, continuous and quoted-group consumption behaviours
//! - Type-indexed provider registry with pick-first lookup
//! - Ordered, short-circuiting middleware chain (permission, cooldown,
//!   result delivery ship in the box)
//! - Parent/child command trees with recursive alias routing and tab
//!   completion
//! - Per-caller cooldowns with atomic claim semantics
//!
//! ## Quick start
//!
//! ```no_run
//! use herald::command::CommandBuilder;
//! use herald::console::{ConsoleSender, register_builtins};
//! use herald::manager::CommandManager;
//! use herald::result::CommandResult;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let manager = Arc::new(CommandManager::with_defaults());
//!     manager.add_default_middlewares();
//!     register_builtins(&manager).unwrap();
//!
//!     manager
//!         .register(
//!             CommandBuilder::new(["greet"])
//!                 .description("Say hello")
//!                 .required::<String>("name", "who to greet")
//!                 .handler(|_ctx, mut args| {
//!                     let name: String = args.next()?;
//!                     Ok(CommandResult::of(format!("Hello, {name}!")))
//!                 }),
//!         )
//!         .unwrap();
//!
//!     let sender = Arc::new(ConsoleSender::new("console"));
//!     let result = manager.dispatch(sender, "greet world").await;
//!     assert_eq!(result.message(), Some("Hello, world!"));
//! }
//! ```

#![warn(missing_docs)]

pub mod arguments;
pub mod command;
pub mod config;
pub mod console;
pub mod context;
pub mod error;
pub mod flags;
pub mod manager;
pub mod messages;
pub mod middleware;
pub mod parser;
pub mod providers;
pub mod resolver;
pub mod result;

pub use crate::arguments::{Argument, ArgumentBehaviour, ArgumentSpec};
pub use crate::command::{Command, CommandBuilder, CommandExecutor, CommandId, ResolvedArgs};
pub use crate::context::{CommandContext, CommandSender};
pub use crate::error::{ArgumentError, ExecutorError, ProviderError, RegistrationError};
pub use crate::flags::{CommandOption, FlagValue};
pub use crate::manager::CommandManager;
pub use crate::messages::{DefaultMessages, MessagesProvider};
pub use crate::middleware::{
    CooldownManager, CooldownMiddleware, Middleware, PermissionMiddleware,
    ResultHandlingMiddleware,
};
pub use crate::providers::{ArgumentProvider, ExtraProvider, ProvidersRegistry};
pub use crate::result::{CommandResult, ResultKind};
