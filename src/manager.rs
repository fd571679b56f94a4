//! The command manager: registration, routing and completion.
//!
//! Commands live in an arena table addressed by [`CommandId`]; parents hold
//! child ids instead of owning child objects, so children can be registered
//! after their parent. Dispatch walks parent to child one leading token at
//! a time and falls back to the parent's own body when no child matches.

use crate::command::{Command, CommandBuilder, CommandId};
use crate::context::{CommandContext, CommandSender};
use crate::messages::{DefaultMessages, MessagesProvider};
use crate::middleware::{CooldownMiddleware, Middleware, ResultHandlingMiddleware};
use crate::parser::{ParsedLine, tokenize};
use crate::providers::ProvidersRegistry;
use crate::result::{CommandResult, ResultKind};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Instrument, Level, debug, span};

/// Owns the registered command tree and routes invocations into it.
///
/// The table and the middleware sets are expected to be populated during
/// startup and read concurrently afterwards; both phases are safe, and
/// registration while serving is synchronized against dispatch.
pub struct CommandManager {
    nodes: RwLock<Vec<Arc<Command>>>,
    /// Per-command invocation counters, indexed like `nodes`.
    counters: RwLock<Vec<Arc<AtomicU64>>>,
    roots: RwLock<Vec<CommandId>>,
    registry: Arc<ProvidersRegistry>,
    messages: Arc<dyn MessagesProvider>,
    global_middlewares: RwLock<Vec<Arc<dyn Middleware>>>,
    pool_middlewares: RwLock<Vec<Arc<dyn Middleware>>>,
}

impl CommandManager {
    /// Create a manager over the given registry and messages provider.
    pub fn new(registry: Arc<ProvidersRegistry>, messages: Arc<dyn MessagesProvider>) -> Self {
        Self {
            nodes: RwLock::new(Vec::new()),
            counters: RwLock::new(Vec::new()),
            roots: RwLock::new(Vec::new()),
            registry,
            messages,
            global_middlewares: RwLock::new(Vec::new()),
            pool_middlewares: RwLock::new(Vec::new()),
        }
    }

    /// A manager with the standard providers and default English messages.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(ProvidersRegistry::with_defaults()),
            Arc::new(DefaultMessages),
        )
    }

    /// The provider registry serving this manager.
    pub fn registry(&self) -> &Arc<ProvidersRegistry> {
        &self.registry
    }

    /// Add a middleware that applies to every command registered from now
    /// on, unless a command excludes it by name.
    pub fn add_global_middleware(&self, middleware: impl Middleware + 'static) {
        self.global_middlewares.write().push(Arc::new(middleware));
    }

    /// Add a pool middleware commands can opt into by name.
    pub fn add_middleware(&self, middleware: impl Middleware + 'static) {
        self.pool_middlewares.write().push(Arc::new(middleware));
    }

    /// Add the default global middlewares: result delivery and cooldown
    /// enforcement.
    pub fn add_default_middlewares(&self) {
        // Delivery first: its before-hook always passes, so its after-hook
        // still runs when a later middleware short-circuits and the
        // rejection reaches the sender
        self.add_global_middleware(ResultHandlingMiddleware);
        self.add_global_middleware(CooldownMiddleware);
    }

    /// Register a top-level command.
    pub fn register(
        &self,
        builder: CommandBuilder,
    ) -> Result<CommandId, crate::error::RegistrationError> {
        let command = self.build(builder, None)?;
        {
            let nodes = self.nodes.read();
            for root in self.roots.read().iter() {
                let sibling = &nodes[root.0];
                if let Some(alias) = overlap(sibling, &command) {
                    return Err(crate::error::RegistrationError::DuplicateAlias(alias));
                }
            }
        }
        let id = self.push(command);
        self.roots.write().push(id);
        debug!(command = %self.nodes.read()[id.0].name(), id = id.0, "registered command");
        Ok(id)
    }

    /// Register a child of an existing command.
    pub fn register_child(
        &self,
        parent: CommandId,
        builder: CommandBuilder,
    ) -> Result<CommandId, crate::error::RegistrationError> {
        let parent_command = self
            .command(parent)
            .ok_or(crate::error::RegistrationError::InvalidParent(parent.0))?;
        let command = self.build(builder, Some(parent))?;
        {
            let nodes = self.nodes.read();
            for child in parent_command.children() {
                let sibling = &nodes[child.0];
                if let Some(alias) = overlap(sibling, &command) {
                    return Err(crate::error::RegistrationError::DuplicateAlias(alias));
                }
            }
        }
        let id = self.push(command);
        parent_command.add_child(id);
        debug!(
            parent = %parent_command.name(),
            command = %self.nodes.read()[id.0].name(),
            id = id.0,
            "registered child command"
        );
        Ok(id)
    }

    fn build(
        &self,
        builder: CommandBuilder,
        parent: Option<CommandId>,
    ) -> Result<Command, crate::error::RegistrationError> {
        let global = self.global_middlewares.read().clone();
        let pool = self.pool_middlewares.read().clone();
        builder.build(&global, &pool, &self.registry, parent)
    }

    fn push(&self, command: Command) -> CommandId {
        let mut nodes = self.nodes.write();
        let id = CommandId(nodes.len());
        nodes.push(Arc::new(command));
        self.counters.write().push(Arc::new(AtomicU64::new(0)));
        id
    }

    /// Look up a command by id.
    pub fn command(&self, id: CommandId) -> Option<Arc<Command>> {
        self.nodes.read().get(id.0).cloned()
    }

    /// Ids of the registered top-level commands, in registration order.
    pub fn roots(&self) -> Vec<CommandId> {
        self.roots.read().clone()
    }

    /// Find a top-level command by alias, case-insensitively.
    pub fn find(&self, alias: &str) -> Option<CommandId> {
        let nodes = self.nodes.read();
        self.roots
            .read()
            .iter()
            .copied()
            .find(|id| nodes[id.0].has_alias(alias))
    }

    fn child_matching(&self, command: &Command, alias: &str) -> Option<CommandId> {
        let nodes = self.nodes.read();
        command
            .children()
            .into_iter()
            .find(|id| nodes[id.0].has_alias(alias))
    }

    /// Render the full usage line of a command: the alias chain from its
    /// root followed by its argument usage.
    pub fn usage_of(&self, id: CommandId) -> Option<String> {
        let nodes = self.nodes.read();
        let mut names = Vec::new();
        let mut current = nodes.get(id.0)?;
        names.push(current.name().to_string());
        while let Some(parent) = current.parent() {
            current = nodes.get(parent.0)?;
            names.push(current.name().to_string());
        }
        names.reverse();
        let command = &nodes[id.0];
        let usage = command.usage();
        if usage.is_empty() {
            Some(names.join(" "))
        } else {
            Some(format!("{} {}", names.join(" "), usage))
        }
    }

    /// Per-command invocation counts, most used first. Commands that were
    /// never invoked are omitted.
    pub fn command_stats(&self) -> Vec<(String, u64)> {
        let nodes = self.nodes.read();
        let counters = self.counters.read();
        let mut stats: Vec<(String, u64)> = nodes
            .iter()
            .zip(counters.iter())
            .map(|(node, counter)| (node.name().to_string(), counter.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1));
        stats
    }

    /// Route a raw line to a command and run it.
    ///
    /// The first token selects a top-level command; while the selected
    /// command has a child matching the next token, routing descends. The
    /// remaining tokens are flag-parsed against the final command and become
    /// its positional stream.
    pub async fn dispatch(&self, sender: Arc<dyn CommandSender>, line: &str) -> CommandResult {
        let tokens = tokenize(line);
        let Some(first) = tokens.first() else {
            return CommandResult::error(self.messages.command_not_found(""));
        };
        let Some(root) = self.find(first) else {
            debug!(token = %first, "unknown command");
            return CommandResult::error(self.messages.command_not_found(first));
        };

        let (id, command, consumed) = self.descend(root, &tokens);
        self.counters.read()[id.0].fetch_add(1, Ordering::Relaxed);

        let parsed = ParsedLine::parse(&tokens[consumed..], command.options());
        let ctx = CommandContext::new(
            sender.clone(),
            parsed,
            Arc::clone(&self.registry),
            Arc::clone(&self.messages),
            Arc::clone(&command),
        );

        let dispatch_span = span!(
            Level::DEBUG,
            "command.dispatch",
            command = %command.name(),
            sender = %sender.name(),
        );
        let result = command.execute(&ctx).instrument(dispatch_span).await;

        if result.kind() != ResultKind::Success {
            debug!(
                command = %command.name(),
                sender = %sender.name(),
                kind = result.kind().label(),
                "command did not succeed"
            );
        }
        result
    }

    /// Walk the child tree from `root`, consuming one leading token per
    /// matched child. Returns the final command and how many tokens were
    /// consumed by the alias path.
    fn descend(&self, root: CommandId, tokens: &[String]) -> (CommandId, Arc<Command>, usize) {
        let mut id = root;
        let mut command = self.command(root).expect("root id is always valid");
        let mut consumed = 1usize;
        while let Some(next) = tokens.get(consumed) {
            let Some(child) = self.child_matching(&command, next) else {
                break;
            };
            id = child;
            command = self.command(child).expect("child id is always valid");
            consumed += 1;
        }
        (id, command, consumed)
    }

    /// Complete the last token of a partial input line.
    ///
    /// Follows the same recursive alias matching as dispatch; the last
    /// token completes against child aliases first, then the suggestion
    /// list of the argument at that position (static suggestions win over
    /// provider suggestions).
    pub fn complete(&self, sender: &Arc<dyn CommandSender>, line: &str) -> Vec<String> {
        let ends_open = line.is_empty() || line.ends_with(char::is_whitespace);
        let tokens = tokenize(line);
        let (path, partial): (&[String], &str) = if ends_open {
            (tokens.as_slice(), "")
        } else {
            let (last, rest) = tokens.split_last().expect("non-empty by construction");
            (rest, last.as_str())
        };

        // Completing the command name itself
        if path.is_empty() {
            let nodes = self.nodes.read();
            return self
                .roots
                .read()
                .iter()
                .flat_map(|id| nodes[id.0].aliases().to_vec())
                .filter(|alias| starts_with_ignore_case(alias, partial))
                .collect();
        }

        let Some(root) = self.find(&path[0]) else {
            return Vec::new();
        };
        let (_, command, consumed) = self.descend(root, path);
        let mut candidates = Vec::new();

        // Child aliases only compete for the token right after the path
        let positional = path.len() - consumed;
        if positional == 0 {
            let nodes = self.nodes.read();
            candidates.extend(
                command
                    .children()
                    .into_iter()
                    .map(|id| nodes[id.0].name().to_string()),
            );
        }

        if let Some(single) = command.arguments().iter().find_map(|argument| match argument {
            crate::arguments::Argument::Single(single) if single.position() == positional => {
                Some(single)
            }
            _ => None,
        }) {
            if !single.suggestions().is_empty() {
                candidates.extend(single.suggestions().iter().cloned());
            } else if let Some(provider) = self.registry.contextual_for(single.type_id()) {
                let ctx = CommandContext::new(
                    Arc::clone(sender),
                    ParsedLine::parse(&path[consumed..], command.options()),
                    Arc::clone(&self.registry),
                    Arc::clone(&self.messages),
                    Arc::clone(&command),
                );
                candidates.extend(provider.suggest(partial, &ctx));
            }
        }

        candidates.retain(|candidate| starts_with_ignore_case(candidate, partial));
        candidates
    }
}

fn overlap(existing: &Command, candidate: &Command) -> Option<String> {
    candidate
        .aliases()
        .iter()
        .find(|alias| existing.has_alias(alias))
        .cloned()
}

fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
