//! Command results.
//!
//! A [`CommandResult`] is the opaque signal produced by every invocation:
//! a kind, an optional human-readable message, and a marker telling the
//! cooldown middleware whether the invocation should consume the caller's
//! cooldown. Rendering (colors, embeds) is the front-end's business.

/// The kind of a command result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// The command ran and did what it was asked to.
    Success,
    /// The command could not run for a user-correctable reason.
    Error,
    /// The input did not match the command's argument list.
    Usage,
    /// The caller is still within the command's cooldown window.
    Cooldown,
    /// An internal failure; details were logged, not surfaced.
    Unknown,
}

impl ResultKind {
    /// Get a static label for log and metric labeling.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Usage => "usage",
            Self::Cooldown => "cooldown",
            Self::Unknown => "unknown",
        }
    }
}

/// The outcome of a command invocation.
#[derive(Debug, Clone)]
pub struct CommandResult {
    kind: ResultKind,
    message: Option<String>,
    consumes_cooldown: bool,
}

impl CommandResult {
    /// A silent success.
    pub fn ok() -> Self {
        Self {
            kind: ResultKind::Success,
            message: None,
            consumes_cooldown: false,
        }
    }

    /// A success with a message for the caller.
    pub fn of(message: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Success,
            message: Some(message.into()),
            consumes_cooldown: false,
        }
    }

    /// A user-correctable failure.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Error,
            message: Some(message.into()),
            consumes_cooldown: false,
        }
    }

    /// A usage failure (bad or missing arguments).
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Usage,
            message: Some(message.into()),
            consumes_cooldown: false,
        }
    }

    /// A cooldown rejection.
    pub fn cooldown(message: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Cooldown,
            message: Some(message.into()),
            consumes_cooldown: false,
        }
    }

    /// An opaque internal failure.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Unknown,
            message: Some(message.into()),
            consumes_cooldown: false,
        }
    }

    /// Mark this result as consuming the caller's cooldown.
    ///
    /// Commands with a cooldown must flag their successful results, or the
    /// cooldown claim is rolled back after the invocation.
    pub fn consuming_cooldown(mut self) -> Self {
        self.consumes_cooldown = true;
        self
    }

    /// The kind of this result.
    #[inline]
    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    /// The message to show the caller, if any.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether this result consumes the caller's cooldown.
    #[inline]
    pub fn consumes_cooldown(&self) -> bool {
        self.consumes_cooldown
    }

    /// Whether this result is a success.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.kind == ResultKind::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_kinds() {
        assert_eq!(CommandResult::ok().kind(), ResultKind::Success);
        assert_eq!(CommandResult::error("no").kind(), ResultKind::Error);
        assert_eq!(CommandResult::usage("usage").kind(), ResultKind::Usage);
        assert!(CommandResult::ok().message().is_none());
        assert_eq!(CommandResult::of("hi").message(), Some("hi"));
    }

    #[test]
    fn test_cooldown_marker() {
        let result = CommandResult::of("paid").consuming_cooldown();
        assert!(result.consumes_cooldown());
        assert!(!CommandResult::of("paid").consumes_cooldown());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ResultKind::Success.label(), "success");
        assert_eq!(ResultKind::Cooldown.label(), "cooldown");
    }
}
