//! Unified error handling for herald.
//!
//! Three families of failures exist in the dispatch core:
//!
//! - [`RegistrationError`]: startup-time misconfiguration. These abort the
//!   registration of the offending command and are the only errors allowed
//!   to cross the registration API as `Err`.
//! - [`ArgumentError`]: per-invocation, expected. Produced while resolving
//!   user input against a command's argument list and converted into a
//!   [`CommandResult`](crate::result::CommandResult) before reaching the
//!   caller - they never escape `dispatch` as errors.
//! - [`ExecutorError`]: returned by a command body. A non-empty failure
//!   message becomes a user-visible error result; everything else is logged
//!   and collapsed into an opaque unknown-error result.

use thiserror::Error;

// ============================================================================
// Registration errors (startup-time)
// ============================================================================

/// Errors raised while registering a command or parsing an argument schema.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The alias list was empty.
    #[error("command must declare at least one alias")]
    NoAliases,

    /// An alias was empty or contained whitespace.
    #[error("alias '{0}' contains whitespace or is empty")]
    InvalidAlias(String),

    /// An alias collides with a sibling command.
    #[error("alias '{0}' is already registered")]
    DuplicateAlias(String),

    /// A continuous argument was followed by another positional argument.
    #[error("continuous argument '{0}' must be the last positional argument")]
    ContinuousNotLast(String),

    /// An argument's target type has no registered provider of the right
    /// kind.
    #[error("argument '{argument}' has no provider registered for type {type_name}")]
    UnprovidedType {
        /// Name of the offending argument.
        argument: String,
        /// Name of the unprovided type.
        type_name: String,
    },

    /// The builder was registered without a command body.
    #[error("command must have an executor")]
    NoExecutor,

    /// `register_child` was called with an id outside the arena.
    #[error("unknown parent command id {0}")]
    InvalidParent(usize),

    /// A schema token did not follow the `<type:name[:description]>`
    /// grammar.
    #[error("malformed argument schema token '{token}': {reason}")]
    MalformedSchema {
        /// The offending schema token.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A schema type key was absent from the mapping table.
    #[error("schema type key '{0}' does not match any mapping")]
    UnknownTypeKey(String),
}

impl RegistrationError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoAliases => "no_aliases",
            Self::InvalidAlias(_) => "invalid_alias",
            Self::DuplicateAlias(_) => "duplicate_alias",
            Self::ContinuousNotLast(_) => "continuous_not_last",
            Self::UnprovidedType { .. } => "unprovided_type",
            Self::NoExecutor => "no_executor",
            Self::InvalidParent(_) => "invalid_parent",
            Self::MalformedSchema { .. } => "malformed_schema",
            Self::UnknownTypeKey(_) => "unknown_type_key",
        }
    }
}

// ============================================================================
// Argument resolution errors (per-invocation, expected)
// ============================================================================

/// A provider could not produce a value.
///
/// The message is user-facing and should come from the
/// [`MessagesProvider`](crate::messages::MessagesProvider) attached to the
/// invocation context.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    /// User-facing description of the failure.
    pub message: String,
}

impl ProviderError {
    /// Create a provider error with a user-facing message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors produced while resolving the token stream against a command's
/// argument list.
///
/// The first failure aborts resolution; the command body is never invoked.
#[derive(Debug, Clone, Error)]
pub enum ArgumentError {
    /// A required single argument had no token to consume.
    #[error("missing argument '{name}' at position {position}")]
    Missing {
        /// Declared name of the argument.
        name: String,
        /// Declared description of the argument.
        description: String,
        /// Position of the argument among the command's single arguments.
        position: usize,
        /// How many tokens were missing (always 1 for normal arguments,
        /// may be larger for legacy grouped arguments).
        missing: usize,
    },

    /// A token was present but the provider rejected it, or a context-only
    /// value was unavailable.
    #[error("{message}")]
    Provider {
        /// User-facing description of the failure.
        message: String,
    },
}

impl From<ProviderError> for ArgumentError {
    fn from(err: ProviderError) -> Self {
        Self::Provider {
            message: err.message,
        }
    }
}

// ============================================================================
// Executor errors (command bodies)
// ============================================================================

/// Errors returned by a command body or by typed access to resolved values.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// Domain failure with a user-visible message.
    #[error("{0}")]
    Failed(String),

    /// A resolved value did not have the type the executor asked for.
    /// This is a programming error in the command declaration.
    #[error("resolved argument {index} is not a {expected}")]
    TypeMismatch {
        /// Index of the value in declaration order.
        index: usize,
        /// The type the executor asked for.
        expected: &'static str,
    },

    /// The executor asked for more values than were resolved.
    #[error("no resolved argument at index {index}")]
    MissingValue {
        /// Index of the first value that was not there.
        index: usize,
    },
}

impl ExecutorError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Failed(_) => "failed",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::MissingValue { .. } => "missing_value",
        }
    }
}
