//! Command bodies and typed access to resolved values.

use crate::context::CommandContext;
use crate::error::ExecutorError;
use crate::result::CommandResult;
use async_trait::async_trait;
use std::any::Any;

/// The values synthesized by argument resolution, in declaration order.
///
/// Executors drain this cursor with [`ResolvedArgs::next`] (required and
/// extra parameters) and [`ResolvedArgs::optional`] (optional parameters),
/// in the same order the arguments were declared.
pub struct ResolvedArgs {
    values: Vec<Option<Box<dyn Any + Send>>>,
    cursor: usize,
}

impl ResolvedArgs {
    pub(crate) fn new(values: Vec<Box<dyn Any + Send>>) -> Self {
        Self {
            values: values.into_iter().map(Some).collect(),
            cursor: 0,
        }
    }

    /// How many values were resolved.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values were resolved.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the next value as a `T`.
    ///
    /// Fails when the declaration order and the access order disagree -
    /// that is a bug in the command, not in the input.
    pub fn next<T: 'static>(&mut self) -> Result<T, ExecutorError> {
        let index = self.cursor;
        self.cursor += 1;
        let slot = self
            .values
            .get_mut(index)
            .ok_or(ExecutorError::MissingValue { index })?;
        let boxed = slot.take().ok_or(ExecutorError::MissingValue { index })?;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ExecutorError::TypeMismatch {
                index,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Take the next value as an optional `T`.
    ///
    /// Optional single arguments resolve to `Option<T>`: `Some` when a
    /// token was supplied, `None` when it was absent.
    pub fn optional<T: 'static>(&mut self) -> Result<Option<T>, ExecutorError> {
        self.next::<Option<T>>()
    }
}

/// The body of a command.
///
/// Implementations receive the invocation context and the resolved value
/// array and return a [`CommandResult`]. Returning
/// [`ExecutorError::Failed`] with a non-empty message surfaces that message
/// to the caller as an error result; any other failure is logged and
/// collapsed into an opaque unknown-error result.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run the command.
    async fn invoke(
        &self,
        ctx: &CommandContext,
        args: ResolvedArgs,
    ) -> Result<CommandResult, ExecutorError>;
}

/// Adapter for synchronous command bodies.
pub struct FnExecutor<F>(F);

impl<F> FnExecutor<F>
where
    F: Fn(&CommandContext, ResolvedArgs) -> Result<CommandResult, ExecutorError> + Send + Sync,
{
    /// Wrap a synchronous function as an executor.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> CommandExecutor for FnExecutor<F>
where
    F: Fn(&CommandContext, ResolvedArgs) -> Result<CommandResult, ExecutorError> + Send + Sync,
{
    async fn invoke(
        &self,
        ctx: &CommandContext,
        args: ResolvedArgs,
    ) -> Result<CommandResult, ExecutorError> {
        (self.0)(ctx, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_preserves_declaration_order() {
        let mut args = ResolvedArgs::new(vec![
            Box::new("alpha".to_string()),
            Box::new(7i64),
            Box::new(Some(true)),
        ]);
        assert_eq!(args.len(), 3);
        assert_eq!(args.next::<String>().unwrap(), "alpha");
        assert_eq!(args.next::<i64>().unwrap(), 7);
        assert_eq!(args.optional::<bool>().unwrap(), Some(true));
    }

    #[test]
    fn test_type_mismatch_reports_index() {
        let mut args = ResolvedArgs::new(vec![Box::new(1i64)]);
        let err = args.next::<String>().unwrap_err();
        assert!(matches!(err, ExecutorError::TypeMismatch { index: 0, .. }));
    }

    #[test]
    fn test_exhausted_args() {
        let mut args = ResolvedArgs::new(Vec::new());
        assert!(matches!(
            args.next::<i64>(),
            Err(ExecutorError::MissingValue { index: 0 })
        ));
    }
}
