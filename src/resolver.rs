//! Argument resolution: turning the positional token stream into the value
//! array a command body is invoked with.
//!
//! Resolution walks the command's argument list in declaration order,
//! keeping a running index shift so grouped arguments push later positions
//! outward. The first failure aborts resolution; the command body is never
//! invoked on a partial value array.

use crate::arguments::Argument;
use crate::command::ResolvedArgs;
use crate::context::CommandContext;
use crate::error::ArgumentError;
use crate::messages::MessagesProvider;
use crate::result::CommandResult;

/// Resolve the context's token stream against its command's argument list.
pub fn resolve(ctx: &CommandContext) -> Result<ResolvedArgs, ArgumentError> {
    let mut values: Vec<Box<dyn std::any::Any + Send>> =
        Vec::with_capacity(ctx.command().arguments().len());
    // Extra tokens consumed by grouped arguments so far; added to every
    // later position when indexing into the token stream
    let mut last_index = 0usize;

    for argument in ctx.command().arguments() {
        match argument {
            Argument::Extra(extra) => {
                let provider = ctx.registry().extra_for(extra.type_id()).ok_or_else(|| {
                    ArgumentError::Provider {
                        message: ctx.messages().unresolved_type(extra.type_name()),
                    }
                })?;
                values.push(provider.value_from_context(ctx)?);
            }
            Argument::Single(single) => {
                let provider = ctx
                    .registry()
                    .contextual_for(single.type_id())
                    .ok_or_else(|| ArgumentError::Provider {
                        message: ctx.messages().unresolved_type(single.type_name()),
                    })?;
                let index = single.position() + last_index;
                match single.behaviour().extract(ctx.line(), index) {
                    Some((raw, shift)) => {
                        let value = if single.required() {
                            provider.value_from_string(&raw, ctx)?
                        } else {
                            provider.present_from_string(&raw, ctx)?
                        };
                        values.push(value);
                        last_index += shift;
                    }
                    None if single.required() => {
                        return Err(ArgumentError::Missing {
                            name: single.name().to_string(),
                            description: single.description().to_string(),
                            position: single.position(),
                            missing: 1,
                        });
                    }
                    None => values.push(provider.absent()),
                }
            }
        }
    }

    Ok(ResolvedArgs::new(values))
}

/// Convert a resolution failure into the result returned to the caller:
/// missing input becomes a usage-kind result, provider failures an
/// error-kind result.
pub(crate) fn failure_result(error: &ArgumentError, messages: &dyn MessagesProvider) -> CommandResult {
    match error {
        ArgumentError::Missing {
            name,
            description,
            position,
            ..
        } => CommandResult::usage(messages.missing_argument(name, description, *position)),
        ArgumentError::Provider { message } => CommandResult::error(message.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::DefaultMessages;
    use crate::result::ResultKind;

    #[test]
    fn test_missing_becomes_usage_kind() {
        let error = ArgumentError::Missing {
            name: "target".into(),
            description: "who".into(),
            position: 1,
            missing: 1,
        };
        let result = failure_result(&error, &DefaultMessages);
        assert_eq!(result.kind(), ResultKind::Usage);
        let message = result.message().unwrap();
        assert!(message.contains("target"));
        assert!(message.contains('1'));
    }

    #[test]
    fn test_provider_failure_becomes_error_kind() {
        let error = ArgumentError::Provider {
            message: "x is not a valid integer".into(),
        };
        let result = failure_result(&error, &DefaultMessages);
        assert_eq!(result.kind(), ResultKind::Error);
        assert_eq!(result.message(), Some("x is not a valid integer"));
    }
}
