//! The argument model.
//!
//! Commands declare their formal parameters as an ordered list of
//! [`ArgumentSpec`]s; registration turns those into [`Argument`]s with
//! densely assigned positions. Two families exist:
//!
//! - [`ExtraArgument`]: resolved purely from the execution context, never
//!   consumes a token and carries no position.
//! - [`SingleArgument`]: resolved from user input at a 0-based position
//!   counted over single arguments only, with a token consumption
//!   [`ArgumentBehaviour`].

mod behaviour;
pub mod schema;

pub use behaviour::ArgumentBehaviour;

use crate::error::RegistrationError;
use std::any::TypeId;

const NO_NAME: &str = "No name provided";
const NO_DESCRIPTION: &str = "No description provided";

/// A formal parameter of a command.
#[derive(Debug, Clone)]
pub enum Argument {
    /// Resolved from context, no user input.
    Extra(ExtraArgument),
    /// Resolved from one (or a behaviour-defined group of) positional
    /// token(s).
    Single(SingleArgument),
}

impl Argument {
    /// The target type of the value this argument produces.
    pub fn type_id(&self) -> TypeId {
        match self {
            Self::Extra(extra) => extra.type_id,
            Self::Single(single) => single.type_id,
        }
    }

    /// The human-readable name of the target type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Extra(extra) => extra.type_name,
            Self::Single(single) => single.type_name,
        }
    }
}

/// A parameter supplied by the execution context.
#[derive(Debug, Clone)]
pub struct ExtraArgument {
    type_id: TypeId,
    type_name: &'static str,
}

impl ExtraArgument {
    /// The target type of this argument.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The human-readable name of the target type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// A parameter supplied by user input.
#[derive(Debug, Clone)]
pub struct SingleArgument {
    name: String,
    description: String,
    suggestions: Vec<String>,
    behaviour: ArgumentBehaviour,
    type_id: TypeId,
    type_name: &'static str,
    required: bool,
    position: usize,
}

impl SingleArgument {
    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Static completion suggestions, in declaration order.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// The token consumption behaviour.
    pub fn behaviour(&self) -> ArgumentBehaviour {
        self.behaviour
    }

    /// The target type of this argument.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The human-readable name of the target type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether input for this argument is mandatory.
    pub fn required(&self) -> bool {
        self.required
    }

    /// The 0-based position among the command's single arguments.
    pub fn position(&self) -> usize {
        self.position
    }
}

// ============================================================================
// Declaration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecKind {
    Extra,
    Single,
}

/// A declared parameter, before positions are assigned.
///
/// Build specs with [`ArgumentSpec::extra`], [`ArgumentSpec::required`] and
/// [`ArgumentSpec::optional`], or parse them from a textual schema with
/// [`schema::parse`].
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    kind: SpecKind,
    name: String,
    description: String,
    suggestions: Vec<String>,
    behaviour: ArgumentBehaviour,
    required: bool,
    type_id: TypeId,
    type_name: &'static str,
}

impl ArgumentSpec {
    /// Declare a context-resolved parameter.
    pub fn extra<T: Send + 'static>() -> Self {
        Self {
            kind: SpecKind::Extra,
            name: String::new(),
            description: String::new(),
            suggestions: Vec::new(),
            behaviour: ArgumentBehaviour::Normal,
            required: false,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Declare a required positional parameter.
    pub fn required<T: Send + 'static>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::single::<T>(name, description, true)
    }

    /// Declare an optional positional parameter. It resolves to
    /// `Option<T>`, `None` when no token was supplied.
    pub fn optional<T: Send + 'static>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::single::<T>(name, description, false)
    }

    pub(crate) fn single_raw(
        type_id: TypeId,
        type_name: &'static str,
        name: String,
        description: String,
        required: bool,
        behaviour: ArgumentBehaviour,
    ) -> Self {
        Self {
            kind: SpecKind::Single,
            name,
            description,
            suggestions: Vec::new(),
            behaviour,
            required,
            type_id,
            type_name,
        }
    }

    fn single<T: Send + 'static>(
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self::single_raw(
            TypeId::of::<T>(),
            std::any::type_name::<T>(),
            name.into(),
            description.into(),
            required,
            ArgumentBehaviour::Normal,
        )
    }

    /// Set the token consumption behaviour.
    pub fn behaviour(mut self, behaviour: ArgumentBehaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    /// Attach static completion suggestions.
    pub fn suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    /// The declared target type.
    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn is_extra(&self) -> bool {
        self.kind == SpecKind::Extra
    }

    pub(crate) fn display_name(&self) -> &str {
        if self.name.is_empty() { NO_NAME } else { &self.name }
    }
}

/// Turn declared specs into arguments with densely assigned positions.
///
/// Positions count single arguments only, in declaration order. A
/// continuous argument must be the last single argument.
pub fn build_arguments(specs: &[ArgumentSpec]) -> Result<Vec<Argument>, RegistrationError> {
    let mut arguments = Vec::with_capacity(specs.len());
    let mut position = 0usize;
    for spec in specs {
        match spec.kind {
            SpecKind::Extra => arguments.push(Argument::Extra(ExtraArgument {
                type_id: spec.type_id,
                type_name: spec.type_name,
            })),
            SpecKind::Single => {
                arguments.push(Argument::Single(SingleArgument {
                    name: if spec.name.is_empty() {
                        NO_NAME.to_string()
                    } else {
                        spec.name.clone()
                    },
                    description: if spec.description.is_empty() {
                        NO_DESCRIPTION.to_string()
                    } else {
                        spec.description.clone()
                    },
                    suggestions: spec.suggestions.clone(),
                    behaviour: spec.behaviour,
                    type_id: spec.type_id,
                    type_name: spec.type_name,
                    required: spec.required,
                    position,
                }));
                position += 1;
            }
        }
    }

    // A continuous argument absorbs the rest of the input, so nothing can
    // be resolved after it
    let singles: Vec<&SingleArgument> = arguments
        .iter()
        .filter_map(|a| match a {
            Argument::Single(s) => Some(s),
            Argument::Extra(_) => None,
        })
        .collect();
    for (i, single) in singles.iter().enumerate() {
        if single.behaviour() == ArgumentBehaviour::Continuous && i + 1 != singles.len() {
            return Err(RegistrationError::ContinuousNotLast(single.name.clone()));
        }
    }

    Ok(arguments)
}

/// Render a usage string for an argument list: required arguments in
/// `<angle brackets>`, optional in `[square brackets]`, position order.
pub fn generate_usage(arguments: &[Argument]) -> String {
    let mut parts = Vec::new();
    for argument in arguments {
        let Argument::Single(single) = argument else {
            continue;
        };
        if single.required() {
            parts.push(format!("<{}>", single.name()));
        } else {
            parts.push(format!("[{}]", single.name()));
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_dense_and_skip_extras() {
        struct World;
        let specs = vec![
            ArgumentSpec::extra::<World>(),
            ArgumentSpec::required::<String>("name", "the name"),
            ArgumentSpec::extra::<u8>(),
            ArgumentSpec::optional::<i64>("amount", "how much"),
            ArgumentSpec::required::<String>("reason", "why").behaviour(ArgumentBehaviour::Continuous),
        ];
        let arguments = build_arguments(&specs).unwrap();
        let positions: Vec<Option<usize>> = arguments
            .iter()
            .map(|a| match a {
                Argument::Single(s) => Some(s.position()),
                Argument::Extra(_) => None,
            })
            .collect();
        assert_eq!(positions, vec![None, Some(0), None, Some(1), Some(2)]);
    }

    #[test]
    fn test_continuous_must_be_last() {
        let specs = vec![
            ArgumentSpec::required::<String>("message", "text").behaviour(ArgumentBehaviour::Continuous),
            ArgumentSpec::required::<i64>("count", "times"),
        ];
        assert!(matches!(
            build_arguments(&specs),
            Err(RegistrationError::ContinuousNotLast(name)) if name == "message"
        ));
    }

    #[test]
    fn test_usage_round_trip() {
        let specs = vec![
            ArgumentSpec::required::<String>("target", "who"),
            ArgumentSpec::optional::<String>("reason", "why"),
            ArgumentSpec::required::<i64>("days", "ban length"),
        ];
        let arguments = build_arguments(&specs).unwrap();
        assert_eq!(generate_usage(&arguments), "<target> [reason] <days>");
    }

    #[test]
    fn test_unnamed_argument_still_builds() {
        let specs = vec![ArgumentSpec::required::<String>("", "")];
        let arguments = build_arguments(&specs).unwrap();
        let Argument::Single(single) = &arguments[0] else {
            panic!("expected single argument");
        };
        assert_eq!(single.name(), "No name provided");
        assert_eq!(single.description(), "No description provided");
    }
}
