//! Token consumption behaviours for single arguments.

use crate::parser::{ParsedLine, group_quoted};

/// How a single argument consumes tokens from the positional stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentBehaviour {
    /// Consume exactly one token.
    #[default]
    Normal,
    /// Consume and join every remaining token. Only valid as the last
    /// positional argument of a command.
    Continuous,
    /// Consume a double-quoted run of tokens as one value, shifting later
    /// positions by the extra tokens consumed.
    #[deprecated(note = "use Normal; quoted values are grouped the same way")]
    Multiple,
}

impl ArgumentBehaviour {
    /// Extract the raw value for an argument whose first token sits at
    /// `index`, returning the value and how many tokens beyond one were
    /// consumed. Returns `None` when no token is available at `index`.
    pub fn extract(&self, line: &ParsedLine, index: usize) -> Option<(String, usize)> {
        match self {
            Self::Normal => line.token(index).map(|t| (t.to_string(), 0)),
            Self::Continuous => {
                if line.token(index).is_some() {
                    Some((line.join_from(index), 0))
                } else {
                    None
                }
            }
            #[allow(deprecated)]
            Self::Multiple => group_quoted(line.tokens_from(index)),
        }
    }

    /// Get a static label for log and usage rendering.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Continuous => "continuous",
            #[allow(deprecated)]
            Self::Multiple => "multiple",
        }
    }
}
