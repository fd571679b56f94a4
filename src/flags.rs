//! Command flag declarations and parsed flag values.
//!
//! Flags are declared per command and lifted out of the token stream before
//! positional argument resolution runs. An undeclared `-token` stays in the
//! positional stream, so negative numbers keep working as arguments.

/// A flag declared by a command.
///
/// The first alias is canonical and is the key under which parsed values are
/// stored. Aliases are matched without their leading dashes, so `-f` and
/// `--force` can both point at a flag declared with aliases `["force", "f"]`.
#[derive(Debug, Clone)]
pub struct CommandOption {
    aliases: Vec<String>,
    description: String,
    takes_value: bool,
}

impl CommandOption {
    /// Declare a presence-only flag.
    pub fn flag(aliases: impl IntoIterator<Item = impl Into<String>>, description: impl Into<String>) -> Self {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            description: description.into(),
            takes_value: false,
        }
    }

    /// Declare a flag that carries a value (`--key=value` or `--key value`).
    pub fn valued(aliases: impl IntoIterator<Item = impl Into<String>>, description: impl Into<String>) -> Self {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            description: description.into(),
            takes_value: true,
        }
    }

    /// The canonical name of this flag.
    pub fn name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or_default()
    }

    /// All aliases, canonical name first.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The declared description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this flag consumes a value.
    pub fn takes_value(&self) -> bool {
        self.takes_value
    }

    /// Check if the given bare name (no dashes) matches one of the aliases.
    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// A flag found on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagValue {
    name: String,
    value: Option<String>,
}

impl FlagValue {
    pub(crate) fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The canonical name of the matched flag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value supplied with the flag, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_matching() {
        let option = CommandOption::flag(["force", "f"], "skip confirmation");
        assert_eq!(option.name(), "force");
        assert!(option.has_alias("f"));
        assert!(option.has_alias("FORCE"));
        assert!(!option.has_alias("fo"));
    }

    #[test]
    fn test_valued_declaration() {
        let option = CommandOption::valued(["channel", "c"], "target channel");
        assert!(option.takes_value());
        assert!(!CommandOption::flag(["x"], "").takes_value());
    }
}
