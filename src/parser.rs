//! Command line tokenization and flag extraction.
//!
//! A raw line is split on whitespace, then the flags declared by the target
//! command are lifted out of the token stream. What remains is the
//! positional stream that argument resolution consumes. Flag parsing always
//! runs first and is orthogonal to positional resolution.

use crate::flags::{CommandOption, FlagValue};
use std::collections::HashMap;

/// The parsed view of one command line: declared flags separated from
/// positional tokens.
#[derive(Debug, Clone, Default)]
pub struct ParsedLine {
    tokens: Vec<String>,
    flags: HashMap<String, Option<String>>,
}

impl ParsedLine {
    /// Parse a token slice against a command's declared flags.
    ///
    /// Recognized forms: `--name`, `-name`, `--name=value` and, for valued
    /// flags, `--name value` (the next token is consumed). Dash-prefixed
    /// tokens that match no declaration are kept as positional tokens.
    pub fn parse(tokens: &[String], options: &[CommandOption]) -> Self {
        let mut positional = Vec::with_capacity(tokens.len());
        let mut flags = HashMap::new();
        let mut iter = tokens.iter();

        while let Some(token) = iter.next() {
            let Some(bare) = strip_dashes(token) else {
                positional.push(token.clone());
                continue;
            };
            let (name, inline_value) = match bare.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (bare, None),
            };
            let Some(option) = options.iter().find(|o| o.has_alias(name)) else {
                positional.push(token.clone());
                continue;
            };
            let value = if inline_value.is_some() {
                inline_value
            } else if option.takes_value() {
                iter.next().cloned()
            } else {
                None
            };
            flags.insert(option.name().to_string(), value);
        }

        Self {
            tokens: positional,
            flags,
        }
    }

    /// Parse a raw line (no flag declarations, everything positional).
    pub fn from_line(line: &str) -> Self {
        Self {
            tokens: tokenize(line),
            flags: HashMap::new(),
        }
    }

    /// The positional tokens, in input order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The token at `index`, if present.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// All tokens from `index` to the end of input.
    pub fn tokens_from(&self, index: usize) -> &[String] {
        self.tokens.get(index..).unwrap_or(&[])
    }

    /// Join all tokens from `index` with single spaces.
    pub fn join_from(&self, index: usize) -> String {
        self.tokens_from(index).join(" ")
    }

    /// Whether the given flag was present.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// The flag with the given canonical name, if present.
    pub fn flag(&self, name: &str) -> Option<FlagValue> {
        self.flags
            .get(name)
            .map(|value| FlagValue::new(name, value.clone()))
    }

    /// The value carried by a flag, if the flag is present and valued.
    pub fn flag_value(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(|v| v.as_deref())
    }
}

/// Split a raw line into whitespace-delimited tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Join a run of tokens that starts with a double quote into one string.
///
/// Returns the joined content (quotes stripped) and how many tokens beyond
/// the first were consumed, so later positions can shift accordingly. A run
/// that does not open with a quote is a single-token group with shift 0.
/// An unterminated quote absorbs the rest of the input.
pub fn group_quoted(tokens: &[String]) -> Option<(String, usize)> {
    let first = tokens.first()?;
    let Some(rest) = first.strip_prefix('"') else {
        return Some((first.clone(), 0));
    };
    // Single token carrying both quotes: "word"
    if let Some(inner) = rest.strip_suffix('"') {
        if !rest.is_empty() {
            return Some((inner.to_string(), 0));
        }
    }
    let mut parts = vec![rest.to_string()];
    for (extra, token) in tokens[1..].iter().enumerate() {
        if let Some(inner) = token.strip_suffix('"') {
            parts.push(inner.to_string());
            return Some((parts.join(" "), extra + 1));
        }
        parts.push(token.clone());
    }
    Some((parts.join(" "), tokens.len() - 1))
}

fn strip_dashes(token: &str) -> Option<&str> {
    let bare = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))?;
    // A lone dash or a negative number is not a flag
    if bare.is_empty() || bare.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(bare)
}
