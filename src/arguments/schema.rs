//! Textual argument schemas.
//!
//! A schema string declares positional arguments without going through the
//! typed [`ArgumentSpec`](super::ArgumentSpec) constructors:
//!
//! ```text
//! <string:target:Who-to-kick> [int:days] @<string:reason:Why>
//! ```
//!
//! - `<...>` declares a required argument, `[...]` an optional one.
//! - Inside the brackets, `type:name[:description]` - the type key is looked
//!   up in a [`TypeMappings`] table and dashes in the description become
//!   spaces.
//! - A leading `@` makes the argument continuous, a leading `*` makes it a
//!   quoted group.
//!
//! Context-resolved (extra) parameters cannot be expressed textually; any
//! token that is not bracketed is a registration-time error.

use super::{ArgumentBehaviour, ArgumentSpec};
use crate::error::RegistrationError;
use std::any::TypeId;
use std::collections::HashMap;
use std::time::Duration;

/// Mapping from schema type keys to target types.
#[derive(Debug, Clone, Default)]
pub struct TypeMappings {
    map: HashMap<String, (TypeId, &'static str)>,
}

impl TypeMappings {
    /// An empty mapping table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard table: `string`, `int`, `uint`, `float`, `bool`,
    /// `duration` and `text` (an alias of `string` meant for continuous
    /// arguments).
    pub fn standard() -> Self {
        let mut mappings = Self::new();
        mappings.insert::<String>("string");
        mappings.insert::<String>("text");
        mappings.insert::<i64>("int");
        mappings.insert::<u64>("uint");
        mappings.insert::<f64>("float");
        mappings.insert::<bool>("bool");
        mappings.insert::<Duration>("duration");
        mappings
    }

    /// Map `key` to type `T`. Keys are case-sensitive.
    pub fn insert<T: Send + 'static>(&mut self, key: impl Into<String>) {
        self.map
            .insert(key.into(), (TypeId::of::<T>(), std::any::type_name::<T>()));
    }

    fn lookup(&self, key: &str) -> Option<(TypeId, &'static str)> {
        self.map.get(key).copied()
    }
}

/// Parse a whitespace-separated schema string into argument specs.
///
/// Positions are not assigned here; that happens when the owning command is
/// registered.
pub fn parse(mappings: &TypeMappings, schema: &str) -> Result<Vec<ArgumentSpec>, RegistrationError> {
    schema
        .split_whitespace()
        .map(|token| parse_token(mappings, token))
        .collect()
}

fn parse_token(mappings: &TypeMappings, token: &str) -> Result<ArgumentSpec, RegistrationError> {
    #[allow(deprecated)]
    let (behaviour, body) = if let Some(rest) = token.strip_prefix('@') {
        (ArgumentBehaviour::Continuous, rest)
    } else if let Some(rest) = token.strip_prefix('*') {
        (ArgumentBehaviour::Multiple, rest)
    } else {
        (ArgumentBehaviour::Normal, token)
    };

    let (required, inner) = if let Some(inner) = body.strip_prefix('<').and_then(|b| b.strip_suffix('>')) {
        (true, inner)
    } else if let Some(inner) = body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        (false, inner)
    } else {
        return Err(RegistrationError::MalformedSchema {
            token: token.to_string(),
            reason: "must be wrapped in '<>' (required) or '[]' (optional)".to_string(),
        });
    };

    let mut parts = inner.splitn(3, ':');
    let key = parts.next().unwrap_or_default();
    let Some(name) = parts.next() else {
        return Err(RegistrationError::MalformedSchema {
            token: token.to_string(),
            reason: "must contain ':' separating type and name".to_string(),
        });
    };
    let description = parts
        .next()
        .map(|d| d.replace('-', " "))
        .unwrap_or_default();

    let Some((type_id, type_name)) = mappings.lookup(key) else {
        return Err(RegistrationError::UnknownTypeKey(key.to_string()));
    };

    Ok(ArgumentSpec::single_raw(
        type_id,
        type_name,
        name.to_string(),
        description,
        required,
        behaviour,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::{Argument, build_arguments};

    #[test]
    fn test_parse_mixed_schema() {
        let specs = parse(
            &TypeMappings::standard(),
            "<string:target:Who-to-kick> [int:days] @<text:reason:Why>",
        )
        .unwrap();
        assert_eq!(specs.len(), 3);

        let arguments = build_arguments(&specs).unwrap();
        let Argument::Single(target) = &arguments[0] else {
            panic!("expected single");
        };
        assert_eq!(target.name(), "target");
        assert_eq!(target.description(), "Who to kick");
        assert!(target.required());
        assert_eq!(target.position(), 0);

        let Argument::Single(days) = &arguments[1] else {
            panic!("expected single");
        };
        assert!(!days.required());

        let Argument::Single(reason) = &arguments[2] else {
            panic!("expected single");
        };
        assert_eq!(reason.behaviour(), ArgumentBehaviour::Continuous);
    }

    #[test]
    fn test_unbracketed_token_is_rejected() {
        let err = parse(&TypeMappings::standard(), "string:name").unwrap_err();
        assert!(matches!(err, RegistrationError::MalformedSchema { .. }));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = parse(&TypeMappings::standard(), "<string>").unwrap_err();
        assert!(matches!(err, RegistrationError::MalformedSchema { .. }));
    }

    #[test]
    fn test_unknown_type_key_is_rejected() {
        let err = parse(&TypeMappings::standard(), "<player:target>").unwrap_err();
        assert!(matches!(err, RegistrationError::UnknownTypeKey(key) if key == "player"));
    }

    #[test]
    fn test_custom_mapping() {
        #[derive(Debug)]
        struct ChannelRef;
        let mut mappings = TypeMappings::standard();
        mappings.insert::<ChannelRef>("channel");
        let specs = parse(&mappings, "<channel:where>").unwrap();
        assert_eq!(specs[0].type_id(), TypeId::of::<ChannelRef>());
    }
}
