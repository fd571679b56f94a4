//! Standard providers for primitive-ish types.

use super::{ArgumentProvider, ExtraProvider, ProvidersRegistry};
use crate::context::CommandContext;
use crate::error::ProviderError;
use std::time::Duration;

/// Register the standard providers on a registry.
pub(crate) fn register_defaults(registry: &ProvidersRegistry) {
    registry.add_provider::<String, _>(StringProvider);
    registry.add_provider::<i64, _>(IntegerProvider);
    registry.add_provider::<u64, _>(UnsignedProvider);
    registry.add_provider::<f64, _>(DecimalProvider);
    registry.add_provider::<bool, _>(BoolProvider);
    registry.add_provider::<Duration, _>(DurationProvider);
}

/// Passes the token through unchanged.
pub struct StringProvider;

impl ArgumentProvider<String> for StringProvider {
    fn from_string(&self, token: &str, _ctx: &CommandContext) -> Result<String, ProviderError> {
        Ok(token.to_string())
    }
}

/// Parses signed integers.
pub struct IntegerProvider;

impl ArgumentProvider<i64> for IntegerProvider {
    fn from_string(&self, token: &str, ctx: &CommandContext) -> Result<i64, ProviderError> {
        token
            .parse()
            .map_err(|_| ProviderError::new(ctx.messages().invalid_integer(token)))
    }
}

/// Parses unsigned integers.
pub struct UnsignedProvider;

impl ArgumentProvider<u64> for UnsignedProvider {
    fn from_string(&self, token: &str, ctx: &CommandContext) -> Result<u64, ProviderError> {
        token
            .parse()
            .map_err(|_| ProviderError::new(ctx.messages().invalid_unsigned(token)))
    }
}

/// Parses decimal numbers.
pub struct DecimalProvider;

impl ArgumentProvider<f64> for DecimalProvider {
    fn from_string(&self, token: &str, ctx: &CommandContext) -> Result<f64, ProviderError> {
        token
            .parse()
            .map_err(|_| ProviderError::new(ctx.messages().invalid_decimal(token)))
    }
}

/// Parses booleans: `true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`.
pub struct BoolProvider;

impl ArgumentProvider<bool> for BoolProvider {
    fn from_string(&self, token: &str, ctx: &CommandContext) -> Result<bool, ProviderError> {
        match token.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ProviderError::new(ctx.messages().invalid_boolean(token))),
        }
    }

    fn suggest(&self, _partial: &str, _ctx: &CommandContext) -> Vec<String> {
        vec!["true".to_string(), "false".to_string()]
    }
}

/// Parses durations with the `90`/`10s`/`5m`/`2h`/`1d` grammar.
pub struct DurationProvider;

impl ArgumentProvider<Duration> for DurationProvider {
    fn from_string(&self, token: &str, ctx: &CommandContext) -> Result<Duration, ProviderError> {
        parse_duration(token)
            .ok_or_else(|| ProviderError::new(ctx.messages().invalid_duration(token)))
    }
}

/// Parse a duration token: an integer amount with an optional unit suffix
/// (`ms`, `s`, `m`, `h`, `d`). A bare number is seconds.
pub fn parse_duration(token: &str) -> Option<Duration> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let split = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, unit) = token.split_at(split);
    let amount: u64 = digits.parse().ok()?;
    match unit {
        "" | "s" => Some(Duration::from_secs(amount)),
        "ms" => Some(Duration::from_millis(amount)),
        "m" => Some(Duration::from_secs(amount * 60)),
        "h" => Some(Duration::from_secs(amount * 3600)),
        "d" => Some(Duration::from_secs(amount * 86400)),
        _ => None,
    }
}

/// Supplies the sender's identity string as an extra argument.
pub struct SenderNameProvider;

impl ExtraProvider<String> for SenderNameProvider {
    fn from_context(&self, ctx: &CommandContext) -> Result<String, ProviderError> {
        Ok(ctx.sender().name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("90"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration("10s"), Some(Duration::from_secs(10)));
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Some(Duration::from_secs(86400)));
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("later"), None);
        assert_eq!(parse_duration("10w"), None);
        assert_eq!(parse_duration("-5s"), None);
    }

    #[test]
    fn test_integer_provider() {
        let ctx = CommandContext::for_tests("");
        assert_eq!(IntegerProvider.from_string("-42", &ctx).unwrap(), -42);
        let err = IntegerProvider.from_string("forty", &ctx).unwrap_err();
        assert!(err.message.contains("forty"));
    }

    #[test]
    fn test_bool_provider_accepts_aliases() {
        let ctx = CommandContext::for_tests("");
        for token in ["true", "YES", "on", "1"] {
            assert!(BoolProvider.from_string(token, &ctx).unwrap());
        }
        for token in ["false", "no", "OFF", "0"] {
            assert!(!BoolProvider.from_string(token, &ctx).unwrap());
        }
        assert!(BoolProvider.from_string("maybe", &ctx).is_err());
    }
}
