//! User-facing message providers.
//!
//! Every string the core puts in front of a caller comes through a
//! [`MessagesProvider`], so front-ends can localize or re-brand without
//! touching dispatch logic. Implementations must be pure and must never
//! return an empty string.

use std::time::Duration;

/// Source of user-facing strings for dispatch failures.
pub trait MessagesProvider: Send + Sync {
    /// A required argument had no input.
    fn missing_argument(&self, name: &str, description: &str, position: usize) -> String;

    /// A token could not be parsed as a signed integer.
    fn invalid_integer(&self, token: &str) -> String;

    /// A token could not be parsed as an unsigned integer.
    fn invalid_unsigned(&self, token: &str) -> String;

    /// A token could not be parsed as a decimal number.
    fn invalid_decimal(&self, token: &str) -> String;

    /// A token could not be parsed as a boolean.
    fn invalid_boolean(&self, token: &str) -> String;

    /// A token could not be parsed as a duration.
    fn invalid_duration(&self, token: &str) -> String;

    /// No command matched the first token of the input line.
    fn command_not_found(&self, name: &str) -> String;

    /// The sender lacks the command's permission node.
    fn not_allowed(&self) -> String;

    /// The caller is still inside the cooldown window.
    fn cooldown(&self, time_left: Duration) -> String;

    /// An internal failure happened; details were logged.
    fn unknown_error(&self) -> String;

    /// No provider is registered for a type needed by an argument.
    fn unresolved_type(&self, type_name: &str) -> String;
}

/// Default English messages, usable as-is by any front-end.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMessages;

impl MessagesProvider for DefaultMessages {
    fn missing_argument(&self, name: &str, description: &str, position: usize) -> String {
        format!("Missing the argument {name} ({description}) in position {position}")
    }

    fn invalid_integer(&self, token: &str) -> String {
        format!("{token} is not a valid integer")
    }

    fn invalid_unsigned(&self, token: &str) -> String {
        format!("{token} is not a valid positive integer")
    }

    fn invalid_decimal(&self, token: &str) -> String {
        format!("{token} is not a valid number")
    }

    fn invalid_boolean(&self, token: &str) -> String {
        format!("{token} is not a valid boolean")
    }

    fn invalid_duration(&self, token: &str) -> String {
        format!("{token} is not valid time")
    }

    fn command_not_found(&self, name: &str) -> String {
        if name.is_empty() {
            "No command was given".to_string()
        } else {
            format!("The command {name} was not found")
        }
    }

    fn not_allowed(&self) -> String {
        "You are not allowed to use this command".to_string()
    }

    fn cooldown(&self, time_left: Duration) -> String {
        format!("You are still on cooldown! {} left", format_duration(time_left))
    }

    fn unknown_error(&self) -> String {
        "An unexpected error happened while running the command".to_string()
    }

    fn unresolved_type(&self, type_name: &str) -> String {
        format!("No provider can supply a value of type {type_name}")
    }
}

/// Render a duration in the compact `2m 5s` style used by cooldown replies.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    if total == 0 {
        // Sub-second remainders still read as a positive wait
        return format!("{}ms", duration.subsec_millis().max(1));
    }
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h "));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m "));
    }
    if seconds > 0 || out.is_empty() {
        out.push_str(&format!("{seconds}s"));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m 1s");
        assert_eq!(format_duration(Duration::from_millis(300)), "300ms");
    }

    #[test]
    fn test_default_messages_never_empty() {
        let messages = DefaultMessages;
        assert!(!messages.missing_argument("name", "desc", 0).is_empty());
        assert!(!messages.invalid_integer("x").is_empty());
        assert!(!messages.command_not_found("").is_empty());
        assert!(!messages.cooldown(Duration::ZERO).is_empty());
        assert!(!messages.unknown_error().is_empty());
    }

    #[test]
    fn test_missing_argument_embeds_name_and_position() {
        let message = DefaultMessages.missing_argument("target", "who to kick", 2);
        assert!(message.contains("target"));
        assert!(message.contains('2'));
    }
}
