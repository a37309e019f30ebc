//! Parsing of boolean-like option strings.

use crate::core::error::ConfigError;

/// Parse a boolean-like string.
///
/// Accepts `yes/true/t/y/1/on` and `no/false/f/n/0/off`, ignoring case and
/// surrounding whitespace.
pub fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "true" | "t" | "y" | "1" | "on" => Ok(true),
        "no" | "false" | "f" | "n" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            value: value.to_string(),
        }),
    }
}
