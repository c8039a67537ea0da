use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 snowflake from a stored String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses an optional snowflake, treating empty strings, zero and `None` as absent.
///
/// Queue payloads written by older dashboards serialize missing ids as the literal
/// text `None`.
pub fn parse_optional_id(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return None;
    }
    trimmed.parse::<u64>().ok().filter(|id| *id != 0)
}

/// Parses a `#rrggbb`, `0xrrggbb` or bare hex color string.
pub fn parse_hex_color(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.is_empty() || hex.len() > 6 {
        return None;
    }

    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_id_treats_none_literal_as_absent() {
        assert_eq!(parse_optional_id("None"), None);
        assert_eq!(parse_optional_id("  "), None);
        assert_eq!(parse_optional_id("123"), Some(123));
        assert_eq!(parse_optional_id("abc"), None);
        assert_eq!(parse_optional_id("0"), None);
    }

    #[test]
    fn hex_color_accepts_common_prefixes() {
        assert_eq!(parse_hex_color("#ff0000"), Some(0xFF0000));
        assert_eq!(parse_hex_color("0x99AAB5"), Some(0x99AAB5));
        assert_eq!(parse_hex_color("43b581"), Some(0x43B581));
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#1234567"), None);
    }

    #[test]
    fn string_id_parse_failure_is_internal_error() {
        let result = parse_u64_from_string("not-a-number".to_string());
        assert!(matches!(result, Err(AppError::InternalErr(_))));
    }
}
