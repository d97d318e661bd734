use crate::utils::error::{PostCodeError, Result};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: &str) -> PostCodeError {
    PostCodeError::config(field_name, format!("'{}': {}", value, reason))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// 國家代碼必須是兩個 ASCII 字母 (ISO 3166-1 alpha-2)
pub fn validate_country_code(field_name: &str, value: &str) -> Result<()> {
    if value.len() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid(
            field_name,
            value,
            "Country code must be two ASCII letters",
        ));
    }
    Ok(())
}

pub fn validate_max_chars(field_name: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(invalid(
            field_name,
            value,
            &format!("Value must be at most {} character(s)", max),
        ));
    }
    Ok(())
}

/// 編譯正規表達式，失敗時回報欄位名稱
pub fn validate_pattern(field_name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| invalid(field_name, pattern, &format!("Invalid regular expression: {}", e)))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_country_code() {
        assert!(validate_country_code("country_code", "US").is_ok());
        assert!(validate_country_code("country_code", "gb").is_ok());
        assert!(validate_country_code("country_code", "USA").is_err());
        assert!(validate_country_code("country_code", "U1").is_err());
        assert!(validate_country_code("country_code", "").is_err());
    }

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern("pattern", "^[0-9]{5}$").is_ok());
        assert!(validate_pattern("pattern", "").is_ok());

        let err = validate_pattern("pattern", "^[0-9{5}$").unwrap_err();
        assert!(matches!(err, PostCodeError::ConfigError { ref field, .. } if field == "pattern"));
    }

    #[test]
    fn test_validate_max_chars() {
        assert!(validate_max_chars("left_padding_char", "", 1).is_ok());
        assert!(validate_max_chars("left_padding_char", "0", 1).is_ok());
        assert!(validate_max_chars("left_padding_char", "00", 1).is_err());
    }

    #[test]
    fn test_validate_path_and_strings() {
        assert!(validate_path("rules", "./rules.toml").is_ok());
        assert!(validate_path("rules", "").is_err());
        assert!(validate_path("rules", "a\0b").is_err());
        assert!(validate_non_empty_string("name", "  ").is_err());
    }
}
