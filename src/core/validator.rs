use crate::domain::model::PostCodeRule;
use crate::utils::error::{PostCodeError, Result};

/// 檢查郵遞區號是否符合規則的完整格式，成功時回傳規則描述。
/// 格式修正不會在這裡套用。
pub fn validate_format<'r>(rule: &'r PostCodeRule, code: &str) -> Result<&'r str> {
    let Some(pattern) = &rule.pattern else {
        return Err(PostCodeError::invalid_input(format!(
            "country {} has no postcode pattern ({})",
            rule.country_code,
            rule.describe()
        )));
    };

    if !pattern.is_match(code) {
        return Err(PostCodeError::FormatMismatch {
            code: code.to_string(),
            description: rule.describe().to_string(),
        });
    }

    Ok(rule.describe())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_digits() -> PostCodeRule {
        PostCodeRule::new("MX", "^[0-9]{5}$", "^[0-9]{5}$")
            .unwrap()
            .numeric(5, Some('0'))
            .with_description("5 digits, e.g. 12345")
    }

    #[test]
    fn test_validate_format() {
        let rule = five_digits();
        assert_eq!(validate_format(&rule, "12345").unwrap(), "5 digits, e.g. 12345");

        for code in ["1234", "123456", "1234a", ""] {
            let err = validate_format(&rule, code).unwrap_err();
            assert!(
                matches!(err, PostCodeError::FormatMismatch { .. }),
                "{} should not match",
                code
            );
        }
    }

    #[test]
    fn test_empty_pattern_is_invalid_input() {
        let mut rule = PostCodeRule::new("BZ", "", "").unwrap();
        rule.no_post_code = true;

        let err = validate_format(&rule, "12345").unwrap_err();
        match err {
            PostCodeError::InvalidInput { message } => assert!(message.contains("no postal code")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_does_not_pad() {
        let rule = five_digits();
        assert!(validate_format(&rule, "1000").is_err());
    }
}
