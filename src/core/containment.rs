use crate::core::extractor::{compare_ignore_case, extract_comparable, parse_number};
use crate::core::normalizer::normalize;
use crate::domain::model::{PostCodeRule, PostalRange, RangeBound};
use crate::utils::error::{PostCodeError, Result};
use std::cmp::Ordering;

/// 經檢查後的範圍界限 (已正規化並擷取)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeBounds {
    Numeric { start: i64, end: i64 },
    Text { start: String, end: String },
}

impl RangeBounds {
    /// 數字是否落在 [start, end] 內；文字範圍永遠回傳 false
    pub fn contains_number(&self, value: i64) -> bool {
        match self {
            RangeBounds::Numeric { start, end } => *start <= value && value <= *end,
            RangeBounds::Text { .. } => false,
        }
    }
}

/// 檢查範圍本身是否合法：兩端都要能被範圍正規表達式擷取，
/// 數字規則還要求 start <= end (不會自動對調)。
pub fn validate_range(
    rule: &PostCodeRule,
    range: &PostalRange,
    apply_format_fix: bool,
) -> Result<RangeBounds> {
    let start = normalize(rule, &range.start, apply_format_fix);
    let end = normalize(rule, &range.end, apply_format_fix);

    let start = extract_bound(rule, RangeBound::Start, &range.start, &start)?;
    let end = extract_bound(rule, RangeBound::End, &range.end, &end)?;

    if !rule.range_is_number {
        return Ok(RangeBounds::Text {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let start_number = parse_number(start)?;
    let end_number = parse_number(end)?;
    if start_number > end_number {
        return Err(PostCodeError::StartAfterEnd {
            start: range.start.clone(),
            end: range.end.clone(),
        });
    }

    Ok(RangeBounds::Numeric {
        start: start_number,
        end: end_number,
    })
}

fn extract_bound<'a>(
    rule: &PostCodeRule,
    bound: RangeBound,
    raw: &str,
    normalized: &'a str,
) -> Result<&'a str> {
    extract_comparable(rule, normalized).map_err(|_| PostCodeError::RangeBoundsInvalid {
        bound,
        code: raw.to_string(),
        description: rule.describe().to_string(),
    })
}

/// 判斷郵遞區號是否在 [start, end] 內
pub fn check_in_range(
    rule: &PostCodeRule,
    start: &str,
    end: &str,
    code: &str,
    apply_format_fix: bool,
) -> Result<()> {
    let bounds = validate_range(rule, &PostalRange::new(start, end), apply_format_fix)?;

    let normalized = normalize(rule, code, apply_format_fix);
    let comparable =
        extract_comparable(rule, &normalized).map_err(|_| PostCodeError::FormatMismatch {
            code: code.to_string(),
            description: rule.describe().to_string(),
        })?;

    match bounds {
        RangeBounds::Numeric {
            start: start_number,
            end: end_number,
        } => {
            let value = parse_number(comparable)?;
            if value < start_number {
                tracing::debug!("{} is below {}", code, start);
                return Err(PostCodeError::BelowRange {
                    code: code.to_string(),
                    start: start.to_string(),
                });
            }
            if value > end_number {
                tracing::debug!("{} is above {}", code, end);
                return Err(PostCodeError::AboveRange {
                    code: code.to_string(),
                    end: end.to_string(),
                });
            }
            Ok(())
        }
        // 文字範圍：以正規化後 (未擷取) 的郵遞區號對原始界限做序數比較
        RangeBounds::Text { .. } => {
            if compare_ignore_case(&normalized, start) == Ordering::Less
                || compare_ignore_case(end, &normalized) == Ordering::Less
            {
                tracing::debug!("{} is outside [{}-{}]", code, start, end);
                return Err(PostCodeError::OutOfRange {
                    code: code.to_string(),
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FormatFix;

    fn us_rule() -> PostCodeRule {
        PostCodeRule::new("US", "(^[0-9]{5}$)|(^[0-9]{5}-[0-9]{4}$)", "^[0-9]{5}")
            .unwrap()
            .numeric(5, Some('0'))
    }

    fn gb_rule() -> PostCodeRule {
        PostCodeRule::new(
            "GB",
            "^[a-zA-Z0-9]{2,4} [a-zA-Z0-9]{3}$",
            "^[a-zA-Z0-9]{2,4} [a-zA-Z0-9]{3}$",
        )
        .unwrap()
        .with_format_fix(FormatFix::SplitSuffix {
            suffix_len: 3,
            separator: ' ',
            min_len: 5,
        })
    }

    #[test]
    fn test_numeric_range() {
        let rule = us_rule();
        assert!(check_in_range(&rule, "1000", "2000", "1500", true).is_ok());
        assert!(check_in_range(&rule, "1000", "2000", "1000", true).is_ok());
        assert!(check_in_range(&rule, "1000", "2000", "2000", true).is_ok());
        assert!(matches!(
            check_in_range(&rule, "1000", "2000", "999", true),
            Err(PostCodeError::BelowRange { .. })
        ));
        assert!(matches!(
            check_in_range(&rule, "1000", "2000", "2001", true),
            Err(PostCodeError::AboveRange { .. })
        ));
    }

    #[test]
    fn test_numeric_range_uses_leading_digits() {
        let rule = us_rule();
        assert!(check_in_range(&rule, "10000", "19999", "12345-6789", true).is_ok());
    }

    #[test]
    fn test_start_after_end() {
        let rule = us_rule();
        for code in ["12345", "60000", "garbage"] {
            assert!(matches!(
                check_in_range(&rule, "50000", "10000", code, true),
                Err(PostCodeError::StartAfterEnd { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_bounds() {
        let rule = us_rule();
        match check_in_range(&rule, "ABCDE", "20000", "15000", true) {
            Err(PostCodeError::RangeBoundsInvalid { bound, code, .. }) => {
                assert_eq!(bound, RangeBound::Start);
                assert_eq!(code, "ABCDE");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            check_in_range(&rule, "10000", "2000X", "15000", true),
            Err(PostCodeError::RangeBoundsInvalid {
                bound: RangeBound::End,
                ..
            })
        ));
    }

    #[test]
    fn test_code_not_matching_range_pattern() {
        let rule = us_rule();
        assert!(matches!(
            check_in_range(&rule, "10000", "20000", "ABCDE", true),
            Err(PostCodeError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_text_range_with_format_fix() {
        let rule = gb_rule();
        assert!(check_in_range(&rule, "S109EE", "S129EE", "S119EE", true).is_ok());
        assert!(matches!(
            check_in_range(&rule, "S109EE", "S129EE", "S139EE", true),
            Err(PostCodeError::OutOfRange { .. })
        ));
        assert!(matches!(
            check_in_range(&rule, "S109EE", "S129EE", "S099EE", true),
            Err(PostCodeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_text_range_without_format_fix() {
        let rule = gb_rule();
        assert!(matches!(
            check_in_range(&rule, "S109EE", "S129EE", "S11 9EE", false),
            Err(PostCodeError::RangeBoundsInvalid { .. })
        ));
        assert!(check_in_range(&rule, "S10 9EE", "S12 9EE", "s11 9ee", false).is_ok());
    }

    #[test]
    fn test_text_range_folds_case_per_char() {
        let rule = PostCodeRule::new("XX", "", "^.+$").unwrap();
        assert!(check_in_range(&rule, "SS", "SZ", "sT", true).is_ok());
        assert!(matches!(
            check_in_range(&rule, "SS", "SZ", "ß", true),
            Err(PostCodeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_text_range_does_not_check_order() {
        let rule = gb_rule();
        let bounds = validate_range(&rule, &PostalRange::new("S129EE", "S109EE"), true).unwrap();
        assert_eq!(
            bounds,
            RangeBounds::Text {
                start: "S12 9EE".to_string(),
                end: "S10 9EE".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_range_returns_padded_bounds() {
        let rule = us_rule();
        let bounds = validate_range(&rule, &PostalRange::new("0", "9999"), true).unwrap();
        assert_eq!(bounds, RangeBounds::Numeric { start: 0, end: 9999 });
        assert!(bounds.contains_number(0));
        assert!(bounds.contains_number(9999));
        assert!(!bounds.contains_number(10000));
    }
}
