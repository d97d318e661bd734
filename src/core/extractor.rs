use crate::domain::model::PostCodeRule;
use crate::utils::error::{PostCodeError, Result};
use std::cmp::Ordering;

/// 以範圍正規表達式擷取可比較的子字串
pub fn extract_comparable<'a>(rule: &PostCodeRule, normalized: &'a str) -> Result<&'a str> {
    rule.range_pattern
        .find(normalized)
        .map(|m| m.as_str())
        .ok_or_else(|| PostCodeError::RangeRegexMismatch {
            code: normalized.to_string(),
            pattern: rule.range_pattern.as_str().to_string(),
        })
}

pub fn parse_number(value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|source| PostCodeError::NumericParseError {
            value: value.to_string(),
            source,
        })
}

/// 依規則比較兩個已擷取的子字串：數字規則以整數比較，其餘以不分大小寫的序數比較
pub fn compare(rule: &PostCodeRule, a: &str, b: &str) -> Result<Ordering> {
    if rule.range_is_number {
        Ok(parse_number(a)?.cmp(&parse_number(b)?))
    } else {
        Ok(compare_ignore_case(a, b))
    }
}

/// 序數比較 (逐字元轉大寫後比 code point)，不做語系排序
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars().map(fold_upper).cmp(b.chars().map(fold_upper))
}

/// 一對一轉大寫；大寫會展開成多個字元時 (例: 'ß' -> "SS") 保留原字元
pub fn fold_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    if upper.len() == 1 {
        upper.next().unwrap_or(c)
    } else {
        c
    }
}
