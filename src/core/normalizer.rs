use crate::domain::model::PostCodeRule;

/// 範圍比較前整理郵遞區號：先左補字元，再套用規則的格式修正。
/// 格式修正失敗時保留原值，不視為錯誤。
pub fn normalize(rule: &PostCodeRule, code: &str, apply_format_fix: bool) -> String {
    let mut normalized = pad_left(rule, code);

    if apply_format_fix {
        if let Some(fix) = &rule.format_fix {
            match fix.apply(&normalized) {
                Some(fixed) => normalized = fixed,
                None => tracing::debug!(
                    "Format fix for {} rejected '{}', keeping it unchanged",
                    rule.country_code,
                    normalized
                ),
            }
        }
    }

    normalized
}

fn pad_left(rule: &PostCodeRule, code: &str) -> String {
    if !rule.range_is_number {
        return code.to_string();
    }

    let Some(padding) = rule.left_padding_char else {
        return code.to_string();
    };

    let len = code.chars().count();
    if len >= rule.min_length {
        return code.to_string();
    }

    let mut padded: String = std::iter::repeat(padding)
        .take(rule.min_length - len)
        .collect();
    padded.push_str(code);
    padded
}
