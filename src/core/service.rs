use crate::adapters::rule_registry::RuleRegistry;
use crate::core::{containment, overlap, validator};
use crate::domain::model::{PostCodeRule, PostalRange};
use crate::domain::ports::RuleLookup;
use crate::utils::error::{PostCodeError, Result};
use serde::Serialize;

/// 國家的郵遞區號正規表達式與說明
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternInfo<'a> {
    pub country_code: &'a str,
    pub pattern: &'a str,
    pub description: &'a str,
}

/// 以國家代碼為入口的郵遞區號服務：先查規則，再交給核心演算法。
pub struct PostCodeService<L: RuleLookup> {
    rules: L,
}

impl PostCodeService<&'static RuleRegistry> {
    /// 使用內建規則表
    pub fn builtin() -> Self {
        Self::new(RuleRegistry::builtin())
    }
}

impl<L: RuleLookup> PostCodeService<L> {
    pub fn new(rules: L) -> Self {
        Self { rules }
    }

    /// 取得國家規則，國家代碼會先去空白並轉大寫
    pub fn rule(&self, country_code: &str) -> Result<&PostCodeRule> {
        let country_code = country_code.trim();
        if country_code.is_empty() {
            return Err(PostCodeError::invalid_input("country code cannot be empty"));
        }

        let country_code = country_code.to_ascii_uppercase();
        self.rules
            .lookup(&country_code)
            .ok_or(PostCodeError::RuleNotFound { country_code })
    }

    pub fn pattern(&self, country_code: &str) -> Result<PatternInfo<'_>> {
        let rule = self.rule(country_code)?;
        let pattern = rule.pattern_str().ok_or_else(|| {
            PostCodeError::invalid_input(format!(
                "country {} has no postcode pattern ({})",
                rule.country_code,
                rule.describe()
            ))
        })?;

        Ok(PatternInfo {
            country_code: &rule.country_code,
            pattern,
            description: rule.describe(),
        })
    }

    pub fn check_format(&self, country_code: &str, code: &str) -> Result<&str> {
        let rule = self.rule(country_code)?;
        validator::validate_format(rule, code)
    }

    pub fn check_in_range(
        &self,
        country_code: &str,
        start: &str,
        end: &str,
        code: &str,
        apply_format_fix: bool,
    ) -> Result<()> {
        let rule = self.rule(country_code)?;
        containment::check_in_range(rule, start, end, code, apply_format_fix)
    }

    pub fn check_no_overlap(&self, country_code: &str, ranges: &[PostalRange]) -> Result<()> {
        let rule = self.rule(country_code)?;
        overlap::check_no_overlap(rule, ranges)
    }
}
