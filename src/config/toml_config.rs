use crate::domain::model::{FormatFix, PostCodeRule, Province};
use crate::utils::error::{PostCodeError, Result};
use crate::utils::validation::{
    validate_country_code, validate_max_chars, validate_non_empty_string, validate_pattern,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// 郵遞區號規則表 (`[[rules]]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTable {
    pub rules: Vec<RuleDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub range_pattern: String,
    #[serde(default)]
    pub range_is_number: bool,
    #[serde(default)]
    pub min_length: usize,
    #[serde(default)]
    pub left_padding_char: String,
    #[serde(default)]
    pub no_post_code: bool,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub description: String,
    pub example: Option<String>,
    pub format_fix: Option<FormatFix>,
}

impl RuleTable {
    /// 從 TOML 檔案載入規則表
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析規則表
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(toml_error)
    }

    /// 編譯成可直接使用的規則
    pub fn compile(&self) -> Result<Vec<PostCodeRule>> {
        self.rules.iter().map(RuleDefinition::compile).collect()
    }
}

impl RuleDefinition {
    pub fn compile(&self) -> Result<PostCodeRule> {
        let mut rule = PostCodeRule::new(&self.country_code, &self.pattern, &self.range_pattern)
            .map_err(|e| match e {
                PostCodeError::ConfigError { field, message } => PostCodeError::ConfigError {
                    field: format!("rules.{}.{}", self.country_code, field),
                    message,
                },
                other => other,
            })?;

        rule.country_name = self.country_name.clone();
        rule.range_is_number = self.range_is_number;
        rule.min_length = self.min_length;
        rule.left_padding_char = single_char(&self.left_padding_char);
        rule.no_post_code = self.no_post_code;
        rule.format = self.format.clone();
        rule.description = self.description.clone();
        rule.example = self.example.clone();
        rule.format_fix = self.format_fix.clone();
        Ok(rule)
    }

    fn field(&self, name: &str) -> String {
        format!("rules.{}.{}", self.country_code, name)
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl Validate for RuleTable {
    fn validate(&self) -> Result<()> {
        validate_non_empty_collection("rules", self.rules.len())?;

        let mut seen = HashSet::new();
        for definition in &self.rules {
            validate_country_code("rules.country_code", &definition.country_code)?;
            if !seen.insert(definition.country_code.to_ascii_uppercase()) {
                return Err(PostCodeError::config(
                    "rules.country_code",
                    format!("duplicate country code {}", definition.country_code),
                ));
            }
            definition.validate()?;
        }

        Ok(())
    }
}

impl Validate for RuleDefinition {
    fn validate(&self) -> Result<()> {
        validate_max_chars(&self.field("left_padding_char"), &self.left_padding_char, 1)?;

        if self.range_is_number {
            validate_non_empty_string(&self.field("range_pattern"), &self.range_pattern)?;
        }

        let range_pattern = validate_pattern(&self.field("range_pattern"), &self.range_pattern)?;
        if self.pattern.is_empty() {
            return Ok(());
        }

        let pattern = validate_pattern(&self.field("pattern"), &self.pattern)?;
        if let Some(example) = &self.example {
            if !pattern.is_match(example) {
                return Err(PostCodeError::config(
                    &self.field("example"),
                    format!("example '{}' does not match pattern '{}'", example, self.pattern),
                ));
            }
            if range_pattern.find(example).is_none() && self.format_fix.is_none() {
                return Err(PostCodeError::config(
                    &self.field("example"),
                    format!(
                        "example '{}' does not match range pattern '{}'",
                        example, self.range_pattern
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn toml_error(e: toml::de::Error) -> PostCodeError {
    PostCodeError::config("toml_parsing", format!("TOML parsing error: {}", e))
}

fn validate_non_empty_collection(field_name: &str, len: usize) -> Result<()> {
    if len == 0 {
        return Err(PostCodeError::config(field_name, "at least one entry is required"));
    }
    Ok(())
}

/// 州/省資料表：國家代碼 -> 州/省清單
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvinceTable {
    pub countries: HashMap<String, Vec<Province>>,
}

impl ProvinceTable {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(toml_error)
    }
}

impl Validate for ProvinceTable {
    fn validate(&self) -> Result<()> {
        for (country_code, provinces) in &self.countries {
            validate_country_code("provinces", country_code)?;
            let field = |name: &str| format!("provinces.{}.{}", country_code, name);
            for province in provinces {
                validate_non_empty_string(&field("code"), &province.code)?;
                validate_non_empty_string(&field("name"), &province.name)?;
            }
        }
        Ok(())
    }
}
