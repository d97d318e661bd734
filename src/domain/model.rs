use crate::utils::error::{PostCodeError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 單一國家的郵遞區號規則
#[derive(Debug, Clone)]
pub struct PostCodeRule {
    pub country_code: String,
    pub country_name: String,
    /// 完整格式的正規表達式，`None` 表示此國家沒有可驗證的格式
    pub pattern: Option<Regex>,
    /// 從正規化後的郵遞區號擷取比較用子字串
    pub range_pattern: Regex,
    pub range_is_number: bool,
    pub min_length: usize,
    pub left_padding_char: Option<char>,
    pub no_post_code: bool,
    /// A:字母 N:數字
    pub format: String,
    pub description: String,
    pub example: Option<String>,
    pub format_fix: Option<FormatFix>,
}

impl PostCodeRule {
    pub fn new(country_code: &str, pattern: &str, range_pattern: &str) -> Result<Self> {
        let compile = |field: &str, value: &str| {
            Regex::new(value).map_err(|e| PostCodeError::config(field, e.to_string()))
        };

        let pattern = if pattern.is_empty() {
            None
        } else {
            Some(compile("pattern", pattern)?)
        };

        Ok(Self {
            country_code: country_code.to_ascii_uppercase(),
            country_name: String::new(),
            pattern,
            range_pattern: compile("range_pattern", range_pattern)?,
            range_is_number: false,
            min_length: 0,
            left_padding_char: None,
            no_post_code: false,
            format: String::new(),
            description: String::new(),
            example: None,
            format_fix: None,
        })
    }

    /// 範圍以數字比較，長度不足 `min_length` 時左補 `padding`
    pub fn numeric(mut self, min_length: usize, padding: Option<char>) -> Self {
        self.range_is_number = true;
        self.min_length = min_length;
        self.left_padding_char = padding;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_format_fix(mut self, fix: FormatFix) -> Self {
        self.format_fix = Some(fix);
        self
    }

    pub fn pattern_str(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// 用於錯誤訊息的描述
    pub fn describe(&self) -> &str {
        if !self.description.is_empty() {
            &self.description
        } else if self.no_post_code {
            "no postal code"
        } else {
            "unknown postcode format"
        }
    }
}

/// 郵遞區號修正策略，只在範圍比較前套用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatFix {
    /// 去掉空白與分隔字元後，在最後 `suffix_len` 個字元前插入 `separator`
    /// (例: 英國 "S119EE" -> "S11 9EE")
    SplitSuffix {
        suffix_len: usize,
        separator: char,
        min_len: usize,
    },
}

impl FormatFix {
    /// 回傳 `None` 表示無法修正，呼叫端保留原值
    pub fn apply(&self, code: &str) -> Option<String> {
        match self {
            FormatFix::SplitSuffix {
                suffix_len,
                separator,
                min_len,
            } => {
                if code.is_empty() || code.chars().count() < *min_len {
                    return None;
                }

                let compact: String = code
                    .chars()
                    .filter(|c| !c.is_whitespace() && c != separator)
                    .collect();
                let len = compact.chars().count();
                if len <= *suffix_len {
                    return None;
                }

                let (split_at, _) = compact.char_indices().nth(len - suffix_len)?;
                let (head, tail) = compact.split_at(split_at);
                Some(format!("{}{}{}", head, separator, tail))
            }
        }
    }
}

/// 起訖郵遞區號，建立時不檢查大小順序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalRange {
    pub start: String,
    pub end: String,
}

impl PostalRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl fmt::Display for PostalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeBound {
    Start,
    End,
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Start => write!(f, "Start"),
            RangeBound::End => write!(f, "End"),
        }
    }
}

/// 州/省資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub cn_name: String,
    #[serde(default)]
    pub local_name: Option<String>,
    /// 別名與縮寫，只作參考，不參與比對
    #[serde(default)]
    pub aliases: Vec<String>,
}
