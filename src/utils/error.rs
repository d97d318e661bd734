use crate::domain::model::{PostalRange, RangeBound};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostCodeError {
    #[error("No postcode rule found for country: {country_code}")]
    RuleNotFound { country_code: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Postcode '{code}' does not match the expected format: {description}")]
    FormatMismatch { code: String, description: String },

    #[error("Postcode '{code}' does not match range pattern '{pattern}'")]
    RangeRegexMismatch { code: String, pattern: String },

    #[error("Cannot parse '{value}' as a number: {source}")]
    NumericParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{bound} postcode '{code}' is not a valid range bound: {description}")]
    RangeBoundsInvalid {
        bound: RangeBound,
        code: String,
        description: String,
    },

    #[error("Start postcode '{start}' is greater than end postcode '{end}'")]
    StartAfterEnd { start: String, end: String },

    #[error("Postcode '{code}' is below the range start '{start}'")]
    BelowRange { code: String, start: String },

    #[error("Postcode '{code}' is above the range end '{end}'")]
    AboveRange { code: String, end: String },

    #[error("Postcode '{code}' is outside the range [{start}-{end}]")]
    OutOfRange {
        code: String,
        start: String,
        end: String,
    },

    #[error("Postcode range {range} is invalid: {source}")]
    InvalidRange {
        range: PostalRange,
        #[source]
        source: Box<PostCodeError>,
    },

    #[error("Postcode ranges {first} and {second} overlap")]
    OverlapDetected {
        first: PostalRange,
        second: PostalRange,
    },

    #[error("No province data for country: {country_code}")]
    NoProvinceData { country_code: String },

    #[error("Province '{query}' not found for country: {country_code}")]
    ProvinceNotFound { country_code: String, query: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 找不到規則或省州資料
    Lookup,
    /// 輸入本身不合法 (格式不符、空值)
    Input,
    /// 範圍界限或範圍包含判斷失敗
    Range,
    Overlap,
    Config,
    Io,
}

impl PostCodeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PostCodeError::RuleNotFound { .. }
            | PostCodeError::NoProvinceData { .. }
            | PostCodeError::ProvinceNotFound { .. } => ErrorCategory::Lookup,
            PostCodeError::InvalidInput { .. }
            | PostCodeError::FormatMismatch { .. }
            | PostCodeError::RangeRegexMismatch { .. }
            | PostCodeError::NumericParseError { .. } => ErrorCategory::Input,
            PostCodeError::RangeBoundsInvalid { .. }
            | PostCodeError::StartAfterEnd { .. }
            | PostCodeError::BelowRange { .. }
            | PostCodeError::AboveRange { .. }
            | PostCodeError::OutOfRange { .. }
            | PostCodeError::InvalidRange { .. } => ErrorCategory::Range,
            PostCodeError::OverlapDetected { .. } => ErrorCategory::Overlap,
            PostCodeError::ConfigError { .. } => ErrorCategory::Config,
            PostCodeError::IoError(_) | PostCodeError::CsvError(_) => ErrorCategory::Io,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PostCodeError::RuleNotFound { country_code } => {
                format!("Country '{}' has no postcode rule", country_code)
            }
            PostCodeError::FormatMismatch { description, .. } => {
                format!("Invalid postcode, expected {}", description)
            }
            PostCodeError::InvalidRange { range, source } => {
                format!("Range {} is invalid: {}", range, source.user_friendly_message())
            }
            PostCodeError::ConfigError { field, .. } => {
                format!("Configuration problem in '{}': {}", field, self)
            }
            PostCodeError::IoError(_) | PostCodeError::CsvError(_) => {
                format!("Could not read input: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub(crate) fn config(field: &str, message: impl Into<String>) -> Self {
        PostCodeError::ConfigError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        PostCodeError::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PostCodeError>;
