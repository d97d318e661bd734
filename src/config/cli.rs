use crate::domain::model::PostalRange;
use crate::utils::error::{PostCodeError, Result};
use crate::utils::validation::{validate_country_code, validate_path, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "postcode-rules")]
#[command(about = "Postal code format and range checks per country")]
pub struct CliConfig {
    /// 自訂規則表 (TOML)，未指定時使用內建規則
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Write logs as JSON lines to stderr")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the postcode pattern for a country
    Pattern { country: String },

    /// Check a postcode against the country's format
    Check { country: String, code: String },

    /// Check that a postcode lies within [START, END]
    InRange {
        country: String,
        start: String,
        end: String,
        code: String,
        #[arg(long, help = "Compare without applying the country's format fix")]
        no_fix: bool,
    },

    /// Check that no two ranges overlap
    Overlap {
        country: String,
        #[arg(long = "range", num_args = 2, value_names = ["START", "END"])]
        ranges: Vec<String>,
        #[arg(long, help = "CSV file with start,end columns")]
        file: Option<PathBuf>,
    },

    /// Look up a state or province by code or name
    Province { country: String, query: String },
}

impl Command {
    pub fn country(&self) -> &str {
        match self {
            Command::Pattern { country }
            | Command::Check { country, .. }
            | Command::InRange { country, .. }
            | Command::Overlap { country, .. }
            | Command::Province { country, .. } => country,
        }
    }
}

impl CliConfig {
    /// `--range` 以成對的值收集，轉成範圍清單
    pub fn inline_ranges(&self) -> Vec<PostalRange> {
        match &self.command {
            Command::Overlap { ranges, .. } => ranges
                .chunks_exact(2)
                .map(|pair| PostalRange::new(pair[0].as_str(), pair[1].as_str()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_country_code("country", self.command.country().trim())?;

        if let Some(rules) = &self.rules {
            validate_path("rules", &rules.to_string_lossy())?;
        }

        if let Command::Overlap { ranges, file, .. } = &self.command {
            if ranges.len() % 2 != 0 {
                return Err(PostCodeError::config(
                    "range",
                    "each --range needs a START and an END",
                ));
            }
            if let Some(file) = file {
                validate_path("file", &file.to_string_lossy())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let config = CliConfig::try_parse_from(["postcode-rules", "check", "US", "12345"]).unwrap();
        assert!(!config.json);
        assert!(config.validate().is_ok());
        match config.command {
            Command::Check { country, code } => {
                assert_eq!(country, "US");
                assert_eq!(code, "12345");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_in_range_flags() {
        let config = CliConfig::try_parse_from([
            "postcode-rules",
            "in-range",
            "GB",
            "S109EE",
            "S129EE",
            "S119EE",
            "--no-fix",
            "--json",
        ])
        .unwrap();
        assert!(config.json);
        assert!(!config.log_json);
        assert!(matches!(config.command, Command::InRange { no_fix: true, .. }));
    }

    #[test]
    fn test_parse_log_json() {
        let config =
            CliConfig::try_parse_from(["postcode-rules", "--log-json", "province", "US", "NY"])
                .unwrap();
        assert!(config.log_json);
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_overlap_ranges() {
        let config = CliConfig::try_parse_from([
            "postcode-rules",
            "overlap",
            "US",
            "--range",
            "0",
            "9999",
            "--range",
            "10000",
            "19999",
        ])
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.inline_ranges(),
            vec![
                PostalRange::new("0", "9999"),
                PostalRange::new("10000", "19999")
            ]
        );
    }

    #[test]
    fn test_invalid_country_code() {
        let config = CliConfig::try_parse_from(["postcode-rules", "pattern", "USA"]).unwrap();
        assert!(config.validate().is_err());
    }
}
