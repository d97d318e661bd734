pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use crate::adapters::{province_registry::ProvinceRegistry, rule_registry::RuleRegistry};
pub use crate::core::containment::RangeBounds;
pub use crate::core::service::{PatternInfo, PostCodeService};
pub use crate::domain::model::{FormatFix, PostCodeRule, PostalRange, Province, RangeBound};
pub use crate::utils::error::{ErrorCategory, PostCodeError, Result};
