pub mod containment;
pub mod extractor;
pub mod normalizer;
pub mod overlap;
pub mod service;
pub mod validator;

pub use crate::domain::model::{FormatFix, PostCodeRule, PostalRange, Province, RangeBound};
pub use crate::domain::ports::{ProvinceLookup, RuleLookup};
pub use crate::utils::error::Result;
