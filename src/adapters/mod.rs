// Adapters layer: registries backed by the static rule and province tables.

pub mod province_registry;
pub mod range_file;
pub mod rule_registry;
