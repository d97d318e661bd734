// Domain layer: rule/range/province models and the lookup ports the core consumes.

pub mod model;
pub mod ports;
