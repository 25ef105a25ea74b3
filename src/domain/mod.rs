// Domain layer: warranty records, aggregation types and the ports implemented by adapters.

pub mod model;
pub mod ports;
