// Domain layer: core models and ports (interfaces). No external dependencies beyond std/serde_json.

pub mod model;
pub mod ports;
