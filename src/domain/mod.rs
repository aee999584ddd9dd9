// Domain layer: core models and ports (interfaces). No I/O here; the engine
// and the adapters meet through these seams.

pub mod model;
pub mod ports;
