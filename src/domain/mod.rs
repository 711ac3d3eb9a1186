// Domain layer: card, decklist and report models plus the ports the engine depends on.

pub mod model;
pub mod ports;
