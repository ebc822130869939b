// Domain layer: entities and the traits (ports) the serializers plug into.

pub mod model;
pub mod ports;
