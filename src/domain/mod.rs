// Domain layer: models, DSN and ports (interfaces).

pub mod dsn;
pub mod model;
pub mod ports;
