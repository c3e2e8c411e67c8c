// Domain layer: the student model and the storage port.

pub mod model;
pub mod ports;
