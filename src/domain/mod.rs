// Domain layer: FIO/KAWA data shapes and the ports the loaders depend on.

pub mod model;
pub mod ports;
