mod pharmacy_handler;

pub use pharmacy_handler::*;
