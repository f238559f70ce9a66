//! Domain layer: the records a checkout run works with and the seams
//! (`LogSink`, `Checkout`) the application layer is written against.

pub mod assignment;
pub mod cashier;
pub mod ports;
pub mod product;
pub mod receipt;
