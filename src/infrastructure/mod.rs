//! Concrete log sinks.

pub mod console_sink;
pub mod memory_sink;
