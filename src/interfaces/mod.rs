//! Ways customers get into a run and receipts get out of it.

pub mod console;
pub mod csv;
pub mod json;
