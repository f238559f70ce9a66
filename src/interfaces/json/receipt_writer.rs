use crate::domain::receipt::Receipt;
use crate::error::Result;
use std::io::Write;

/// Writes receipts as a pretty-printed JSON array.
pub struct ReceiptWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReceiptWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_receipts(&mut self, receipts: &[Receipt]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, receipts)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
