use crate::domain::payment::PaymentRequest;
use crate::domain::ports::PaymentGateway;
use crate::error::Result;
use std::io::Write;
use std::sync::Mutex;

/// A payment gateway that writes each request as one line of JSON.
///
/// Used by the CLI in place of a live M-Pesa endpoint; the output is the
/// exact body a collection call would carry.
pub struct JsonLinesGateway<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesGateway<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn write_request(&self, request: &PaymentRequest) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        serde_json::to_writer(&mut *writer, request)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> PaymentGateway for JsonLinesGateway<W> {
    fn make_c2b_payment(&self, request: PaymentRequest) {
        if let Err(e) = self.write_request(&request) {
            tracing::error!(
                conversation_id = %request.third_party_conversation_id,
                error = %e,
                "failed to write payment request"
            );
        }
    }
}
