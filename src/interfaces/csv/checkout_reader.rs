use crate::domain::payment::CheckoutContext;
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One checkout from a batch file: what the caller knows plus the number
/// the customer typed in.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CheckoutRow {
    pub amount: Option<Decimal>,
    pub phone: String,
    pub description: Option<String>,
}

impl CheckoutRow {
    pub fn context(&self) -> CheckoutContext {
        CheckoutContext {
            amount: self.amount,
            description: self.description.clone(),
            package: None,
        }
    }
}

/// Reads checkout rows from a CSV source with an `amount,phone,description`
/// header.
///
/// Wraps `csv::Reader` and yields `Result<CheckoutRow>` lazily, so one bad
/// row does not stop the rest of the batch.
pub struct CheckoutReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CheckoutReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn rows(self) -> impl Iterator<Item = Result<CheckoutRow>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
