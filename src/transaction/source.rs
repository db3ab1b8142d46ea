//! Where the server gets transactions from.

use std::{fs, path::PathBuf};

use crate::{Error, transaction::Transaction};

/// Provides the transactions for the account overview.
pub trait TransactionSource: Send + Sync {
    /// Retrieve every transaction in the source.
    ///
    /// # Errors
    /// Implementers should return [Error::TransactionSource] if the
    /// transactions are missing or are not a list of transactions.
    fn transactions(&self) -> Result<Vec<Transaction>, Error>;
}

/// Reads transactions from a JSON file on every request.
///
/// The file must contain a JSON array of transaction objects.
#[derive(Debug, Clone)]
pub struct JsonFileTransactions {
    path: PathBuf,
}

impl JsonFileTransactions {
    /// Create a source that reads from the JSON file at `path`.
    ///
    /// The file is not opened until transactions are requested.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransactionSource for JsonFileTransactions {
    fn transactions(&self) -> Result<Vec<Transaction>, Error> {
        let text = fs::read_to_string(&self.path).map_err(|error| {
            Error::TransactionSource(format!("could not read {}: {error}", self.path.display()))
        })?;

        let transactions: Vec<Transaction> = serde_json::from_str(&text).map_err(|error| {
            Error::TransactionSource(format!("could not parse {}: {error}", self.path.display()))
        })?;

        tracing::debug!(
            "Read {} transactions from {}",
            transactions.len(),
            self.path.display()
        );

        Ok(transactions)
    }
}

impl TransactionSource for Vec<Transaction> {
    fn transactions(&self) -> Result<Vec<Transaction>, Error> {
        Ok(self.clone())
    }
}
