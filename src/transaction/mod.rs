//! Transactions as supplied by the external data layer.
//!
//! This module contains:
//! - The `Transaction` model and its lenient deserialization
//! - The `TransactionSource` trait the server reads transactions through

mod core;
mod source;

pub use core::Transaction;
pub use source::{JsonFileTransactions, TransactionSource};
