//! Implements a struct that holds the state of the REST server.

use std::{path::PathBuf, sync::Arc};

use crate::{Error, category::Category, timezone::get_timezone, transaction::TransactionSource};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// Where transactions are read from.
    pub transactions: Arc<dyn TransactionSource>,

    /// The category table used to classify transactions as income or expense.
    pub categories: Arc<[Category]>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The directory static files (CSS, JavaScript) are served from.
    pub static_dir: PathBuf,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        transactions: impl TransactionSource + 'static,
        categories: Vec<Category>,
        local_timezone: &str,
        static_dir: impl Into<PathBuf>,
    ) -> Result<Self, Error> {
        get_timezone(local_timezone)?;

        Ok(Self {
            transactions: Arc::new(transactions),
            categories: categories.into(),
            local_timezone: local_timezone.to_owned(),
            static_dir: static_dir.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{AppState, Error, Transaction, category::default_categories};

    #[test]
    fn rejects_invalid_timezone() {
        let result = AppState::new(
            Vec::<Transaction>::new(),
            default_categories(),
            "Not/A_Timezone",
            "static",
        );

        assert!(matches!(
            result,
            Err(Error::InvalidTimezoneError(timezone)) if timezone == "Not/A_Timezone"
        ));
    }

    #[test]
    fn keeps_category_order() {
        let categories = default_categories();

        let state = AppState::new(
            Vec::<Transaction>::new(),
            categories.clone(),
            "Etc/UTC",
            "static",
        )
        .unwrap();

        assert_eq!(state.categories.as_ref(), categories.as_slice());
    }
}
