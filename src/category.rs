//! The category reference table used to classify transactions as income or expense.
//!
//! A transaction refers to a category either by its ID or by its name. The
//! table is always passed around explicitly, the application never keeps a
//! global copy.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Whether money in a category is coming in or going out.
///
/// Only the exact string `"INCOME"` is income. Every other value is treated
/// as an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum CategoryType {
    /// Money coming into the account.
    Income,
    /// Money going out of the account.
    Expense,
}

impl From<&str> for CategoryType {
    fn from(value: &str) -> Self {
        match value {
            "INCOME" => Self::Income,
            _ => Self::Expense,
        }
    }
}

impl From<String> for CategoryType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// A category for expenses and income, e.g., 'Groceries', 'Salary'.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// The unique identifier of the category, e.g. "groceries".
    pub id: String,

    /// The display name, matched case-insensitively against transactions.
    pub name: String,

    /// Whether transactions in this category are income or expenses.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl Category {
    /// Create an income category.
    pub fn income(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            category_type: CategoryType::Income,
        }
    }

    /// Create an expense category.
    pub fn expense(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            category_type: CategoryType::Expense,
        }
    }
}

/// The categories available when no category file has been configured.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::income("salary", "Salary"),
        Category::income("freelance", "Freelance"),
        Category::income("investments", "Investments"),
        Category::income("business", "Business"),
        Category::income("rental", "Rental"),
        Category::income("other-income", "Other Income"),
        Category::expense("housing", "Housing"),
        Category::expense("transportation", "Transportation"),
        Category::expense("groceries", "Groceries"),
        Category::expense("utilities", "Utilities"),
        Category::expense("entertainment", "Entertainment"),
        Category::expense("food", "Food"),
        Category::expense("shopping", "Shopping"),
        Category::expense("healthcare", "Healthcare"),
        Category::expense("education", "Education"),
        Category::expense("personal", "Personal Care"),
        Category::expense("travel", "Travel"),
        Category::expense("insurance", "Insurance"),
        Category::expense("gifts", "Gifts & Donations"),
        Category::expense("bills", "Bills & Fees"),
        Category::expense("other-expense", "Other Expenses"),
    ]
}

/// Find the category a transaction refers to.
///
/// An exact ID match takes precedence over a case-insensitive name match.
pub fn resolve_category<'a>(categories: &'a [Category], label: &str) -> Option<&'a Category> {
    categories
        .iter()
        .find(|category| category.id == label)
        .or_else(|| {
            let label = label.to_lowercase();
            categories
                .iter()
                .find(|category| category.name.to_lowercase() == label)
        })
}

/// Load a category table from a JSON file containing an array of categories.
///
/// # Errors
/// Returns [Error::CategorySource] if the file cannot be read or is not a
/// JSON array of categories.
pub fn load_categories(path: &Path) -> Result<Vec<Category>, Error> {
    let text = fs::read_to_string(path).map_err(|error| {
        Error::CategorySource(format!("could not read {}: {error}", path.display()))
    })?;

    serde_json::from_str(&text).map_err(|error| {
        Error::CategorySource(format!("could not parse {}: {error}", path.display()))
    })
}
