//! Daily income and expense aggregation for the transaction overview chart.
//!
//! [aggregate] filters transactions into a date range, buckets them by
//! calendar day and sums each day's income and expenses. It is a pure
//! function of its inputs; callers decide when to recompute.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};
use time_tz::{OffsetDateTimeExt, Tz};

use crate::{
    category::{Category, CategoryType, resolve_category},
    range::DateRangeKey,
    transaction::Transaction,
};

/// The income and expense totals for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBucket {
    /// The calendar day, used for ordering.
    #[serde(skip)]
    pub day: Date,
    /// The label shown on the chart, e.g. "Jan 05".
    #[serde(rename = "date")]
    pub label: String,
    /// The sum of the day's income.
    pub income: f64,
    /// The sum of the day's expenses, as a positive number.
    pub expense: f64,
}

/// Income and expense summed over a whole series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// The total income.
    pub income: f64,
    /// The total expenses, as a positive number.
    pub expense: f64,
}

impl Totals {
    /// Income minus expenses.
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// The result of [aggregate]: buckets sorted by day and their totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// One bucket per day with transactions, in ascending order.
    pub series: Vec<DailyBucket>,
    /// The sums of the series.
    pub totals: Totals,
}

/// Aggregates `transactions` into daily income and expense buckets.
///
/// # Arguments
/// * `transactions` - The transactions to aggregate, or `None` if they could not be retrieved
/// * `range` - The date range to include, relative to `now`
/// * `categories` - The category table used to classify transactions
/// * `now` - The reference instant
/// * `timezone` - The local timezone. Each transaction's calendar day uses the
///   UTC offset in effect at that transaction's instant, so daylight saving
///   changes within the range do not move transactions to a neighbouring day.
///
/// # Returns
/// An empty series and zero totals if `transactions` is `None` or no
/// transactions fall within the range. Otherwise one bucket per calendar
/// day with at least one transaction, sorted by day.
///
/// Amounts are added by absolute value. A transaction is counted as income
/// only when its category resolves to [CategoryType::Income], all other
/// transactions (including those with an unknown category) are expenses.
/// Transactions without a valid date are skipped.
pub fn aggregate(
    transactions: Option<&[Transaction]>,
    range: DateRangeKey,
    categories: &[Category],
    now: OffsetDateTime,
    timezone: &Tz,
) -> Aggregation {
    let Some(transactions) = transactions else {
        return Aggregation::default();
    };

    let bounds = range.bounds(now.to_timezone(timezone).date());
    let mut skipped = 0;

    let in_range: Vec<(Date, &Transaction)> = transactions
        .iter()
        .filter_map(|transaction| match transaction.date {
            Some(date) => {
                let day = date.to_timezone(timezone).date();
                bounds.contains(day).then_some((day, transaction))
            }
            None => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::warn!("Skipped {skipped} transactions with an invalid date");
    }

    if in_range.is_empty() {
        return Aggregation::default();
    }

    let mut totals_by_day: BTreeMap<Date, Totals> = BTreeMap::new();

    for (day, transaction) in in_range {
        let day_totals = totals_by_day.entry(day).or_default();
        let amount = absolute_amount(transaction.amount);

        match classify(&transaction.category, categories) {
            CategoryType::Income => day_totals.income += amount,
            CategoryType::Expense => day_totals.expense += amount,
        }
    }

    let spans_years = match (
        totals_by_day.first_key_value(),
        totals_by_day.last_key_value(),
    ) {
        (Some((first, _)), Some((last, _))) => first.year() != last.year(),
        _ => false,
    };

    let series: Vec<DailyBucket> = totals_by_day
        .into_iter()
        .map(|(day, day_totals)| DailyBucket {
            day,
            label: format_day_label(day, spans_years),
            income: day_totals.income,
            expense: day_totals.expense,
        })
        .collect();

    let totals = series.iter().fold(Totals::default(), |acc, bucket| Totals {
        income: acc.income + bucket.income,
        expense: acc.expense + bucket.expense,
    });

    Aggregation { series, totals }
}

fn absolute_amount(amount: f64) -> f64 {
    if amount.is_finite() { amount.abs() } else { 0.0 }
}

fn classify(category: &str, categories: &[Category]) -> CategoryType {
    resolve_category(categories, category)
        .map_or(CategoryType::Expense, |category| category.category_type)
}

const DAY_LABEL: &[BorrowedFormatItem] = format_description!("[month repr:short] [day]");

const DAY_LABEL_WITH_YEAR: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day], [year]");

/// Formats a day as "MMM dd", e.g. "Jan 05", adding the year when the
/// series covers more than one calendar year.
fn format_day_label(day: Date, with_year: bool) -> String {
    let format = if with_year {
        DAY_LABEL_WITH_YEAR
    } else {
        DAY_LABEL
    };

    day.format(format).unwrap_or_else(|_| day.to_string())
}
