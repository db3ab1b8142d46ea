//! The transaction model and how it is read from JSON.
//!
//! Transactions come from outside the application and are not validated
//! upstream, so deserialization never fails on a bad field:
//! - `date` accepts RFC 3339 timestamps, `YYYY-MM-DD` dates (midnight UTC),
//!   `YYYY-MM-DDTHH:MM:SS` (UTC) or a number of milliseconds since the Unix
//!   epoch. Anything else becomes `None`.
//! - `amount` accepts numbers and numeric strings. Anything else, including
//!   non-finite values, becomes zero.
//! - `category` accepts a string. Anything else becomes an empty string.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};

/// A single movement of money into or out of an account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// When the transaction happened, or `None` if the date could not be parsed.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<OffsetDateTime>,

    /// The amount of money spent or earned. The sign is not trusted.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,

    /// The ID or name of the transaction's category.
    #[serde(default, deserialize_with = "deserialize_category")]
    pub category: String,
}

impl Transaction {
    /// Create a transaction with a known date.
    pub fn new(date: OffsetDateTime, amount: f64, category: &str) -> Self {
        Self {
            date: Some(date),
            amount,
            category: category.to_owned(),
        }
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(text)) => parse_date(text.trim()),
        Some(Value::Number(number)) => number.as_i64().and_then(|millis| {
            OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000).ok()
        }),
        _ => None,
    })
}

fn parse_date(text: &str) -> Option<OffsetDateTime> {
    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time);
    }

    if let Ok(date_time) = PrimitiveDateTime::parse(
        text,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(date_time.assume_utc());
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    let amount = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(amount.filter(|amount| amount.is_finite()).unwrap_or(0.0))
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(text)) => text,
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::Transaction;

    fn parse(json: &str) -> Transaction {
        serde_json::from_str(json).expect("Could not parse transaction")
    }

    #[test]
    fn parses_rfc3339_timestamp() {
        let transaction = parse(
            r#"{"date": "2024-03-04T10:15:00+13:00", "amount": -50, "category": "groceries"}"#,
        );

        assert_eq!(
            transaction,
            Transaction::new(datetime!(2024-03-04 10:15 +13), -50.0, "groceries")
        );
    }

    #[test]
    fn plain_date_is_midnight_utc() {
        let transaction = parse(r#"{"date": "2024-03-04", "amount": 1, "category": "x"}"#);

        assert_eq!(transaction.date, Some(datetime!(2024-03-04 00:00 UTC)));
    }

    #[test]
    fn date_time_without_offset_is_utc() {
        let transaction =
            parse(r#"{"date": "2024-03-04T09:30:00", "amount": 1, "category": "x"}"#);

        assert_eq!(transaction.date, Some(datetime!(2024-03-04 09:30 UTC)));
    }

    #[test]
    fn numeric_date_is_unix_milliseconds() {
        let transaction = parse(r#"{"date": 1709510400000, "amount": 1, "category": "x"}"#);

        assert_eq!(transaction.date, Some(datetime!(2024-03-04 00:00 UTC)));
    }

    #[test]
    fn unparseable_date_is_none() {
        let transaction = parse(r#"{"date": "last tuesday", "amount": 1, "category": "x"}"#);

        assert_eq!(transaction.date, None);
    }

    #[test]
    fn missing_date_is_none() {
        let transaction = parse(r#"{"amount": 1, "category": "x"}"#);

        assert_eq!(transaction.date, None);
    }

    #[test]
    fn numeric_string_amount_is_parsed() {
        let transaction = parse(r#"{"date": "2024-03-04", "amount": " -12.5 ", "category": "x"}"#);

        assert_eq!(transaction.amount, -12.5);
    }

    #[test]
    fn non_numeric_amount_is_zero() {
        for amount in [r#""twelve""#, "null", "true", "[]", r#""NaN""#, r#""inf""#] {
            let transaction = parse(&format!(
                r#"{{"date": "2024-03-04", "amount": {amount}, "category": "x"}}"#
            ));

            assert_eq!(transaction.amount, 0.0, "amount {amount} should be zero");
        }
    }

    #[test]
    fn missing_or_null_category_is_empty() {
        assert_eq!(parse(r#"{"date": "2024-03-04", "amount": 1}"#).category, "");
        assert_eq!(
            parse(r#"{"date": "2024-03-04", "amount": 1, "category": null}"#).category,
            ""
        );
    }

    #[test]
    fn ignores_extra_fields() {
        let transaction = parse(
            r#"{
                "id": "abc",
                "description": "Coffee",
                "date": "2024-03-04",
                "amount": 4.5,
                "category": "food"
            }"#,
        );

        assert_eq!(transaction.category, "food");
        assert_eq!(transaction.amount, 4.5);
    }
}
