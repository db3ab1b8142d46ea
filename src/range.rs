//! The fixed set of date ranges the account overview can be filtered by.

use std::{fmt::Display, str::FromStr};

use serde::Serialize;
use time::{Date, Duration};

use crate::Error;

/// A preset lookback window, selected by a short key such as `"7D"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DateRangeKey {
    /// The last 7 days.
    #[serde(rename = "7D")]
    SevenDays,
    /// The last 30 days.
    #[serde(rename = "1M")]
    OneMonth,
    /// The last 90 days.
    #[serde(rename = "3M")]
    ThreeMonths,
    /// The last 180 days.
    #[serde(rename = "6M")]
    SixMonths,
    /// Every transaction up to the end of today.
    #[serde(rename = "ALL")]
    AllTime,
}

impl DateRangeKey {
    /// Every range key, in the order they are shown in the range selector.
    pub const ALL: [DateRangeKey; 5] = [
        Self::SevenDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::AllTime,
    ];

    /// The range selected when none is given.
    pub fn default_preset() -> Self {
        Self::OneMonth
    }

    /// The key used in query strings and JSON, e.g. `"7D"`.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::SevenDays => "7D",
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
            Self::AllTime => "ALL",
        }
    }

    /// The human readable name shown in the range selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::SevenDays => "Last 7 Days",
            Self::OneMonth => "Last 1 Month",
            Self::ThreeMonths => "Last 3 Months",
            Self::SixMonths => "Last 6 Months",
            Self::AllTime => "All Time",
        }
    }

    /// The number of days to look back from today, or `None` for no lower bound.
    pub fn lookback_days(self) -> Option<i64> {
        match self {
            Self::SevenDays => Some(7),
            Self::OneMonth => Some(30),
            Self::ThreeMonths => Some(90),
            Self::SixMonths => Some(180),
            Self::AllTime => None,
        }
    }

    /// Computes the inclusive bounds of this range relative to `today`.
    ///
    /// The bounds are calendar days in the local timezone: the range ends
    /// with `today` and starts `lookback_days` days before it.
    pub fn bounds(self, today: Date) -> DateBounds {
        DateBounds {
            start: self
                .lookback_days()
                .map(|days| today.saturating_sub(Duration::days(days))),
            end: today,
        }
    }
}

impl Default for DateRangeKey {
    fn default() -> Self {
        Self::default_preset()
    }
}

impl FromStr for DateRangeKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_query_value() == s)
            .ok_or_else(|| Error::UnknownRangeKey(s.to_owned()))
    }
}

impl Display for DateRangeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_value())
    }
}

/// An inclusive range of calendar days. A missing `start` means there is no lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    /// The earliest included day.
    pub start: Option<Date>,
    /// The latest included day.
    pub end: Date,
}

impl DateBounds {
    /// Whether `day` falls within the bounds, inclusive at both ends.
    pub fn contains(&self, day: Date) -> bool {
        self.start.is_none_or(|start| day >= start) && day <= self.end
    }
}
