//! Account overview HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the account overview page and its JSON summary
//! - The full page view wrapping the transaction overview card
//! - State and query types used by the handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time_tz::Tz;

use crate::{
    AppState, Error,
    account::{
        aggregation::{Aggregation, DailyBucket, aggregate},
        card::transaction_overview_card,
    },
    category::Category,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    range::DateRangeKey,
    timezone::get_timezone,
    transaction::TransactionSource,
};

/// The state needed for displaying the account overview.
#[derive(Clone)]
pub struct AccountState {
    /// Where transactions are read from on every request.
    pub transactions: Arc<dyn TransactionSource>,
    /// The category table used to classify transactions.
    pub categories: Arc<[Category]>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            categories: state.categories.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for selecting a date range.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    /// The range key, e.g. "7D". Defaults to [DateRangeKey::default_preset].
    pub range: Option<String>,
}

impl RangeQuery {
    fn range_key(&self) -> Result<DateRangeKey, Error> {
        match &self.range {
            Some(key) => key.parse(),
            None => Ok(DateRangeKey::default_preset()),
        }
    }
}

/// The totals of an [AccountSummary], including the net amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryTotals {
    /// The total income.
    pub income: f64,
    /// The total expenses, as a positive number.
    pub expense: f64,
    /// Income minus expenses.
    pub net: f64,
}

/// The daily series and totals for a date range, as served by the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    /// The range the summary was computed for.
    pub range: DateRangeKey,
    /// The daily buckets, sorted by day.
    pub series: Vec<DailyBucket>,
    /// The totals over the whole series.
    pub totals: SummaryTotals,
}

impl AccountSummary {
    fn new(range: DateRangeKey, aggregation: Aggregation) -> Self {
        Self {
            range,
            totals: SummaryTotals {
                income: aggregation.totals.income,
                expense: aggregation.totals.expense,
                net: aggregation.totals.net(),
            },
            series: aggregation.series,
        }
    }
}

/// Display the account overview page.
///
/// Requests made by htmx (e.g., from the range selector) only receive the
/// transaction overview card.
pub async fn get_account_page(
    State(state): State<AccountState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<RangeQuery>,
) -> Result<Response, Error> {
    let range = query.range_key()?;
    let timezone = get_timezone(&state.local_timezone)?;
    let aggregation = build_aggregation(&state, range, OffsetDateTime::now_utc(), timezone);

    if is_htmx_request {
        return Ok(transaction_overview_card(&aggregation, range).into_response());
    }

    Ok(account_view(&aggregation, range).into_response())
}

/// Return the daily income and expense series for a date range as JSON.
pub async fn get_account_summary(
    State(state): State<AccountState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<AccountSummary>, Error> {
    let range = query.range_key()?;
    let timezone = get_timezone(&state.local_timezone)?;
    let aggregation = build_aggregation(&state, range, OffsetDateTime::now_utc(), timezone);

    Ok(Json(AccountSummary::new(range, aggregation)))
}

/// Reads the transactions and aggregates them for `range`.
///
/// A transaction source that cannot be read is treated as having no data.
fn build_aggregation(
    state: &AccountState,
    range: DateRangeKey,
    now: OffsetDateTime,
    timezone: &Tz,
) -> Aggregation {
    let transactions = state
        .transactions
        .transactions()
        .inspect_err(|error| tracing::warn!("Could not get transactions, showing no data: {error}"))
        .ok();

    aggregate(
        transactions.as_deref(),
        range,
        &state.categories,
        now,
        timezone,
    )
}

/// Renders the full account overview page.
fn account_view(aggregation: &Aggregation, range: DateRangeKey) -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="self-start text-2xl font-bold mb-4" { "Account" }

            (transaction_overview_card(aggregation, range))
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base("Account", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_htmx::HxRequest;
    use scraper::Selector;
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        account::handlers::{AccountState, RangeQuery, get_account_page, get_account_summary},
        category::default_categories,
        test_utils::{
            assert_content_type, assert_valid_html, get_header, parse_html_document,
            parse_html_fragment,
        },
        transaction::{JsonFileTransactions, Transaction},
    };

    fn get_test_state(transactions: Vec<Transaction>) -> AccountState {
        AccountState {
            transactions: Arc::new(transactions),
            categories: default_categories().into(),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn days_ago(days: i64) -> OffsetDateTime {
        OffsetDateTime::now_utc() - Duration::days(days)
    }

    fn range_query(range: &str) -> Query<RangeQuery> {
        Query(RangeQuery {
            range: Some(range.to_owned()),
        })
    }

    #[tokio::test]
    async fn page_renders_card_with_default_range() {
        let state = get_test_state(vec![Transaction::new(days_ago(1), 20.0, "food")]);

        let response = get_account_page(
            State(state),
            HxRequest(false),
            Query(RangeQuery::default()),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let selected = Selector::parse("option[selected]").unwrap();
        let selected = html.select(&selected).next().unwrap();
        assert_eq!(selected.value().attr("value"), Some("1M"));

        let chart = Selector::parse("#transaction-overview-chart").unwrap();
        assert_eq!(html.select(&chart).count(), 1);

        let echarts = Selector::parse("script[src='/static/echarts.6.0.0.min.js']").unwrap();
        assert_eq!(html.select(&echarts).count(), 1);
    }

    #[tokio::test]
    async fn htmx_request_renders_only_the_card() {
        let state = get_test_state(vec![Transaction::new(days_ago(1), 20.0, "food")]);

        let response = get_account_page(State(state), HxRequest(true), range_query("7D"))
            .await
            .unwrap();

        let html = parse_html_fragment(response).await;
        let card = Selector::parse("section#transaction-overview").unwrap();
        let title = Selector::parse("title").unwrap();
        assert_eq!(html.select(&card).count(), 1);
        assert_eq!(html.select(&title).count(), 0);
    }

    #[tokio::test]
    async fn unknown_range_is_bad_request() {
        let state = get_test_state(vec![]);

        let result = get_account_page(State(state), HxRequest(false), range_query("2W")).await;

        let error = result.unwrap_err();
        assert_eq!(error, Error::UnknownRangeKey("2W".to_owned()));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let mut state = get_test_state(vec![]);
        state.local_timezone = "Mars/Olympus_Mons".to_owned();

        let result = get_account_summary(State(state), range_query("7D")).await;

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned())
        );
    }

    #[tokio::test]
    async fn unreadable_source_renders_no_data() {
        let state = AccountState {
            transactions: Arc::new(JsonFileTransactions::new("/this/path/does/not/exist.json")),
            categories: default_categories().into(),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_account_page(State(state), HxRequest(true), range_query("ALL"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let no_data = Selector::parse("#no-transactions").unwrap();
        assert_eq!(html.select(&no_data).count(), 1);
    }

    #[tokio::test]
    async fn summary_contains_series_and_totals() {
        let state = get_test_state(vec![
            Transaction::new(days_ago(2), -50.0, "groceries"),
            Transaction::new(days_ago(2), 200.0, "salary"),
            Transaction::new(days_ago(40), 30.0, "salary"),
        ]);

        let summary = get_account_summary(State(state), range_query("7D"))
            .await
            .unwrap()
            .0;

        assert_eq!(summary.series.len(), 1);
        assert_eq!(summary.series[0].income, 200.0);
        assert_eq!(summary.series[0].expense, 50.0);
        assert_eq!(summary.totals.income, 200.0);
        assert_eq!(summary.totals.expense, 50.0);
        assert_eq!(summary.totals.net, 150.0);
    }

    #[tokio::test]
    async fn summary_is_served_as_json() {
        let state = get_test_state(vec![Transaction::new(days_ago(1), 20.0, "food")]);

        let response = get_account_summary(State(state), range_query("1M"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_header(&response, "content-type"), "application/json");
    }

    #[tokio::test]
    async fn summary_serializes_range_key() {
        let state = get_test_state(vec![]);

        let summary = get_account_summary(State(state), range_query("ALL"))
            .await
            .unwrap()
            .0;

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "range": "ALL",
                "series": [],
                "totals": {"income": 0.0, "expense": 0.0, "net": 0.0}
            })
        );
    }
}
