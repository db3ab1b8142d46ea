//! Chart generation and rendering for the account overview.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with a HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip, Trigger,
    },
    series::Bar,
};

use crate::account::aggregation::DailyBucket;

const INCOME_COLOR: &str = "#22c55e";
const EXPENSE_COLOR: &str = "#ef4444";

/// An account chart with its HTML container ID and ECharts configuration.
pub(super) struct AccountChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl AccountChart {
    pub(super) fn transaction_overview(series: &[DailyBucket]) -> Self {
        Self {
            id: "transaction-overview-chart",
            options: transaction_overview_chart(series).to_string(),
        }
    }
}

/// Generates JavaScript initialization code for `chart`.
///
/// The script initializes an ECharts instance with dark mode support and
/// responsive resizing. It runs immediately if the page has already loaded,
/// which is the case when the chart is swapped in by htmx.
pub(super) fn chart_script_source(chart: &AccountChart) -> String {
    format!(
        r#"(function() {{
            const init = function() {{
                const chartDom = document.getElementById("{}");
                if (!chartDom) {{
                    return;
                }}
                const chart = echarts.init(chartDom);
                const option = {};
                chart.setOption(option);

                window.addEventListener('resize', chart.resize);

                const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                const updateTheme = () => {{
                    const isDarkMode = darkModeMediaQuery.matches;
                    chart.setTheme(isDarkMode ? 'dark' : 'default');
                }}
                darkModeMediaQuery.addEventListener('change', updateTheme);
                updateTheme();
            }};

            if (document.readyState === 'loading') {{
                document.addEventListener('DOMContentLoaded', init);
            }} else {{
                init();
            }}
        }})();"#,
        chart.id, chart.options
    )
}

/// Builds a bar chart with one income bar and one expense bar per day.
fn transaction_overview_chart(series: &[DailyBucket]) -> Chart {
    let labels: Vec<String> = series.iter().map(|bucket| bucket.label.clone()).collect();
    let income: Vec<f64> = series.iter().map(|bucket| bucket.income).collect();
    let expense: Vec<f64> = series.iter().map(|bucket| bucket.expense).collect();

    Chart::new()
        .tooltip(currency_tooltip())
        .legend(Legend::new())
        .grid(
            Grid::new()
                .left(10)
                .right(10)
                .top(40)
                .bottom(0)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(whole_dollar_formatter())),
        )
        .series(
            Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(income),
        )
        .series(
            Bar::new()
                .name("Expense")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(expense),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return currencyFormatter.format(number ?? 0);",
    )
}

#[inline]
fn whole_dollar_formatter() -> JsFunction {
    JsFunction::new_with_args("number", "return '$' + Number(number).toFixed(0);")
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
