//! The transaction overview card: range selector, totals and chart.

use maud::{Markup, PreEscaped, html};

use crate::{
    account::{
        aggregation::{Aggregation, Totals},
        charts::{AccountChart, chart_script_source},
    },
    endpoints,
    html::{CARD_STYLE, FORM_SELECT_STYLE, format_currency},
    range::DateRangeKey,
};

const INCOME_TEXT_STYLE: &str = "text-lg font-bold text-green-500";
const EXPENSE_TEXT_STYLE: &str = "text-lg font-bold text-red-500";

/// Renders the transaction overview card.
///
/// The card is the target of its own range selector, so this is rendered
/// both inside the full page and on its own for htmx requests.
pub(super) fn transaction_overview_card(aggregation: &Aggregation, range: DateRangeKey) -> Markup {
    let chart = (!aggregation.series.is_empty())
        .then(|| AccountChart::transaction_overview(&aggregation.series));

    html! {
        section
            id="transaction-overview"
            class=(CARD_STYLE)
        {
            div class="flex flex-row items-center justify-between p-6 pb-7"
            {
                h2 class="text-base font-normal" { "Transaction Overview" }

                (range_selector(range))
            }

            div class="px-6 pb-6"
            {
                (totals_view(&aggregation.totals))

                div class="mt-6"
                {
                    @if let Some(chart) = &chart {
                        div
                            id=(chart.id)
                            class="min-h-[300px] rounded dark:bg-gray-100"
                        {}

                        script { (PreEscaped(chart_script_source(chart))) }
                    } @else {
                        p
                            id="no-transactions"
                            class="text-center text-sm text-gray-600 dark:text-gray-400 py-12"
                        {
                            "No transactions in this period."
                        }
                    }
                }
            }
        }
    }
}

fn range_selector(selected: DateRangeKey) -> Markup {
    html! {
        select
            name="range"
            aria-label="Select range"
            hx-get=(endpoints::ACCOUNT_VIEW)
            hx-target="#transaction-overview"
            hx-swap="outerHTML"
            class=(FORM_SELECT_STYLE)
        {
            @for key in DateRangeKey::ALL {
                option value=(key.as_query_value()) selected[key == selected]
                {
                    (key.label())
                }
            }
        }
    }
}

fn totals_view(totals: &Totals) -> Markup {
    let net = totals.net();
    let net_style = if net >= 0.0 {
        INCOME_TEXT_STYLE
    } else {
        EXPENSE_TEXT_STYLE
    };

    html! {
        div id="totals" class="flex justify-around mb-6 text-sm"
        {
            div class="text-center"
            {
                p class="text-gray-600 dark:text-gray-400" { "Total Income" }
                p id="total-income" class=(INCOME_TEXT_STYLE) { (format_currency(totals.income)) }
            }

            div class="text-center"
            {
                p class="text-gray-600 dark:text-gray-400" { "Total Expenses" }
                p id="total-expense" class=(EXPENSE_TEXT_STYLE)
                {
                    (format_currency(totals.expense))
                }
            }

            div class="text-center"
            {
                p class="text-gray-600 dark:text-gray-400" { "Net" }
                p id="net" class=(net_style) { (format_currency(net)) }
            }
        }
    }
}
