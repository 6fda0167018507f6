use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::components::{AuthBar, AuthGate};
use crate::dates;
use crate::types::{
    amount_class, format_amount, format_amount_abs, MonthlySummary, Summary, YearlySummary,
};
use crate::Route;

#[derive(Clone, PartialEq, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
}

#[derive(Serialize)]
struct SummaryQueryParams {
    year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<u32>,
}

#[derive(Serialize)]
struct PurchasesQueryParams {
    date: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Table,
    Calendar,
}

#[function_component(SummaryPage)]
pub fn summary_page() -> Html {
    html! {
        <AuthGate
            title="Authentication Required"
            message="Please sign in to view your purchase summary."
        >
            <SummaryView />
        </AuthGate>
    }
}

#[function_component(SummaryView)]
fn summary_view() -> Html {
    let api = use_context::<ApiClient>();
    let navigator = use_navigator();
    let location = use_location();

    let query = location
        .as_ref()
        .and_then(|loc| loc.query::<SummaryQuery>().ok())
        .unwrap_or(SummaryQuery {
            year: None,
            month: None,
        });
    let year = query.year.unwrap_or_else(dates::current_year);
    let month = query.month;

    let data = use_state(|| None::<Summary>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let view_mode = use_state(|| ViewMode::Table);

    {
        let api = api.clone();
        let data = data.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |(year, month): &(i32, Option<u32>)| {
                if let Some(api) = api {
                    let year = *year;
                    let month = *month;
                    loading.set(true);
                    error.set(None);
                    data.set(None);
                    spawn_local(async move {
                        match api.get_summary(year, month).await {
                            Ok(summary) => data.set(Some(summary)),
                            Err(err) => error.set(Some(err.to_string())),
                        }
                        loading.set(false);
                    });
                }
                || ()
            },
            (year, month),
        );
    }

    let go_to = {
        let navigator = navigator.clone();
        Callback::from(move |(year, month): (i32, Option<u32>)| {
            if let Some(navigator) = &navigator {
                let _ = navigator.push_with_query(
                    &Route::Summary,
                    &SummaryQueryParams { year, month },
                );
            }
        })
    };

    let go_to_day = {
        let navigator = navigator.clone();
        Callback::from(move |date: String| {
            if let Some(navigator) = &navigator {
                let _ = navigator
                    .push_with_query(&Route::Purchases, &PurchasesQueryParams { date });
            }
        })
    };

    let step = {
        let go_to = go_to.clone();
        move |direction: i32| {
            let go_to = go_to.clone();
            Callback::from(move |_: MouseEvent| match month {
                Some(current) => {
                    let (next_year, next_month) = dates::step_month(year, current, direction);
                    go_to.emit((next_year, Some(next_month)));
                }
                None => go_to.emit((year + direction, None)),
            })
        }
    };

    let heading = match month {
        Some(month) => format!("{} {}", dates::month_name(month), year),
        None => year.to_string(),
    };

    html! {
        <div class="bg-gray-900 min-h-screen text-white p-4 md:p-8">
            <div class="max-w-4xl mx-auto">
                <div class="flex justify-between items-center mb-6">
                    <h1 class="text-3xl font-bold text-cyan-400">{"Purchase Summary"}</h1>
                    <div class="flex items-center gap-2">
                        <Link<Route> to={Route::Stats} classes="text-sm bg-gray-700 hover:bg-gray-600 px-3 py-2 rounded-md transition-colors">{"Stats"}</Link<Route>>
                        <Link<Route> to={Route::Purchases} classes="text-sm bg-gray-700 hover:bg-gray-600 px-3 py-2 rounded-md transition-colors">{"Weekly View"}</Link<Route>>
                        <Link<Route> to={Route::Upload} classes="text-sm bg-gray-700 hover:bg-gray-600 px-3 py-2 rounded-md transition-colors">{"Upload New"}</Link<Route>>
                        <AuthBar />
                    </div>
                </div>

                <div class="flex items-center justify-between gap-4 mb-6 p-4 bg-gray-800 rounded-lg">
                    <button onclick={step(-1)} disabled={*loading} class="px-4 py-2 bg-gray-700 rounded hover:bg-gray-600 disabled:opacity-50">{"‹ Prev"}</button>
                    <h2 class="text-xl font-semibold w-48 text-center">{ heading }</h2>
                    <button onclick={step(1)} disabled={*loading} class="px-4 py-2 bg-gray-700 rounded hover:bg-gray-600 disabled:opacity-50">{"Next ›"}</button>
                </div>

                <div class="flex justify-between items-center mb-4">
                    {
                        if month.is_some() {
                            let go_to = go_to.clone();
                            let on_back = Callback::from(move |_| go_to.emit((year, None)));
                            html! {
                                <div>
                                    <button onclick={on_back} class="text-cyan-400 hover:underline">
                                        { format!("‹ Back to {} Summary", year) }
                                    </button>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <div class="flex items-center gap-1 bg-gray-700 p-1 rounded-md ml-auto">
                        <button
                            onclick={{
                                let view_mode = view_mode.clone();
                                Callback::from(move |_| view_mode.set(ViewMode::Table))
                            }}
                            class={if *view_mode == ViewMode::Table { "px-3 py-1 text-sm rounded-md bg-cyan-600" } else { "px-3 py-1 text-sm rounded-md hover:bg-gray-600" }}
                        >
                            {"Table"}
                        </button>
                        <button
                            onclick={{
                                let view_mode = view_mode.clone();
                                Callback::from(move |_| view_mode.set(ViewMode::Calendar))
                            }}
                            class={if *view_mode == ViewMode::Calendar { "px-3 py-1 text-sm rounded-md bg-cyan-600" } else { "px-3 py-1 text-sm rounded-md hover:bg-gray-600" }}
                        >
                            {"Calendar"}
                        </button>
                    </div>
                </div>

                { if *loading { html! { <p class="text-center">{"Loading..."}</p> } } else { html!{} } }
                {
                    if let Some(message) = &*error {
                        html! { <p class="text-center text-red-400">{ message.clone() }</p> }
                    } else {
                        html! {}
                    }
                }

                {
                    match (&*data, *view_mode) {
                        (Some(Summary::Yearly(yearly)), ViewMode::Table) => yearly_table(yearly, &go_to),
                        (Some(Summary::Monthly(monthly)), ViewMode::Table) => monthly_table(monthly, &go_to_day),
                        (Some(Summary::Yearly(yearly)), ViewMode::Calendar) => yearly_calendar(yearly, &go_to),
                        (Some(Summary::Monthly(monthly)), ViewMode::Calendar) => monthly_calendar(monthly, &go_to_day),
                        (None, _) => html! {},
                    }
                }
            </div>
        </div>
    }
}

fn yearly_table(data: &YearlySummary, go_to: &Callback<(i32, Option<u32>)>) -> Html {
    let year = data.year;
    html! {
        <div class="bg-gray-800 rounded-lg overflow-hidden">
            <table class="w-full text-left">
                <thead class="bg-gray-700">
                    <tr>
                        <th class="p-4">{"Month"}</th>
                        <th class="p-4 text-right">{"Total Spent"}</th>
                        <th class="p-4 text-right">{"Receipts"}</th>
                        <th class="p-4 text-right">{"Items"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for data.summaries.iter().map(|summary| {
                        let on_click = {
                            let go_to = go_to.clone();
                            let month = summary.month;
                            Callback::from(move |_| go_to.emit((year, Some(month))))
                        };
                        html! {
                            <tr
                                key={summary.month}
                                class="border-b border-gray-700 hover:bg-gray-700/50 cursor-pointer"
                                onclick={on_click}
                            >
                                <td class="p-4 font-semibold">{ summary.month_name.clone() }</td>
                                <td class={classes!("p-4", "text-right", "font-mono", amount_class(summary.total_amount))}>
                                    { format_amount(summary.total_amount) }
                                </td>
                                <td class="p-4 text-right font-mono">{ summary.receipt_count }</td>
                                <td class="p-4 text-right font-mono">{ summary.item_count }</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </div>
    }
}

fn monthly_table(data: &MonthlySummary, go_to_day: &Callback<String>) -> Html {
    html! {
        <div class="bg-gray-800 rounded-lg overflow-hidden">
            <table class="w-full text-left">
                <thead class="bg-gray-700">
                    <tr>
                        <th class="p-4">{"Date"}</th>
                        <th class="p-4 text-right">{"Total Spent"}</th>
                        <th class="p-4 text-right">{"Receipts"}</th>
                        <th class="p-4 text-right">{"Items"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for data.daily_summaries.iter().map(|summary| {
                        let has_receipts = summary.receipt_count > 0;
                        let on_click = {
                            let go_to_day = go_to_day.clone();
                            let date = summary.date.clone();
                            Callback::from(move |_| {
                                if has_receipts {
                                    go_to_day.emit(date.clone());
                                }
                            })
                        };
                        let row_class = if has_receipts {
                            "border-b border-gray-700 hover:bg-gray-700/50 cursor-pointer"
                        } else {
                            "border-b border-gray-700 text-gray-500"
                        };
                        let amount = if has_receipts {
                            classes!("p-4", "text-right", "font-mono", amount_class(summary.total_amount))
                        } else {
                            classes!("p-4", "text-right", "font-mono")
                        };
                        let day = dates::day_of_month(&summary.date)
                            .map(|d| d.to_string())
                            .unwrap_or_default();
                        html! {
                            <tr key={summary.date.clone()} class={row_class} onclick={on_click}>
                                <td class="p-4 font-semibold">{ format!("{}, {}", summary.day_name, day) }</td>
                                <td class={amount}>{ format_amount(summary.total_amount) }</td>
                                <td class="p-4 text-right font-mono">{ summary.receipt_count }</td>
                                <td class="p-4 text-right font-mono">{ summary.item_count }</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </div>
    }
}

fn yearly_calendar(data: &YearlySummary, go_to: &Callback<(i32, Option<u32>)>) -> Html {
    let year = data.year;
    html! {
        <div class="grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-4 gap-3 sm:gap-4">
            { for (1..=12u32).map(|month| {
                let summary = data.summaries.iter().find(|s| s.month == month);
                let has_data = summary.map(|s| s.receipt_count > 0).unwrap_or(false);
                let on_click = {
                    let go_to = go_to.clone();
                    Callback::from(move |_| {
                        if has_data {
                            go_to.emit((year, Some(month)));
                        }
                    })
                };
                let cell_class = if has_data {
                    "aspect-square bg-gray-800 p-3 sm:p-4 rounded-lg transition-colors relative cursor-pointer hover:bg-gray-700"
                } else {
                    "aspect-square bg-gray-900 p-3 sm:p-4 rounded-lg transition-colors relative"
                };
                html! {
                    <div key={month} class={cell_class} onclick={on_click}>
                        <div class="flex flex-col h-full justify-between">
                            <h3 class="font-bold text-sm sm:text-base">{ dates::short_month_name(month) }</h3>
                            {
                                if let Some(summary) = summary {
                                    html! {
                                        <div class="text-xs sm:text-sm space-y-1">
                                            <p class={classes!("font-mono", "font-bold", amount_class(summary.total_amount))}>
                                                { format_amount_abs(summary.total_amount) }
                                            </p>
                                            <p class="text-gray-400">{ format!("{} receipts", summary.receipt_count) }</p>
                                        </div>
                                    }
                                } else {
                                    html! { <p class="text-xs text-gray-500">{"No data"}</p> }
                                }
                            }
                        </div>
                        {
                            if has_data {
                                html! { <div class="absolute top-2 right-2 w-2 h-2 bg-cyan-400 rounded-full"></div> }
                            } else {
                                html! {}
                            }
                        }
                    </div>
                }
            }) }
        </div>
    }
}

fn monthly_calendar(data: &MonthlySummary, go_to_day: &Callback<String>) -> Html {
    let blanks = dates::first_weekday_offset(data.year, data.month);
    let day_count = dates::days_in_month(data.year, data.month);

    html! {
        <div class="bg-gray-800 rounded-lg p-2 sm:p-4">
            <div class="grid grid-cols-7 gap-1 sm:gap-2 mb-2">
                { for ["S", "M", "T", "W", "T", "F", "S"].iter().enumerate().map(|(i, day)| html! {
                    <div key={i} class="text-center text-xs sm:text-sm font-semibold text-gray-400 py-2">
                        { *day }
                    </div>
                }) }
            </div>
            <div class="grid grid-cols-7 gap-1 sm:gap-2">
                { for (0..blanks).map(|i| html! { <div key={format!("blank-{}", i)} class="aspect-square"></div> }) }
                { for (1..=day_count).map(|day| {
                    let summary = data
                        .daily_summaries
                        .iter()
                        .find(|s| dates::day_of_month(&s.date) == Some(day));
                    let has_purchases = summary.map(|s| s.receipt_count > 0).unwrap_or(false);
                    let on_click = {
                        let go_to_day = go_to_day.clone();
                        let date = summary.map(|s| s.date.clone());
                        Callback::from(move |_| {
                            if has_purchases {
                                if let Some(date) = &date {
                                    go_to_day.emit(date.clone());
                                }
                            }
                        })
                    };
                    let cell_class = if has_purchases {
                        "aspect-square border border-gray-600 rounded-lg p-1 sm:p-2 flex flex-col justify-between relative cursor-pointer hover:bg-gray-700 bg-gray-800 transition-colors"
                    } else {
                        "aspect-square border border-gray-600 rounded-lg p-1 sm:p-2 flex flex-col justify-between relative bg-gray-900 text-gray-500"
                    };
                    html! {
                        <div key={day} class={cell_class} onclick={on_click}>
                            <span class="text-xs sm:text-sm font-medium">{ day }</span>
                            {
                                match summary {
                                    Some(summary) if has_purchases => html! {
                                        <>
                                            <div class={classes!("text-xs", "font-bold", "text-right", amount_class(summary.total_amount))}>
                                                { format_amount_abs(summary.total_amount) }
                                            </div>
                                            <div class="absolute top-1 right-1 w-2 h-2 bg-cyan-400 rounded-full"></div>
                                        </>
                                    },
                                    _ => html! {},
                                }
                            }
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_cell_routes_to_the_monthly_view() {
        let params = SummaryQueryParams {
            year: 2025,
            month: Some(11),
        };
        assert_eq!(
            serde_urlencoded::to_string(&params).expect("serializes"),
            "year=2025&month=11"
        );

        let yearly_only = SummaryQueryParams {
            year: 2026,
            month: None,
        };
        assert_eq!(
            serde_urlencoded::to_string(&yearly_only).expect("serializes"),
            "year=2026"
        );
    }

    #[test]
    fn day_cell_routes_to_the_weekly_view() {
        let params = PurchasesQueryParams {
            date: "2025-11-06".to_string(),
        };
        assert_eq!(
            serde_urlencoded::to_string(&params).expect("serializes"),
            "date=2025-11-06"
        );
    }

    #[test]
    fn incoming_query_parses_with_partial_fields() {
        let q: SummaryQuery = serde_urlencoded::from_str("year=2025&month=11").expect("parses");
        assert_eq!(q.year, Some(2025));
        assert_eq!(q.month, Some(11));

        let q: SummaryQuery = serde_urlencoded::from_str("year=2025").expect("parses");
        assert_eq!(q.month, None);

        let q: SummaryQuery = serde_urlencoded::from_str("").expect("parses");
        assert_eq!(q.year, None);
    }
}
