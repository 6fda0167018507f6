use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::components::{AuthBar, AuthGate};
use crate::dates;
use crate::pagination::{NextPage, PageHistory};
use crate::period::PeriodFilter;
use crate::types::{
    format_amount, GlobalItemStats, UserCategoryStats, UserItemStats, UserSummaryStats,
};
use crate::Route;

const ITEMS_PAGE_SIZE: u32 = 20;

#[derive(Clone, Copy, PartialEq, Eq)]
enum StatsTab {
    Summary,
    Items,
    Categories,
    Global,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TimeFilterKind {
    CurrentYear,
    Year,
    Month,
    Months,
}

fn period_for(
    kind: TimeFilterKind,
    year: i32,
    month: u32,
    last_months: u32,
) -> PeriodFilter {
    match kind {
        TimeFilterKind::CurrentYear => PeriodFilter::CurrentYear,
        TimeFilterKind::Year => PeriodFilter::Year(year),
        TimeFilterKind::Month => PeriodFilter::Month { year, month },
        TimeFilterKind::Months => PeriodFilter::LastMonths(last_months),
    }
}

#[function_component(StatsPage)]
pub fn stats_page() -> Html {
    html! {
        <AuthGate
            title="Authentication Required"
            message="Please sign in to view your purchase statistics."
        >
            <StatsView />
        </AuthGate>
    }
}

#[function_component(StatsView)]
fn stats_view() -> Html {
    let api = use_context::<ApiClient>();

    let active_tab = use_state(|| StatsTab::Summary);
    let summary_stats = use_state(|| None::<UserSummaryStats>);
    let category_stats = use_state(|| None::<UserCategoryStats>);
    let global_stats = use_state(|| None::<GlobalItemStats>);
    let global_item_name = use_state(String::new);
    let history = use_state(PageHistory::<UserItemStats>::new);
    let known_categories = use_state(Vec::<String>::new);
    let category_filter = use_state(|| None::<String>);

    let time_filter = use_state(|| TimeFilterKind::CurrentYear);
    let selected_year = use_state(dates::current_year);
    let selected_month = use_state(|| 1u32);
    let last_months = use_state(|| 3u32);

    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

    let current_period = period_for(
        *time_filter,
        *selected_year,
        *selected_month,
        *last_months,
    );

    let fetch_summary = {
        let api = api.clone();
        let summary_stats = summary_stats.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let Some(api) = api.clone() else { return };
            let summary_stats = summary_stats.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api.get_user_summary_stats(None).await {
                    Ok(stats) => summary_stats.set(Some(stats)),
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    let fetch_categories = {
        let api = api.clone();
        let category_stats = category_stats.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |period: PeriodFilter| {
            let Some(api) = api.clone() else { return };
            let category_stats = category_stats.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api.get_user_category_stats(Some(period)).await {
                    Ok(stats) => category_stats.set(Some(stats)),
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    // fetch one items page; reset discards the token history first
    let fetch_items_page = {
        let api = api.clone();
        let history = history.clone();
        let known_categories = known_categories.clone();
        let category_filter = category_filter.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |(token, reset, period): (Option<String>, bool, PeriodFilter)| {
            let Some(api) = api.clone() else { return };
            let history = history.clone();
            let known_categories = known_categories.clone();
            let category = (*category_filter).clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api
                    .get_user_item_stats(ITEMS_PAGE_SIZE, token, Some(period), category)
                    .await
                {
                    Ok(page) => {
                        let mut categories = (*known_categories).clone();
                        for item in &page.items {
                            if !categories.contains(&item.category) {
                                categories.push(item.category.clone());
                            }
                        }
                        categories.sort();
                        known_categories.set(categories);

                        let mut next = (*history).clone();
                        if reset {
                            next.reset();
                        }
                        next.record(page);
                        history.set(next);
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch_summary = fetch_summary.clone();
        let fetch_categories = fetch_categories.clone();
        let fetch_items_page = fetch_items_page.clone();
        use_effect_with_deps(
            move |(tab, period, _category): &(StatsTab, PeriodFilter, Option<String>)| {
                match tab {
                    StatsTab::Summary => fetch_summary.emit(()),
                    StatsTab::Items => fetch_items_page.emit((None, true, *period)),
                    StatsTab::Categories => fetch_categories.emit(*period),
                    StatsTab::Global => {}
                }
                || ()
            },
            (
                *active_tab,
                current_period,
                (*category_filter).clone(),
            ),
        );
    }

    let on_next_page = {
        let history = history.clone();
        let fetch_items_page = fetch_items_page.clone();
        Callback::from(move |_| match history.next_action() {
            NextPage::Cached => {
                let mut next = (*history).clone();
                next.advance_cached();
                history.set(next);
            }
            NextPage::Fetch(token) => {
                fetch_items_page.emit((token, false, current_period));
            }
            NextPage::Exhausted => {}
        })
    };

    let on_prev_page = {
        let history = history.clone();
        Callback::from(move |_| {
            let mut next = (*history).clone();
            if next.go_prev() {
                history.set(next);
            }
        })
    };

    let go_to_page = {
        let history = history.clone();
        Callback::from(move |number: usize| {
            let mut next = (*history).clone();
            if next.go_to_page(number) {
                history.set(next);
            }
        })
    };

    let fetch_global = {
        let api = api.clone();
        let global_stats = global_stats.clone();
        let global_item_name = global_item_name.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let name = global_item_name.trim().to_string();
            if name.is_empty() {
                return;
            }
            let Some(api) = api.clone() else { return };
            let global_stats = global_stats.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api.get_global_item_stats(&name).await {
                    Ok(stats) => global_stats.set(Some(stats)),
                    Err(err) => {
                        global_stats.set(None);
                        error.set(Some(err.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let tab_button = |tab: StatsTab, label: &'static str| {
        let active_tab = active_tab.clone();
        let is_active = *active_tab == tab;
        let onclick = Callback::from(move |_| active_tab.set(tab));
        let class = if is_active {
            "px-4 py-2 rounded-md transition-colors bg-cyan-600"
        } else {
            "px-4 py-2 rounded-md transition-colors hover:bg-gray-700"
        };
        html! { <button onclick={onclick} class={class}>{ label }</button> }
    };

    // the items table stays mounted through page fetches; its controls
    // are disabled instead
    let show_content = match *active_tab {
        StatsTab::Items => error.is_none(),
        _ => !*loading && error.is_none(),
    };

    html! {
        <div class="bg-gray-900 min-h-screen text-white p-4 md:p-8">
            <div class="max-w-6xl mx-auto">
                <div class="flex justify-between items-center mb-6">
                    <h1 class="text-3xl font-bold text-cyan-400">{"Purchase Statistics"}</h1>
                    <div class="flex items-center gap-2">
                        <Link<Route> to={Route::Summary} classes="text-sm bg-gray-700 hover:bg-gray-600 px-3 py-2 rounded-md transition-colors">{"Summary"}</Link<Route>>
                        <Link<Route> to={Route::Purchases} classes="text-sm bg-gray-700 hover:bg-gray-600 px-3 py-2 rounded-md transition-colors">{"Weekly View"}</Link<Route>>
                        <Link<Route> to={Route::Upload} classes="text-sm bg-gray-700 hover:bg-gray-600 px-3 py-2 rounded-md transition-colors">{"Upload New"}</Link<Route>>
                        <AuthBar />
                    </div>
                </div>

                <div class="flex gap-1 bg-gray-800 p-1 rounded-lg mb-6">
                    { tab_button(StatsTab::Summary, "Summary") }
                    { tab_button(StatsTab::Items, "Item Details") }
                    { tab_button(StatsTab::Categories, "Categories") }
                    { tab_button(StatsTab::Global, "Global Lookup") }
                </div>

                {
                    if matches!(*active_tab, StatsTab::Items | StatsTab::Categories) {
                        render_filters(
                            &time_filter,
                            &selected_year,
                            &selected_month,
                            &last_months,
                        )
                    } else {
                        html! {}
                    }
                }

                {
                    if *loading && *active_tab != StatsTab::Items {
                        html! { <p class="text-center py-8">{"Loading..."}</p> }
                    } else {
                        html! {}
                    }
                }
                {
                    if let Some(message) = &*error {
                        html! {
                            <div class="text-center py-8">
                                <p class="text-red-400 mb-2">{"Error loading data"}</p>
                                <p class="text-gray-400 text-sm">{ message.clone() }</p>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }

                {
                    if show_content {
                        match *active_tab {
                            StatsTab::Summary => render_summary_tab(&summary_stats),
                            StatsTab::Items => render_items_tab(
                                &history,
                                &known_categories,
                                &category_filter,
                                *loading,
                                &on_prev_page,
                                &on_next_page,
                                &go_to_page,
                            ),
                            StatsTab::Categories => render_categories_tab(&category_stats),
                            StatsTab::Global => render_global_tab(
                                &global_stats,
                                &global_item_name,
                                *loading,
                                &fetch_global,
                            ),
                        }
                    } else {
                        html! {}
                    }
                }
                {
                    if *loading && *active_tab == StatsTab::Items && !history.is_empty() {
                        html! {
                            <div class="text-center py-4">
                                <p class="text-gray-400">{"Loading more items..."}</p>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

fn render_filters(
    time_filter: &UseStateHandle<TimeFilterKind>,
    selected_year: &UseStateHandle<i32>,
    selected_month: &UseStateHandle<u32>,
    last_months: &UseStateHandle<u32>,
) -> Html {
    let radio = |kind: TimeFilterKind, id: &'static str, label: &'static str| {
        let time_filter = time_filter.clone();
        let checked = *time_filter == kind;
        let onchange = Callback::from(move |_| time_filter.set(kind));
        html! {
            <div class="flex items-center gap-2">
                <input type="radio" id={id} name="timeFilter" checked={checked} onchange={onchange} class="text-cyan-600" />
                <label for={id} class="text-sm">{ label }</label>
            </div>
        }
    };

    let year_select = {
        let selected_year = selected_year.clone();
        let current = dates::current_year();
        let onchange = {
            let selected_year = selected_year.clone();
            Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                if let Ok(year) = select.value().parse() {
                    selected_year.set(year);
                }
            })
        };
        html! {
            <select value={selected_year.to_string()} onchange={onchange} class="px-2 py-1 bg-gray-700 rounded text-sm">
                { for (0..5).map(|i| {
                    let year = current - i;
                    html! { <option key={year} value={year.to_string()} selected={*selected_year == year}>{ year }</option> }
                }) }
            </select>
        }
    };

    let month_select = {
        let selected_month = selected_month.clone();
        let onchange = {
            let selected_month = selected_month.clone();
            Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                if let Ok(month) = select.value().parse() {
                    selected_month.set(month);
                }
            })
        };
        html! {
            <select value={selected_month.to_string()} onchange={onchange} class="px-2 py-1 bg-gray-700 rounded text-sm">
                { for (1..=12u32).map(|month| html! {
                    <option key={month} value={month.to_string()} selected={*selected_month == month}>{ dates::month_name(month) }</option>
                }) }
            </select>
        }
    };

    let months_select = {
        let last_months = last_months.clone();
        let onchange = {
            let last_months = last_months.clone();
            Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                if let Ok(months) = select.value().parse() {
                    last_months.set(months);
                }
            })
        };
        html! {
            <select value={last_months.to_string()} onchange={onchange} class="px-2 py-1 bg-gray-700 rounded text-sm">
                { for [3u32, 6, 12].iter().map(|months| html! {
                    <option key={*months} value={months.to_string()} selected={*last_months == *months}>{ format!("Last {} months", months) }</option>
                }) }
            </select>
        }
    };

    html! {
        <div class="mb-4 bg-gray-800 p-4 rounded-lg">
            <div class="flex flex-wrap gap-6 mb-3">
                { radio(TimeFilterKind::CurrentYear, "current-year", "Current Year") }
                { radio(TimeFilterKind::Year, "year", "Year") }
                { radio(TimeFilterKind::Month, "month", "Month") }
                { radio(TimeFilterKind::Months, "months", "Last N Months") }
            </div>
            <div class="flex flex-wrap gap-4">
                {
                    match **time_filter {
                        TimeFilterKind::Year => year_select,
                        TimeFilterKind::Month => html! {
                            <div class="flex gap-2">
                                { year_select.clone() }
                                { month_select }
                            </div>
                        },
                        TimeFilterKind::Months => months_select,
                        TimeFilterKind::CurrentYear => html! {},
                    }
                }
            </div>
        </div>
    }
}

fn render_summary_tab(summary_stats: &UseStateHandle<Option<UserSummaryStats>>) -> Html {
    let Some(stats) = &**summary_stats else {
        return html! {
            <div class="text-center py-12 bg-gray-800 rounded-lg">
                <p class="text-gray-400 mb-2">{"No summary data available"}</p>
                <p class="text-sm text-gray-500">{"Upload some receipts to see your statistics"}</p>
            </div>
        };
    };
    html! {
        <div class="space-y-6">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <div class="bg-gray-800 p-6 rounded-lg">
                    <h3 class="text-lg font-semibold mb-2">{"Total Spent"}</h3>
                    <p class="text-3xl font-bold text-green-400">{ format_amount(stats.total_spent) }</p>
                </div>
                <div class="bg-gray-800 p-6 rounded-lg">
                    <h3 class="text-lg font-semibold mb-2">{"Unique Items"}</h3>
                    <p class="text-3xl font-bold text-cyan-400">{ stats.total_unique_items }</p>
                </div>
                <div class="bg-gray-800 p-6 rounded-lg">
                    <h3 class="text-lg font-semibold mb-2">{"Avg per Item"}</h3>
                    <p class="text-3xl font-bold text-yellow-400">{ format_amount(stats.avg_spent_per_item) }</p>
                </div>
            </div>

            <div class="bg-gray-800 rounded-lg p-6">
                <h3 class="text-xl font-semibold mb-4">{"Top 5 Items"}</h3>
                <div class="space-y-3">
                    { for stats.top_items.iter().map(|item| html! {
                        <div class="flex justify-between items-center p-3 bg-gray-700 rounded">
                            <div>
                                <p class="font-semibold">{ item.short_label.clone() }</p>
                                <p class="text-sm text-gray-400">{ format!("{} purchases", item.purchase_count) }</p>
                            </div>
                            <p class="text-lg font-bold text-green-400">{ format_amount(item.total_spent) }</p>
                        </div>
                    }) }
                </div>
            </div>
        </div>
    }
}

#[allow(clippy::too_many_arguments)]
fn render_items_tab(
    history: &UseStateHandle<PageHistory<UserItemStats>>,
    known_categories: &UseStateHandle<Vec<String>>,
    category_filter: &UseStateHandle<Option<String>>,
    loading: bool,
    on_prev_page: &Callback<MouseEvent>,
    on_next_page: &Callback<MouseEvent>,
    go_to_page: &Callback<usize>,
) -> Html {
    let category_select = {
        let category_filter = category_filter.clone();
        let onchange = {
            let category_filter = category_filter.clone();
            Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                let value = select.value();
                category_filter.set(if value == "all" { None } else { Some(value) });
            })
        };
        html! {
            <select onchange={onchange} disabled={loading} class="px-2 py-1 bg-gray-700 rounded text-sm">
                <option value="all" selected={category_filter.is_none()}>{"All categories"}</option>
                { for known_categories.iter().map(|category| html! {
                    <option
                        key={category.clone()}
                        value={category.clone()}
                        selected={category_filter.as_deref() == Some(category.as_str())}
                    >
                        { category.clone() }
                    </option>
                }) }
            </select>
        }
    };

    if history.is_empty() {
        if loading {
            return html! {
                <div class="text-center py-8 bg-gray-800 rounded-lg">
                    <p class="text-gray-400">{"Loading items..."}</p>
                </div>
            };
        }
        return html! {
            <div class="text-center py-12 bg-gray-800 rounded-lg">
                <p class="text-gray-400 mb-2">{"No item data available"}</p>
                <p class="text-sm text-gray-500">{"Upload some receipts to see your item statistics"}</p>
            </div>
        };
    }

    let loaded_total: f64 = history.iter_loaded().map(|item| item.total_spent).sum();
    let page_items = history.current_items().to_vec();
    let has_more_suffix = if history.has_more() { "+" } else { "" };

    html! {
        <div class="bg-gray-800 rounded-lg overflow-hidden">
            <div class="p-4 border-b border-gray-700 flex items-center justify-between">
                <h3 class="text-xl font-semibold">{ format!("Items ({}{})", history.loaded_len(), has_more_suffix) }</h3>
                { category_select }
            </div>
            <div class="overflow-x-auto">
                <table class="w-full">
                    <thead class="bg-gray-700">
                        <tr>
                            <th class="p-4 text-left">{"Item Name"}</th>
                            <th class="p-4 text-right">{"Total Spent"}</th>
                            <th class="p-4 text-right">{"% of Total"}</th>
                            <th class="p-4 text-right">{"Purchases"}</th>
                            <th class="p-4 text-right">{"Avg Cost"}</th>
                            <th class="p-4 text-right">{"Last Purchase"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for page_items.iter().map(|item| {
                            let percentage = if loaded_total > 0.0 {
                                item.total_spent / loaded_total * 100.0
                            } else {
                                0.0
                            };
                            html! {
                                <tr key={item.item_name.clone()} class="border-b border-gray-700 hover:bg-gray-700/50">
                                    <td class="p-4">
                                        <div class="flex items-center gap-2">
                                            <span class="font-semibold">{ item.short_label.clone() }</span>
                                            <span class="px-2 py-1 bg-cyan-600 text-xs rounded-full">{ item.category.clone() }</span>
                                        </div>
                                    </td>
                                    <td class="p-4 text-right font-mono text-green-400">{ format_amount(item.total_spent) }</td>
                                    <td class="p-4 text-right font-mono text-cyan-400">{ format!("{:.1}%", percentage) }</td>
                                    <td class="p-4 text-right font-mono">{ item.purchase_count }</td>
                                    <td class="p-4 text-right font-mono">{ format_amount(item.avg_cost) }</td>
                                    <td class="p-4 text-right text-sm text-gray-400">{ item.last_purchase.clone() }</td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            </div>
            <div class="p-4 border-t border-gray-700 flex items-center justify-center gap-2">
                <button
                    onclick={on_prev_page.clone()}
                    disabled={loading || !history.has_prev()}
                    class="px-3 py-2 bg-gray-700 hover:bg-gray-600 disabled:bg-gray-600/40 rounded transition-colors"
                >
                    {"‹ Prev"}
                </button>
                { for (1..=history.page_count()).map(|number| {
                    let go_to_page = go_to_page.clone();
                    let onclick = Callback::from(move |_| go_to_page.emit(number));
                    let class = if number == history.page_number() {
                        "px-3 py-2 bg-cyan-600 rounded"
                    } else {
                        "px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded transition-colors"
                    };
                    html! {
                        <button key={number} onclick={onclick} disabled={loading} class={class}>
                            { number }
                        </button>
                    }
                }) }
                <button
                    onclick={on_next_page.clone()}
                    disabled={loading || !history.has_more()}
                    class="px-3 py-2 bg-cyan-600 hover:bg-cyan-700 disabled:bg-gray-600/40 rounded transition-colors"
                >
                    { if loading { "Loading..." } else { "Next ›" } }
                </button>
            </div>
        </div>
    }
}

fn render_categories_tab(category_stats: &UseStateHandle<Option<UserCategoryStats>>) -> Html {
    let Some(stats) = &**category_stats else {
        return html! {
            <div class="text-center py-12 bg-gray-800 rounded-lg">
                <p class="text-gray-400 mb-2">{"No category data available"}</p>
                <p class="text-sm text-gray-500">{"Upload some receipts to see your category statistics"}</p>
            </div>
        };
    };
    if stats.categories.is_empty() {
        return html! {
            <div class="text-center py-12 bg-gray-800 rounded-lg">
                <p class="text-gray-400 mb-2">{"No category data available"}</p>
                <p class="text-sm text-gray-500">{"Upload some receipts to see your category statistics"}</p>
            </div>
        };
    }
    html! {
        <div class="space-y-4">
            <div class="bg-gray-800 p-4 rounded-lg mb-4">
                <h3 class="text-lg font-semibold mb-2">
                    {"Total Spent: "}
                    <span class="text-green-400">{ format_amount(stats.total_spent) }</span>
                </h3>
            </div>
            { for stats.categories.iter().map(|category| html! {
                <div key={category.category.clone()} class="bg-gray-800 rounded-lg p-6">
                    <div class="flex justify-between items-center mb-4">
                        <h3 class="text-xl font-semibold text-cyan-400">{ category.category.clone() }</h3>
                        <div class="text-right">
                            <p class="text-2xl font-bold text-green-400">{ format_amount(category.total_spent) }</p>
                            <p class="text-sm text-gray-400">
                                { format!("{} items • Avg {}", category.item_count, format_amount(category.avg_spent_per_item)) }
                            </p>
                        </div>
                    </div>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                        { for category.top_items.iter().map(|item| html! {
                            <div class="bg-gray-700 p-3 rounded flex justify-between items-center">
                                <span class="font-medium">{ item.short_label.clone() }</span>
                                <span class="text-green-400 font-mono">{ format_amount(item.total_spent) }</span>
                            </div>
                        }) }
                    </div>
                </div>
            }) }
        </div>
    }
}

fn render_global_tab(
    global_stats: &UseStateHandle<Option<GlobalItemStats>>,
    global_item_name: &UseStateHandle<String>,
    loading: bool,
    fetch_global: &Callback<()>,
) -> Html {
    let on_input = {
        let global_item_name = global_item_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            global_item_name.set(input.value());
        })
    };

    let on_search = {
        let fetch_global = fetch_global.clone();
        Callback::from(move |_: MouseEvent| fetch_global.emit(()))
    };

    let on_keypress = {
        let fetch_global = fetch_global.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                fetch_global.emit(());
            }
        })
    };

    html! {
        <div class="space-y-6">
            <div class="bg-gray-800 p-6 rounded-lg">
                <h3 class="text-xl font-semibold mb-4">{"Global Item Statistics"}</h3>
                <div class="flex gap-2 mb-4">
                    <input
                        type="text"
                        value={(**global_item_name).clone()}
                        oninput={on_input}
                        onkeypress={on_keypress}
                        placeholder="Enter item name..."
                        class="flex-1 px-3 py-2 bg-gray-700 rounded border border-gray-600 focus:border-cyan-400 focus:outline-none"
                    />
                    <button
                        onclick={on_search}
                        disabled={global_item_name.trim().is_empty() || loading}
                        class="px-4 py-2 bg-cyan-600 hover:bg-cyan-700 disabled:bg-gray-600 rounded transition-colors"
                    >
                        {"Search"}
                    </button>
                </div>
            </div>

            {
                if let Some(stats) = &**global_stats {
                    html! {
                        <div class="bg-gray-800 p-6 rounded-lg">
                            <h4 class="text-lg font-semibold mb-4">{ format!("Results for \"{}\"", stats.item_name) }</h4>
                            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                                <div class="bg-gray-700 p-4 rounded">
                                    <p class="text-sm text-gray-400">{"Total Spent (All Users)"}</p>
                                    <p class="text-2xl font-bold text-green-400">{ format_amount(stats.total_spent) }</p>
                                </div>
                                <div class="bg-gray-700 p-4 rounded">
                                    <p class="text-sm text-gray-400">{"Total Purchases"}</p>
                                    <p class="text-2xl font-bold text-cyan-400">{ stats.total_purchases }</p>
                                </div>
                                <div class="bg-gray-700 p-4 rounded">
                                    <p class="text-sm text-gray-400">{"Average Cost"}</p>
                                    <p class="text-2xl font-bold text-yellow-400">{ format_amount(stats.avg_cost) }</p>
                                </div>
                            </div>
                            <p class="text-sm text-gray-400 mt-4">
                                { format!("Last updated: {}", stats.last_updated) }
                            </p>
                        </div>
                    }
                } else if !global_item_name.is_empty() {
                    html! {
                        <div class="text-center py-8 bg-gray-800 rounded-lg">
                            <p class="text-gray-400 mb-2">{"No results found"}</p>
                            <p class="text-sm text-gray-500">
                                { format!("Item \"{}\" not found in the global database", &**global_item_name) }
                            </p>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
