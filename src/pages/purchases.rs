use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::components::{AuthBar, AuthGate};
use crate::config;
use crate::dates;
use crate::types::{amount_class, format_amount, Item, Purchase, WeeklyPurchases};
use crate::Route;

#[derive(Clone, PartialEq, Deserialize)]
pub struct PurchasesQuery {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Clone, PartialEq)]
enum PendingDelete {
    Item { item_id: String, label: String },
    Receipt {
        receipt_id: String,
        date: String,
        label: String,
    },
}

impl PendingDelete {
    fn message(&self) -> String {
        match self {
            PendingDelete::Item { label, .. } => {
                format!("Delete item \"{}\"? This cannot be undone.", label)
            }
            PendingDelete::Receipt { label, .. } => {
                format!("Delete the receipt from {}? All of its items go with it.", label)
            }
        }
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[function_component(PurchasesPage)]
pub fn purchases_page() -> Html {
    html! {
        <AuthGate
            title="Authentication Required"
            message="Please sign in to view your weekly purchases."
        >
            <PurchasesView />
        </AuthGate>
    }
}

#[function_component(PurchasesView)]
fn purchases_view() -> Html {
    let api = use_context::<ApiClient>();
    let location = use_location();

    let query_date = location
        .as_ref()
        .and_then(|loc| loc.query::<PurchasesQuery>().ok())
        .and_then(|q| q.date);

    let selected_date = use_state(|| query_date.clone().unwrap_or_else(dates::today_iso));
    let data = use_state(|| None::<WeeklyPurchases>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    // item edit and receipt-date edit are mutually exclusive toggles
    let editing_item_id = use_state(|| None::<String>);
    let edit_name = use_state(String::new);
    let edit_cost = use_state(String::new);
    let editing_receipt_id = use_state(|| None::<String>);
    let new_receipt_date = use_state(String::new);
    let confirming_delete = use_state(|| None::<PendingDelete>);

    // `use_fixtures()` is a plain config check, but its `use_` prefix trips
    // Yew's hook lint inside closures; read it once here at the component's
    // top level (a valid position) and capture the constant result below.
    let fixtures_mode = config::use_fixtures();

    // deep links and back/forward navigation re-key the fetch
    {
        let selected_date = selected_date.clone();
        use_effect_with_deps(
            move |date: &Option<String>| {
                if let Some(date) = date {
                    if *date != *selected_date {
                        selected_date.set(date.clone());
                    }
                }
                || ()
            },
            query_date,
        );
    }

    let fetch_data = {
        let api = api.clone();
        let data = data.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |date: String| {
            let Some(api) = api.clone() else { return };
            let data = data.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api.get_purchases(&date).await {
                    Ok(week) => data.set(Some(week)),
                    Err(err) => {
                        data.set(None);
                        error.set(Some(err.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch_data = fetch_data.clone();
        use_effect_with_deps(
            move |date: &String| {
                fetch_data.emit(date.clone());
                || ()
            },
            (*selected_date).clone(),
        );
    }

    let shift_week = |offset: i64| {
        let selected_date = selected_date.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(next) = dates::shift_days(&selected_date, offset) {
                selected_date.set(next);
            }
        })
    };

    let on_date_input = {
        let selected_date = selected_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            if !value.is_empty() {
                selected_date.set(value);
            }
        })
    };

    // --- item editing ---

    let on_item_edit_cancel = {
        let editing_item_id = editing_item_id.clone();
        Callback::from(move |_| editing_item_id.set(None))
    };

    let on_item_save = {
        let api = api.clone();
        let data = data.clone();
        let editing_item_id = editing_item_id.clone();
        let edit_name = edit_name.clone();
        let edit_cost = edit_cost.clone();
        let fetch_data = fetch_data.clone();
        let selected_date = selected_date.clone();
        Callback::from(move |_| {
            let Some(item_id) = (*editing_item_id).clone() else {
                return;
            };
            let name = edit_name.trim().to_string();
            if name.is_empty() {
                alert("Please enter an item name.");
                return;
            }
            let Ok(cost) = edit_cost.trim().parse::<f64>() else {
                alert("Please enter a valid cost.");
                return;
            };

            if let Some(mut week) = (*data).clone() {
                if week.apply_item_edit(&item_id, &name, cost) {
                    data.set(Some(week));
                }
            }
            editing_item_id.set(None);

            let Some(api) = api.clone() else { return };
            let fetch_data = fetch_data.clone();
            let date = (*selected_date).clone();
            spawn_local(async move {
                if let Err(err) = api.update_item(&item_id, &name, cost).await {
                    alert(&err.to_string());
                }
                // live mode always refetches so server truth wins
                if !fixtures_mode {
                    fetch_data.emit(date);
                }
            });
        })
    };

    // --- receipt date editing ---

    let on_receipt_date_cancel = {
        let editing_receipt_id = editing_receipt_id.clone();
        Callback::from(move |_| editing_receipt_id.set(None))
    };

    let on_receipt_date_save = {
        let api = api.clone();
        let editing_receipt_id = editing_receipt_id.clone();
        let new_receipt_date = new_receipt_date.clone();
        let fetch_data = fetch_data.clone();
        let selected_date = selected_date.clone();
        Callback::from(move |_| {
            let Some(receipt_id) = (*editing_receipt_id).clone() else {
                return;
            };
            let date_value = (*new_receipt_date).clone();
            if dates::parse_iso(&date_value).is_none() {
                alert("Please pick a valid date.");
                return;
            }
            editing_receipt_id.set(None);

            let Some(api) = api.clone() else { return };
            let fetch_data = fetch_data.clone();
            let current = (*selected_date).clone();
            spawn_local(async move {
                if let Err(err) = api.update_receipt_date(&receipt_id, &date_value).await {
                    alert(&err.to_string());
                }
                if !fixtures_mode {
                    fetch_data.emit(current);
                }
            });
        })
    };

    // --- deletion with confirmation ---

    let on_delete_cancel = {
        let confirming_delete = confirming_delete.clone();
        Callback::from(move |_| confirming_delete.set(None))
    };

    let on_delete_confirm = {
        let api = api.clone();
        let data = data.clone();
        let confirming_delete = confirming_delete.clone();
        let fetch_data = fetch_data.clone();
        let selected_date = selected_date.clone();
        Callback::from(move |_| {
            let Some(pending) = (*confirming_delete).clone() else {
                return;
            };
            confirming_delete.set(None);
            let Some(api) = api.clone() else { return };
            let fetch_data = fetch_data.clone();
            let current = (*selected_date).clone();

            match pending {
                PendingDelete::Item { item_id, .. } => {
                    if let Some(mut week) = (*data).clone() {
                        if week.remove_item(&item_id) {
                            data.set(Some(week));
                        }
                    }
                    spawn_local(async move {
                        if let Err(err) = api.delete_item(&item_id).await {
                            alert(&err.to_string());
                        }
                        if !fixtures_mode {
                            fetch_data.emit(current);
                        }
                    });
                }
                PendingDelete::Receipt {
                    receipt_id, date, ..
                } => {
                    if let Some(mut week) = (*data).clone() {
                        if week.remove_receipt(&receipt_id) {
                            data.set(Some(week));
                        }
                    }
                    spawn_local(async move {
                        if let Err(err) =
                            api.delete_receipt(&receipt_id, Some(date.as_str())).await
                        {
                            alert(&err.to_string());
                        }
                        if !fixtures_mode {
                            fetch_data.emit(current);
                        }
                    });
                }
            }
        })
    };

    html! {
        <div class="bg-gray-900 min-h-screen text-white p-4 md:p-8">
            <div class="max-w-4xl mx-auto">
                <div class="flex justify-between items-center mb-6">
                    <h1 class="text-3xl font-bold text-cyan-400">{"Weekly Purchases"}</h1>
                    <div class="flex items-center gap-2">
                        <Link<Route> to={Route::Summary} classes="text-sm bg-gray-700 hover:bg-gray-600 px-3 py-2 rounded-md transition-colors">{"Summary"}</Link<Route>>
                        <Link<Route> to={Route::Stats} classes="text-sm bg-gray-700 hover:bg-gray-600 px-3 py-2 rounded-md transition-colors">{"Stats"}</Link<Route>>
                        <Link<Route> to={Route::Upload} classes="text-sm bg-gray-700 hover:bg-gray-600 px-3 py-2 rounded-md transition-colors">{"Upload New"}</Link<Route>>
                        <AuthBar />
                    </div>
                </div>

                <div class="flex items-center justify-center gap-4 mb-6 p-4 bg-gray-800 rounded-lg">
                    <button onclick={shift_week(-7)} disabled={*loading} class="px-4 py-2 bg-gray-700 rounded hover:bg-gray-600 disabled:opacity-50">{"‹ Prev"}</button>
                    <input
                        type="date"
                        value={(*selected_date).clone()}
                        onchange={on_date_input}
                        class="bg-gray-700 border border-gray-600 rounded-md px-3 py-2 focus:ring-cyan-500 focus:border-cyan-500"
                    />
                    <button onclick={shift_week(7)} disabled={*loading} class="px-4 py-2 bg-gray-700 rounded hover:bg-gray-600 disabled:opacity-50">{"Next ›"}</button>
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
                    if let Some(week) = &*data {
                        render_week(
                            week,
                            &editing_item_id,
                            &edit_name,
                            &edit_cost,
                            &editing_receipt_id,
                            &new_receipt_date,
                            &confirming_delete,
                            &on_item_save,
                            &on_item_edit_cancel,
                            &on_receipt_date_save,
                            &on_receipt_date_cancel,
                        )
                    } else {
                        html! {}
                    }
                }

                {
                    if let Some(pending) = &*confirming_delete {
                        html! {
                            <div class="fixed inset-0 bg-black/60 flex items-center justify-center z-50">
                                <div class="bg-gray-800 rounded-lg p-6 max-w-sm mx-4 space-y-4">
                                    <p class="text-sm">{ pending.message() }</p>
                                    <div class="flex justify-end gap-2">
                                        <button onclick={on_delete_cancel.clone()} class="bg-gray-600 hover:bg-gray-500 px-3 py-1.5 rounded text-sm">{"Cancel"}</button>
                                        <button onclick={on_delete_confirm.clone()} class="bg-red-600 hover:bg-red-700 px-3 py-1.5 rounded text-sm">{"Delete"}</button>
                                    </div>
                                </div>
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

#[allow(clippy::too_many_arguments)]
fn render_week(
    week: &WeeklyPurchases,
    editing_item_id: &UseStateHandle<Option<String>>,
    edit_name: &UseStateHandle<String>,
    edit_cost: &UseStateHandle<String>,
    editing_receipt_id: &UseStateHandle<Option<String>>,
    new_receipt_date: &UseStateHandle<String>,
    confirming_delete: &UseStateHandle<Option<PendingDelete>>,
    on_item_save: &Callback<MouseEvent>,
    on_item_edit_cancel: &Callback<MouseEvent>,
    on_receipt_date_save: &Callback<MouseEvent>,
    on_receipt_date_cancel: &Callback<MouseEvent>,
) -> Html {
    html! {
        <div>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4 mb-6 text-center">
                <div class="bg-gray-800 p-4 rounded-lg">
                    <p class="text-sm text-gray-400">{"Week"}</p>
                    <p class="text-lg font-semibold">{ format!("{} to {}", week.week_start, week.week_end) }</p>
                </div>
                <div class="bg-gray-800 p-4 rounded-lg">
                    <p class="text-sm text-gray-400">{"Total Spent"}</p>
                    <p class={classes!("text-lg", "font-semibold", amount_class(week.total_amount))}>{ format_amount(week.total_amount) }</p>
                </div>
                <div class="bg-gray-800 p-4 rounded-lg">
                    <p class="text-sm text-gray-400">{"Active Days"}</p>
                    <p class="text-lg font-semibold">{ format!("{} / {}", week.days_with_purchases, week.total_days) }</p>
                </div>
                <div class="bg-gray-800 p-4 rounded-lg">
                    <p class="text-sm text-gray-400">{"Total Receipts"}</p>
                    <p class="text-lg font-semibold">{ week.receipt_count() }</p>
                </div>
            </div>

            <div class="space-y-4">
                { for week.purchases.iter().map(|(date, daily)| html! {
                    <div key={date.clone()}>
                        <h3 class="font-bold text-gray-300 mb-2">{ dates::friendly_day_heading(date) }</h3>
                        {
                            if daily.is_empty() {
                                html! { <p class="text-sm text-gray-500 italic">{"No purchases on this day."}</p> }
                            } else {
                                html! {
                                    <div class="space-y-3">
                                        { for daily.iter().map(|purchase| render_receipt(
                                            date,
                                            purchase,
                                            editing_item_id,
                                            edit_name,
                                            edit_cost,
                                            editing_receipt_id,
                                            new_receipt_date,
                                            confirming_delete,
                                            on_item_save,
                                            on_item_edit_cancel,
                                            on_receipt_date_save,
                                            on_receipt_date_cancel,
                                        )) }
                                    </div>
                                }
                            }
                        }
                    </div>
                }) }
            </div>
        </div>
    }
}

#[allow(clippy::too_many_arguments)]
fn render_receipt(
    date: &str,
    purchase: &Purchase,
    editing_item_id: &UseStateHandle<Option<String>>,
    edit_name: &UseStateHandle<String>,
    edit_cost: &UseStateHandle<String>,
    editing_receipt_id: &UseStateHandle<Option<String>>,
    new_receipt_date: &UseStateHandle<String>,
    confirming_delete: &UseStateHandle<Option<PendingDelete>>,
    on_item_save: &Callback<MouseEvent>,
    on_item_edit_cancel: &Callback<MouseEvent>,
    on_receipt_date_save: &Callback<MouseEvent>,
    on_receipt_date_cancel: &Callback<MouseEvent>,
) -> Html {
    if editing_receipt_id.as_ref() == Some(&purchase.receipt_id) {
        let on_new_date_input = {
            let new_receipt_date = new_receipt_date.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                new_receipt_date.set(input.value());
            })
        };
        return html! {
            <div key={purchase.receipt_id.clone()} class="bg-gray-700 rounded-lg p-4 flex flex-col sm:flex-row justify-between items-center gap-4">
                <span class="font-semibold">{"Editing date for: "}<strong>{ purchase.merchant.clone() }</strong></span>
                <div class="flex items-center gap-2">
                    <input
                        type="date"
                        value={(**new_receipt_date).clone()}
                        onchange={on_new_date_input}
                        class="bg-gray-800 border border-gray-600 rounded-md px-3 py-1.5 focus:ring-cyan-500 focus:border-cyan-500"
                    />
                    <button onclick={on_receipt_date_save.clone()} class="bg-green-600 hover:bg-green-700 px-3 py-1.5 rounded text-xs">{"Save"}</button>
                    <button onclick={on_receipt_date_cancel.clone()} class="bg-gray-600 hover:bg-gray-500 px-3 py-1.5 rounded text-xs">{"Cancel"}</button>
                </div>
            </div>
        };
    }

    let on_edit_date_click = {
        let editing_receipt_id = editing_receipt_id.clone();
        let editing_item_id = editing_item_id.clone();
        let new_receipt_date = new_receipt_date.clone();
        let receipt_id = purchase.receipt_id.clone();
        let date = date.to_string();
        Callback::from(move |_| {
            editing_item_id.set(None);
            new_receipt_date.set(date.clone());
            editing_receipt_id.set(Some(receipt_id.clone()));
        })
    };

    let on_delete_receipt_click = {
        let confirming_delete = confirming_delete.clone();
        let receipt_id = purchase.receipt_id.clone();
        let date = date.to_string();
        let label = purchase.merchant.clone();
        Callback::from(move |_| {
            confirming_delete.set(Some(PendingDelete::Receipt {
                receipt_id: receipt_id.clone(),
                date: date.clone(),
                label: label.clone(),
            }));
        })
    };

    html! {
        <details key={purchase.receipt_id.clone()} class="bg-gray-800 rounded-lg p-4">
            <summary class="cursor-pointer flex justify-between items-center font-semibold">
                <div class="flex items-center gap-3">
                    <span>{ purchase.merchant.clone() }</span>
                    <button onclick={on_edit_date_click} class="text-xs text-cyan-400 hover:text-cyan-300 font-normal">{"Edit Date"}</button>
                    <button onclick={on_delete_receipt_click} class="text-xs text-red-400 hover:text-red-300 font-normal">{"Delete"}</button>
                </div>
                <span class={amount_class(purchase.total)}>{ format_amount(purchase.total) }</span>
            </summary>
            <ul class="mt-3 pt-3 border-t border-gray-700 text-sm text-gray-300 space-y-2">
                { for purchase.items.iter().map(|item| render_item(
                    item,
                    editing_item_id,
                    edit_name,
                    edit_cost,
                    editing_receipt_id,
                    confirming_delete,
                    on_item_save,
                    on_item_edit_cancel,
                )) }
            </ul>
        </details>
    }
}

#[allow(clippy::too_many_arguments)]
fn render_item(
    item: &Item,
    editing_item_id: &UseStateHandle<Option<String>>,
    edit_name: &UseStateHandle<String>,
    edit_cost: &UseStateHandle<String>,
    editing_receipt_id: &UseStateHandle<Option<String>>,
    confirming_delete: &UseStateHandle<Option<PendingDelete>>,
    on_item_save: &Callback<MouseEvent>,
    on_item_edit_cancel: &Callback<MouseEvent>,
) -> Html {
    if editing_item_id.as_ref() == Some(&item.item_id) {
        let on_name_input = {
            let edit_name = edit_name.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                edit_name.set(input.value());
            })
        };
        let on_cost_input = {
            let edit_cost = edit_cost.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                edit_cost.set(input.value());
            })
        };
        return html! {
            <li key={item.item_id.clone()} class="flex justify-between items-center">
                <div class="w-full flex items-center gap-2">
                    <input type="text" value={(**edit_name).clone()} oninput={on_name_input} class="bg-gray-900 rounded px-2 py-1 w-full" />
                    <input type="number" step="0.01" value={(**edit_cost).clone()} oninput={on_cost_input} class="bg-gray-900 rounded px-2 py-1 w-24 text-right" />
                    <button onclick={on_item_save.clone()} class="bg-green-600 hover:bg-green-700 px-2 py-1 rounded text-xs">{"Save"}</button>
                    <button onclick={on_item_edit_cancel.clone()} class="bg-gray-600 hover:bg-gray-700 px-2 py-1 rounded text-xs">{"Cancel"}</button>
                </div>
            </li>
        };
    }

    let on_edit_click = {
        let editing_item_id = editing_item_id.clone();
        let editing_receipt_id = editing_receipt_id.clone();
        let edit_name = edit_name.clone();
        let edit_cost = edit_cost.clone();
        let item = item.clone();
        Callback::from(move |_| {
            editing_receipt_id.set(None);
            edit_name.set(item.item_name.clone());
            edit_cost.set(item.item_cost.to_string());
            editing_item_id.set(Some(item.item_id.clone()));
        })
    };

    let on_delete_click = {
        let confirming_delete = confirming_delete.clone();
        let item_id = item.item_id.clone();
        let label = item.item_name.clone();
        Callback::from(move |_| {
            confirming_delete.set(Some(PendingDelete::Item {
                item_id: item_id.clone(),
                label: label.clone(),
            }));
        })
    };

    html! {
        <li key={item.item_id.clone()} class="flex justify-between items-center">
            <span class="truncate pr-2">{ item.item_name.clone() }</span>
            <div class="flex items-center gap-3">
                <span class={amount_class(item.item_cost)}>{ format_amount(item.item_cost) }</span>
                <button onclick={on_edit_click} class="text-xs text-cyan-400 hover:text-cyan-300">{"Edit"}</button>
                <button onclick={on_delete_click} class="text-xs text-red-400 hover:text-red-300">{"Delete"}</button>
            </div>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_parameter_round_trip() {
        let query: PurchasesQuery =
            serde_urlencoded::from_str("date=2025-11-01").expect("query parses");
        assert_eq!(query.date.as_deref(), Some("2025-11-01"));

        let empty: PurchasesQuery = serde_urlencoded::from_str("").expect("empty parses");
        assert_eq!(empty.date, None);
    }

    #[test]
    fn delete_prompts_name_their_target() {
        let pending = PendingDelete::Item {
            item_id: "i-1".to_string(),
            label: "Fresh Produce".to_string(),
        };
        assert!(pending.message().contains("Fresh Produce"));

        let pending = PendingDelete::Receipt {
            receipt_id: "r-1".to_string(),
            date: "2025-11-01".to_string(),
            label: "Weekend Store".to_string(),
        };
        assert!(pending.message().contains("Weekend Store"));
    }
}
