use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, Url};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::components::icons::{icon_alert, icon_check, spinner};
use crate::components::AuthBar;
use crate::types::{format_amount, UploadResponse};
use crate::Route;

#[derive(Clone, Copy, PartialEq, Eq)]
enum UploadStatus {
    Idle,
    Uploading,
    Success,
    Error,
}

/// Receipt uploader. Intentionally reachable without signing in.
#[function_component(UploaderPage)]
pub fn uploader_page() -> Html {
    let api = use_context::<ApiClient>();

    let file = use_state(|| None::<web_sys::File>);
    let preview_url = use_state(|| None::<String>);
    let doc_type = use_state(|| "receipt".to_string());
    let custom_doc_type = use_state(String::new);
    let status = use_state(|| UploadStatus::Idle);
    let message = use_state(String::new);
    let details = use_state(|| None::<UploadResponse>);

    {
        let preview_url = preview_url.clone();
        use_effect_with_deps(
            move |file: &Option<web_sys::File>| {
                let url = file
                    .as_ref()
                    .and_then(|f| Url::create_object_url_with_blob(f).ok());
                preview_url.set(url.clone());
                move || {
                    if let Some(url) = url {
                        let _ = Url::revoke_object_url(&url);
                    }
                }
            },
            (*file).clone(),
        );
    }

    let on_file_change = {
        let file = file.clone();
        let status = status.clone();
        let message = message.clone();
        let details = details.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(picked) = input.files().and_then(|list| list.get(0)) {
                file.set(Some(picked));
                status.set(UploadStatus::Idle);
                message.set(String::new());
                details.set(None);
            }
        })
    };

    let on_doc_type_change = {
        let doc_type = doc_type.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            doc_type.set(select.value());
        })
    };

    let on_custom_input = {
        let custom_doc_type = custom_doc_type.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            custom_doc_type.set(input.value());
        })
    };

    let on_submit = {
        let api = api.clone();
        let file = file.clone();
        let doc_type = doc_type.clone();
        let custom_doc_type = custom_doc_type.clone();
        let status = status.clone();
        let message = message.clone();
        let details = details.clone();
        Callback::from(move |_| {
            // local validation failures never reach the transport
            let Some(picked) = (*file).clone() else {
                status.set(UploadStatus::Error);
                message.set("Please select a file to upload.".to_string());
                return;
            };
            let final_doc_type = if *doc_type == "other" {
                (*custom_doc_type).clone()
            } else {
                (*doc_type).clone()
            };
            if final_doc_type.trim().is_empty() {
                status.set(UploadStatus::Error);
                message.set("Please specify a document type.".to_string());
                return;
            }
            let Some(api) = api.clone() else {
                return;
            };

            status.set(UploadStatus::Uploading);
            message.set(String::new());
            details.set(None);

            let status = status.clone();
            let message = message.clone();
            let details = details.clone();
            spawn_local(async move {
                match api
                    .upload_document(picked, final_doc_type.trim())
                    .await
                {
                    Ok(result) => {
                        status.set(UploadStatus::Success);
                        details.set(Some(result));
                    }
                    Err(err) => {
                        status.set(UploadStatus::Error);
                        message.set(err.to_string());
                    }
                }
            });
        })
    };

    html! {
        <div class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white p-4">
            <div class="w-full max-w-md mx-auto flex justify-end mb-4">
                <AuthBar />
            </div>
            <div class="w-full max-w-md mx-auto bg-gray-800 rounded-xl shadow-lg p-6 md:p-8 space-y-6">
                <h1 class="text-2xl font-bold text-center text-cyan-400">{"Receipt Uploader"}</h1>
                <div class="space-y-6">
                    <div>
                        <label for="file-upload" class="cursor-pointer block w-full px-4 py-6 text-center bg-gray-700 border-2 border-dashed border-gray-600 rounded-lg hover:bg-gray-600 transition-colors">
                            {
                                if let Some(url) = &*preview_url {
                                    html! { <img src={url.clone()} alt="Preview" class="max-h-48 mx-auto rounded-md" /> }
                                } else {
                                    html! { <span class="text-gray-400">{"Tap to select or take a picture"}</span> }
                                }
                            }
                        </label>
                        <input
                            id="file-upload"
                            type="file"
                            accept="image/*"
                            capture="environment"
                            onchange={on_file_change}
                            class="sr-only"
                        />
                    </div>
                    <div>
                        <label for="docType" class="block text-sm font-medium text-gray-300 mb-2">{"Document Type"}</label>
                        <select
                            id="docType"
                            value={(*doc_type).clone()}
                            onchange={on_doc_type_change}
                            class="w-full bg-gray-700 border border-gray-600 rounded-md px-3 py-2 focus:ring-cyan-500 focus:border-cyan-500"
                        >
                            <option value="receipt">{"Receipt"}</option>
                            <option value="letter">{"Letter"}</option>
                            <option value="other">{"Other (Specify)"}</option>
                        </select>
                    </div>
                    {
                        if *doc_type == "other" {
                            html! {
                                <div>
                                    <input
                                        type="text"
                                        value={(*custom_doc_type).clone()}
                                        oninput={on_custom_input}
                                        placeholder="e.g., Invoice, ID Card..."
                                        class="w-full bg-gray-700 border border-gray-600 rounded-md px-3 py-2 focus:ring-cyan-500 focus:border-cyan-500"
                                    />
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <div>
                        <button
                            type="button"
                            onclick={on_submit}
                            disabled={*status == UploadStatus::Uploading}
                            class="w-full flex items-center justify-center bg-cyan-600 hover:bg-cyan-700 disabled:bg-gray-500 text-white font-bold py-3 px-4 rounded-md transition-colors"
                        >
                            { if *status == UploadStatus::Uploading { spinner() } else { html!{ "Upload Document" } } }
                        </button>
                    </div>
                </div>

                {
                    if *status == UploadStatus::Success {
                        if let Some(result) = &*details {
                            render_result(result)
                        } else {
                            html! {}
                        }
                    } else {
                        html! {}
                    }
                }

                {
                    if *status == UploadStatus::Error && !message.is_empty() {
                        html! {
                            <div class="flex items-center gap-3 p-3 rounded-md text-sm bg-red-900/50 text-red-300">
                                { icon_alert() }<span>{ (*message).clone() }</span>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>

            <div class="w-full max-w-md mx-auto mt-6">
                <Link<Route>
                    to={Route::Purchases}
                    classes="block w-full bg-green-600 hover:bg-green-700 text-white font-bold py-3 px-4 rounded-md text-center transition-colors"
                >
                    {"View Weekly Purchases"}
                </Link<Route>>
            </div>
        </div>
    }
}

fn render_result(result: &UploadResponse) -> Html {
    let total_cost = result.total_cost();
    html! {
        <div class="flex flex-col gap-3 p-4 rounded-md text-sm bg-green-900/50 text-green-300">
            <div class="flex items-center gap-3 font-bold">{ icon_check() }<span>{"Receipt Processed!"}</span></div>
            <div class="grid grid-cols-2 gap-x-4 gap-y-2 text-xs mt-2">
                <p><strong>{"Merchant:"}</strong></p>
                <p class="text-right">{ result.merchant.clone().unwrap_or_else(|| "N/A".to_string()) }</p>
                <p><strong>{"Date:"}</strong></p>
                <p class="text-right">{ result.purchase_date.clone().unwrap_or_else(|| "N/A".to_string()) }</p>
                {
                    if let Some(time) = &result.purchase_time {
                        html! {
                            <>
                                <p><strong>{"Time:"}</strong></p>
                                <p class="text-right">{ time.clone() }</p>
                            </>
                        }
                    } else {
                        html! {}
                    }
                }
                <p><strong>{"Total Items:"}</strong></p>
                <p class="text-right">{ result.total_items.map(|n| n.to_string()).unwrap_or_else(|| "N/A".to_string()) }</p>
                <p><strong>{"Total Cost:"}</strong></p>
                <p class="text-right font-bold text-green-400">{ format_amount(total_cost) }</p>
            </div>
            {
                if result.items.is_empty() {
                    html! {}
                } else {
                    html! {
                        <div class="border-t border-green-700/50 pt-3 mt-2">
                            <h4 class="font-semibold text-xs mb-2">{"Items Purchased:"}</h4>
                            <ul class="space-y-1 text-xs max-h-32 overflow-y-auto">
                                { for result.items.iter().map(|item| html! {
                                    <li class="flex justify-between">
                                        <span class="truncate pr-2">{ item.item_name.clone() }</span>
                                        <span>{ format_amount(item.item_cost) }</span>
                                    </li>
                                }) }
                            </ul>
                        </div>
                    }
                }
            }
        </div>
    }
}
