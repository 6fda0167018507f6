use yew::prelude::*;

use crate::auth::{current_path_and_query, use_auth, AuthStatus, Session};
use crate::components::auth_required::GoogleSignInButton;

/// Compact account widget for page headers: greeting plus sign-out when
/// signed in, the sign-in button otherwise.
#[function_component(AuthBar)]
pub fn auth_bar() -> Html {
    let session = use_context::<Session>();
    let status = use_auth();

    let user_name = session
        .as_ref()
        .and_then(|s| s.user_display_name())
        .unwrap_or_else(|| "User".to_string());

    let on_sign_out = {
        let session = session.clone();
        Callback::from(move |_| {
            if let Some(session) = &session {
                session.sign_out();
            }
        })
    };

    let on_sign_in = {
        let session = session.clone();
        Callback::from(move |_| {
            if let Some(session) = &session {
                session.sign_in(&current_path_and_query());
            }
        })
    };

    match status {
        AuthStatus::Checking => html! { <div class="text-sm text-gray-400">{"Loading..."}</div> },
        AuthStatus::SignedIn => html! {
            <div class="flex flex-col items-center gap-1">
                <span class="text-sm text-gray-300">{ format!("Hi {}!", user_name) }</span>
                <button
                    onclick={on_sign_out}
                    class="text-xs text-gray-400 hover:text-gray-300 underline"
                >
                    {"Sign Out"}
                </button>
            </div>
        },
        AuthStatus::SignedOut => html! {
            <div class="flex justify-center">
                <GoogleSignInButton onclick={on_sign_in} />
            </div>
        },
    }
}
