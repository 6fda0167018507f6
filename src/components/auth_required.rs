use yew::prelude::*;

use crate::auth::{current_path_and_query, use_auth, AuthStatus, Session};
use crate::components::icons::icon_google;

#[derive(Properties, PartialEq)]
pub struct GoogleSignInButtonProps {
    pub onclick: Callback<MouseEvent>,
}

#[function_component(GoogleSignInButton)]
pub fn google_sign_in_button(props: &GoogleSignInButtonProps) -> Html {
    html! {
        <button
            onclick={props.onclick.clone()}
            class="flex items-center gap-3 bg-white text-gray-800 font-semibold px-5 py-2.5 rounded-md hover:bg-gray-100 transition-colors"
        >
            { icon_google() }
            <span>{"Sign in with Google"}</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthRequiredProps {
    pub title: AttrValue,
    pub message: AttrValue,
}

/// Sign-in prompt shown in place of a gated page. Remembers the path
/// the user actually asked for so the callback can send them back.
#[function_component(AuthRequired)]
pub fn auth_required(props: &AuthRequiredProps) -> Html {
    let session = use_context::<Session>();

    let on_sign_in = Callback::from(move |_| {
        if let Some(session) = &session {
            session.sign_in(&current_path_and_query());
        }
    });

    html! {
        <div class="bg-gray-900 min-h-screen text-white flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-2xl font-bold mb-4">{ props.title.clone() }</h1>
                <p class="mb-6">{ props.message.clone() }</p>
                <div class="flex justify-center">
                    <GoogleSignInButton onclick={on_sign_in} />
                </div>
            </div>
        </div>
    }
}

/// Full-screen placeholder while the session is still resolving.
pub fn checking_placeholder() -> Html {
    html! {
        <div class="bg-gray-900 min-h-screen text-white flex items-center justify-center">
            {"Loading..."}
        </div>
    }
}

/// Wraps a gated page: placeholder while checking, sign-in prompt when
/// signed out. Children mount only once the session resolves signed-in,
/// so no gated fetch can fire early.
#[derive(Properties, PartialEq)]
pub struct AuthGateProps {
    pub title: AttrValue,
    pub message: AttrValue,
    pub children: Children,
}

#[function_component(AuthGate)]
pub fn auth_gate(props: &AuthGateProps) -> Html {
    match use_auth() {
        AuthStatus::Checking => checking_placeholder(),
        AuthStatus::SignedOut => html! {
            <AuthRequired title={props.title.clone()} message={props.message.clone()} />
        },
        AuthStatus::SignedIn => html! { <>{ for props.children.iter() }</> },
    }
}
