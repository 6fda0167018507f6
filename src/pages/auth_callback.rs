use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::auth::{redirect_to, Session};

#[derive(Clone, PartialEq, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
}

/// Lands after the hosted sign-in redirect: finishes the code exchange,
/// then sends the user back to wherever they originally asked for.
#[function_component(AuthCallbackPage)]
pub fn auth_callback_page() -> Html {
    let session = use_context::<Session>();
    let location = yew_router::prelude::use_location();

    let code = location
        .as_ref()
        .and_then(|loc| loc.query::<CallbackQuery>().ok())
        .and_then(|q| q.code);

    use_effect_with_deps(
        move |code: &Option<String>| {
            match (session, code.clone()) {
                (Some(session), Some(code)) => {
                    spawn_local(async move {
                        match session.complete_sign_in(&code).await {
                            Ok(()) => redirect_to(&Session::take_return_path()),
                            Err(err) => {
                                log::error!("sign-in could not be completed: {}", err);
                                redirect_to("/");
                            }
                        }
                    });
                }
                _ => {
                    log::error!("auth callback reached without a code");
                    redirect_to("/");
                }
            }
            || ()
        },
        code,
    );

    html! {
        <div class="bg-gray-900 min-h-screen text-white flex items-center justify-center">
            {"Processing authentication..."}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_query_parses_the_code() {
        let q: CallbackQuery =
            serde_urlencoded::from_str("code=abc123&state=xyz").expect("parses");
        assert_eq!(q.code.as_deref(), Some("abc123"));

        let q: CallbackQuery = serde_urlencoded::from_str("").expect("parses");
        assert_eq!(q.code, None);
    }
}
