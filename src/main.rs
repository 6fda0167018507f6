use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod auth;
mod components;
mod config;
mod dates;
mod pages;
mod pagination;
mod period;
mod types;

use api::{ApiClient, FixtureTransport, HttpTransport, Transport};
use auth::Session;
use pages::{AuthCallbackPage, PurchasesPage, StatsPage, SummaryPage, UploaderPage};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Upload,
    #[at("/purchases")]
    Purchases,
    #[at("/summary")]
    Summary,
    #[at("/stats")]
    Stats,
    #[at("/auth/callback")]
    AuthCallback,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Upload => html! { <UploaderPage /> },
        Route::Purchases => html! { <PurchasesPage /> },
        Route::Summary => html! { <SummaryPage /> },
        Route::Stats => html! { <StatsPage /> },
        Route::AuthCallback => html! { <AuthCallbackPage /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Upload} /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    // one session and one client for the whole app; pages receive them
    // through context, tests substitute a fake transport at the same seam
    let services = use_state(|| {
        let session = Session::new(config::auth_config());
        let transport: Rc<dyn Transport> = if config::use_fixtures() {
            log::info!("fixture mode active; no network calls will be made");
            Rc::new(FixtureTransport::new(config::FIXTURE_DELAY_MS))
        } else {
            Rc::new(HttpTransport::new(config::API_BASE_URL, session.clone()))
        };
        (session, ApiClient::new(transport))
    });
    let (session, api) = (*services).clone();

    {
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                session.bootstrap();
                || ()
            },
            (),
        );
    }

    html! {
        <BrowserRouter>
            <ContextProvider<Session> context={session}>
                <ContextProvider<ApiClient> context={api}>
                    <Switch<Route> render={switch} />
                </ContextProvider<ApiClient>>
            </ContextProvider<Session>>
        </BrowserRouter>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
