use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_check() -> Html {
    icon_base("M5 13l4 4L19 7")
}

pub fn icon_alert() -> Html {
    icon_base("M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z")
}

pub fn icon_google() -> Html {
    icon_base("M21 12c0-.66-.06-1.3-.17-1.92H12v3.64h5.05a4.32 4.32 0 01-1.87 2.84v2.36h3.03A9.12 9.12 0 0021 12zM12 21a8.96 8.96 0 006.21-2.08l-3.03-2.36A5.68 5.68 0 0112 17.58 5.7 5.7 0 016.65 13.7H3.52v2.43A9 9 0 0012 21z")
}

pub fn spinner() -> Html {
    html! {
        <div class="w-5 h-5 border-2 border-gray-400 border-t-white rounded-full animate-spin" />
    }
}
