//! Build-time configuration. Every value can be overridden through a
//! `SPENDLENS_*` environment variable at compile time.

pub const API_BASE_URL: &str = match option_env!("SPENDLENS_API_BASE_URL") {
    Some(url) => url,
    None => "https://api.spendlens.app/v1",
};

const USE_FIXTURES_OVERRIDE: Option<&str> = option_env!("SPENDLENS_USE_FIXTURES");

/// Fixture mode substitutes canned payloads for every network call.
/// Debug builds default to fixtures so the app works without a backend.
pub fn use_fixtures() -> bool {
    match USE_FIXTURES_OVERRIDE {
        Some(value) => value == "true",
        None => cfg!(debug_assertions),
    }
}

/// Artificial latency applied by the fixture transport, in milliseconds.
pub const FIXTURE_DELAY_MS: u32 = 500;

#[derive(Clone, PartialEq)]
pub struct AuthConfig {
    /// Hosted identity provider domain, no trailing slash.
    pub domain: &'static str,
    pub client_id: &'static str,
    pub redirect_sign_in: &'static str,
    pub redirect_sign_out: &'static str,
    pub scopes: &'static [&'static str],
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        domain: option_env!("SPENDLENS_AUTH_DOMAIN")
            .unwrap_or("https://auth.spendlens.app"),
        client_id: option_env!("SPENDLENS_AUTH_CLIENT_ID").unwrap_or("spendlens-web"),
        redirect_sign_in: option_env!("SPENDLENS_AUTH_REDIRECT_SIGN_IN")
            .unwrap_or("https://app.spendlens.app/auth/callback"),
        redirect_sign_out: option_env!("SPENDLENS_AUTH_REDIRECT_SIGN_OUT")
            .unwrap_or("https://app.spendlens.app/"),
        scopes: &["email", "profile", "openid"],
    }
}
