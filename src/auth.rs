use std::cell::RefCell;
use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use gloo_net::http::Request;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use yew::prelude::*;

use crate::api::ApiError;
use crate::config::AuthConfig;

const TOKENS_KEY: &str = "spendlens.tokens";
const RETURN_TO_KEY: &str = "spendlens.return_to";
const VERIFIER_KEY: &str = "spendlens.pkce_verifier";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AuthStatus {
    Checking,
    SignedIn,
    SignedOut,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SessionTokens {
    pub id_token: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Absolute expiry, unix seconds.
    pub expires_at: i64,
}

impl SessionTokens {
    pub fn is_live(&self, now: i64) -> bool {
        now < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    id_token: String,
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
}

#[derive(Default, Deserialize)]
struct IdClaims {
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

pub type SubscriptionId = u32;

struct SessionInner {
    tokens: Option<SessionTokens>,
    status: AuthStatus,
    listeners: Vec<(SubscriptionId, Callback<AuthStatus>)>,
    next_listener: SubscriptionId,
}

/// Session state with an explicit subscribe/unsubscribe surface. Pages
/// observe it through [`use_auth`]; transports ask it for the bearer
/// header and get nothing when no live token exists.
#[derive(Clone)]
pub struct Session {
    config: Rc<AuthConfig>,
    inner: Rc<RefCell<SessionInner>>,
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Session {
    pub fn new(config: AuthConfig) -> Self {
        Session {
            config: Rc::new(config),
            inner: Rc::new(RefCell::new(SessionInner {
                tokens: None,
                status: AuthStatus::Checking,
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    /// Resolve the initial status from stored tokens. A missing or
    /// expired session is the normal anonymous case, not an error.
    pub fn bootstrap(&self) {
        match read_stored_tokens() {
            Some(tokens) if tokens.is_live(now_unix()) => {
                self.apply(Some(tokens), AuthStatus::SignedIn);
            }
            _ => {
                log::debug!("no active session; continuing anonymously");
                self.apply(None, AuthStatus::SignedOut);
            }
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.inner.borrow().status
    }

    /// Id token for the Authorization header, only while live.
    pub fn bearer_token(&self) -> Option<String> {
        let inner = self.inner.borrow();
        inner
            .tokens
            .as_ref()
            .filter(|t| t.is_live(now_unix()))
            .map(|t| t.id_token.clone())
    }

    pub fn user_display_name(&self) -> Option<String> {
        let inner = self.inner.borrow();
        inner
            .tokens
            .as_ref()
            .and_then(|t| id_token_display_name(&t.id_token))
    }

    pub fn subscribe(&self, callback: Callback<AuthStatus>) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener;
        inner.next_listener = inner.next_listener.wrapping_add(1);
        inner.listeners.push((id, callback));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(listener, _)| *listener != id);
    }

    fn apply(&self, tokens: Option<SessionTokens>, status: AuthStatus) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            inner.tokens = tokens;
            inner.status = status;
            inner.listeners.clone()
        };
        for (_, callback) in listeners {
            callback.emit(status);
        }
    }

    /// Redirect to the hosted sign-in page, remembering where to come
    /// back to and the PKCE verifier for the callback exchange.
    pub fn sign_in(&self, return_to: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(RETURN_TO_KEY, return_to);
        }
        let verifier = new_pkce_verifier();
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(VERIFIER_KEY, &verifier);
        }
        redirect_to(&authorize_url(&self.config, &pkce_challenge(&verifier)));
    }

    /// Exchange the authorization code at the provider token endpoint.
    /// PKCE only; no client secret ever leaves the provider.
    pub async fn complete_sign_in(&self, code: &str) -> Result<(), ApiError> {
        let verifier = session_storage()
            .and_then(|storage| storage.get_item(VERIFIER_KEY).ok().flatten())
            .ok_or_else(|| ApiError::Network("sign-in state expired".to_string()))?;
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(VERIFIER_KEY);
        }

        let body = token_request_body(&self.config, code, &verifier);
        let response = Request::post(&format!("{}/oauth2/token", self.config.domain))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|err| ApiError::Network(err.to_string()))?
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        let issued: TokenResponse = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let tokens = SessionTokens {
            id_token: issued.id_token,
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
            expires_at: now_unix() + issued.expires_in,
        };
        write_stored_tokens(&tokens);
        self.apply(Some(tokens), AuthStatus::SignedIn);
        Ok(())
    }

    pub fn sign_out(&self) {
        clear_stored_tokens();
        self.apply(None, AuthStatus::SignedOut);
        redirect_to(&logout_url(&self.config));
    }

    /// Path saved before the sign-in redirect; defaults to the uploader.
    pub fn take_return_path() -> String {
        let path = session_storage()
            .and_then(|storage| storage.get_item(RETURN_TO_KEY).ok().flatten())
            .unwrap_or_else(|| "/".to_string());
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(RETURN_TO_KEY);
        }
        path
    }
}

/// Hook form of the session observable: subscribes on mount,
/// unsubscribes on teardown.
#[hook]
pub fn use_auth() -> AuthStatus {
    let session = use_context::<Session>();
    let status = use_state(|| {
        session
            .as_ref()
            .map(|s| s.status())
            .unwrap_or(AuthStatus::SignedOut)
    });

    {
        let status = status.clone();
        use_effect_with_deps(
            move |session: &Option<Session>| {
                let subscription = session.as_ref().map(|session| {
                    let id = {
                        let status = status.clone();
                        session.subscribe(Callback::from(move |next| status.set(next)))
                    };
                    // catch up in case the status settled before we subscribed
                    status.set(session.status());
                    (session.clone(), id)
                });
                move || {
                    if let Some((session, id)) = subscription {
                        session.unsubscribe(id);
                    }
                }
            },
            session,
        );
    }

    *status
}

pub fn authorize_url(config: &AuthConfig, challenge: &str) -> String {
    let scope = config.scopes.join(" ");
    let params = serde_urlencoded::to_string([
        ("client_id", config.client_id),
        ("response_type", "code"),
        ("scope", scope.as_str()),
        ("redirect_uri", config.redirect_sign_in),
        ("code_challenge_method", "S256"),
        ("code_challenge", challenge),
    ])
    .unwrap_or_default();
    format!("{}/oauth2/authorize?{}", config.domain, params)
}

pub fn logout_url(config: &AuthConfig) -> String {
    let params = serde_urlencoded::to_string([
        ("client_id", config.client_id),
        ("logout_uri", config.redirect_sign_out),
    ])
    .unwrap_or_default();
    format!("{}/logout?{}", config.domain, params)
}

fn token_request_body(config: &AuthConfig, code: &str, verifier: &str) -> String {
    serde_urlencoded::to_string([
        ("grant_type", "authorization_code"),
        ("client_id", config.client_id),
        ("code", code),
        ("redirect_uri", config.redirect_sign_in),
        ("code_verifier", verifier),
    ])
    .unwrap_or_default()
}

fn new_pkce_verifier() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

pub fn pkce_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// Display name from the id token payload. Decoding only; signature
/// checks stay with the backend.
pub fn id_token_display_name(id_token: &str) -> Option<String> {
    let payload = id_token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.as_bytes()).ok()?;
    let claims: IdClaims = serde_json::from_slice(&decoded).ok()?;
    claims.given_name.or(claims.email)
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

fn read_stored_tokens() -> Option<SessionTokens> {
    let raw = local_storage()?.get_item(TOKENS_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

fn write_stored_tokens(tokens: &SessionTokens) {
    if let Some(storage) = local_storage() {
        if let Ok(raw) = serde_json::to_string(tokens) {
            let _ = storage.set_item(TOKENS_KEY, &raw);
        }
    }
}

fn clear_stored_tokens() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKENS_KEY);
    }
}

pub fn current_path_and_query() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let query = location.search().unwrap_or_default();
            format!("{}{}", path, query)
        })
        .unwrap_or_else(|| "/".to_string())
}

pub fn redirect_to(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().assign(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;

    fn config() -> AuthConfig {
        AuthConfig {
            domain: "https://auth.example.com",
            client_id: "client-1",
            redirect_sign_in: "https://app.example.com/auth/callback",
            redirect_sign_out: "https://app.example.com/",
            scopes: &["email", "openid"],
        }
    }

    #[test]
    fn authorize_url_carries_the_pkce_challenge() {
        let url = authorize_url(&config(), "challenge-value");
        assert!(url.starts_with("https://auth.example.com/oauth2/authorize?"));
        assert!(url.contains("client_id=client-1"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=email+openid"));
        assert!(url.contains(
            "redirect_uri=https%3A%2F%2Fapp.example.com%2Fauth%2Fcallback"
        ));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains("code_challenge=challenge-value"));
    }

    #[test]
    fn logout_url_targets_the_sign_out_redirect() {
        let url = logout_url(&config());
        assert!(url.starts_with("https://auth.example.com/logout?"));
        assert!(url.contains("logout_uri=https%3A%2F%2Fapp.example.com%2F"));
    }

    #[test]
    fn pkce_challenge_is_the_rfc7636_test_vector() {
        // verifier/challenge pair from RFC 7636 appendix B
        assert_eq!(
            pkce_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn token_expiry_governs_liveness() {
        let tokens = SessionTokens {
            id_token: "t".to_string(),
            access_token: "t".to_string(),
            refresh_token: None,
            expires_at: 1_000,
        };
        assert!(tokens.is_live(999));
        assert!(!tokens.is_live(1_000));
        assert!(!tokens.is_live(2_000));
    }

    #[test]
    fn display_name_comes_from_the_id_token_payload() {
        let claims = serde_json::json!({ "given_name": "Ada", "email": "ada@example.com" });
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        let token = format!("header.{}.signature", payload);
        assert_eq!(id_token_display_name(&token).as_deref(), Some("Ada"));

        let email_only = serde_json::json!({ "email": "ada@example.com" });
        let payload = URL_SAFE_NO_PAD.encode(email_only.to_string().as_bytes());
        let token = format!("header.{}.signature", payload);
        assert_eq!(
            id_token_display_name(&token).as_deref(),
            Some("ada@example.com")
        );

        assert_eq!(id_token_display_name("not-a-jwt"), None);
    }

    #[test]
    fn token_request_body_is_form_encoded() {
        let body = token_request_body(&config(), "the-code", "the-verifier");
        assert!(body.contains("grant_type=authorization_code"));
        assert!(body.contains("code=the-code"));
        assert!(body.contains("code_verifier=the-verifier"));
        assert!(body.contains(
            "redirect_uri=https%3A%2F%2Fapp.example.com%2Fauth%2Fcallback"
        ));
    }

    #[test]
    fn subscriptions_start_and_stop() {
        use std::cell::Cell;

        let session = Session::new(config());
        let emitted = Rc::new(Cell::new(0u32));
        let seen = {
            let emitted = emitted.clone();
            Callback::from(move |_| emitted.set(emitted.get() + 1))
        };
        let id = session.subscribe(seen);
        session.apply(None, AuthStatus::SignedOut);
        assert_eq!(emitted.get(), 1);
        assert_eq!(session.status(), AuthStatus::SignedOut);

        session.unsubscribe(id);
        session.apply(None, AuthStatus::SignedOut);
        assert_eq!(emitted.get(), 1, "unsubscribed listeners stay silent");
    }
}
