//! Authentication context and hooks for the UI.
//!
//! The session (token plus cached profile) lives in browser storage. On mount
//! [`AuthProvider`] reads it, then confirms the profile with `GET /Auth/me`.
//! A 401/403 clears the stored session; a network failure keeps the cached
//! profile so a flaky connection does not sign the user out.

use api::{ApiClient, ApiError, AuthToken, UserInfo};
use dioxus::prelude::*;
use store::{ClientConfig, KeyValueStore, Session};

use crate::activity_log::ActivityLog;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: Session,
    /// Confirmed (or cached) profile; `None` while loading or signed out.
    pub user: Option<UserInfo>,
    /// Profile request in flight.
    pub loading: bool,
    /// Last profile load failure that was not an auth rejection.
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: Session::default(),
            user: None,
            loading: true,
            error: None,
        }
    }
}

impl AuthState {
    /// Initial state from storage. Nothing is loading when there is no token.
    pub fn from_store(store: &impl KeyValueStore) -> Self {
        let session = Session::load(store);
        Self {
            loading: session.is_signed_in(),
            session,
            user: None,
            error: None,
        }
    }

    pub fn signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    /// Fold the result of the profile request into the state, keeping storage
    /// in sync.
    pub fn apply_profile(&mut self, store: &impl KeyValueStore, result: Result<UserInfo, ApiError>) {
        self.loading = false;
        match result {
            Ok(user) => {
                if let Some(token) = self.session.token.clone() {
                    self.session = user.to_session(token);
                    self.session.save(store);
                }
                self.user = Some(user);
                self.error = None;
            }
            Err(err) if err.is_unauthorized() => {
                tracing::warn!("stored session rejected: {err}");
                Session::clear(store);
                *self = Self {
                    loading: false,
                    ..Self::from_store(store)
                };
            }
            Err(err) => {
                tracing::warn!("profile request failed: {err}");
                self.user = UserInfo::from_session(&self.session);
                self.error = self.user.is_none().then(|| err.user_message());
            }
        }
    }

    /// Persist a successful login.
    pub fn sign_in(&mut self, store: &impl KeyValueStore, token: String, user: UserInfo) {
        self.session = user.to_session(token);
        self.session.save(store);
        self.user = Some(user);
        self.loading = false;
        self.error = None;
    }

    pub fn sign_out(&mut self, store: &impl KeyValueStore) {
        Session::clear(store);
        *self = Self {
            loading: false,
            ..Self::default()
        };
    }
}

/// Bumped to re-run the profile request.
#[derive(Clone, Copy)]
struct ProfileRefresh(Signal<u32>);

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Client configuration loaded at startup.
pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>()
}

/// Build a client from the live state; for use inside event handlers.
pub fn api_client(config: &ClientConfig, auth: &Signal<AuthState>) -> ApiClient {
    ApiClient::from_session(config, &auth.peek().session)
}

/// Re-request the profile (e.g. after email verification).
pub fn refresh_profile() {
    let ProfileRefresh(mut counter) = consume_context::<ProfileRefresh>();
    counter += 1;
}

/// Store a login result, fetching the profile when the login response did not
/// include it. Returns the signed-in user.
pub async fn complete_sign_in(
    config: &ClientConfig,
    mut auth: Signal<AuthState>,
    token: AuthToken,
) -> Result<UserInfo, ApiError> {
    let user = match token.user {
        Some(user) => user,
        None => {
            ApiClient::new(config.api.base_url.clone())
                .with_token(Some(token.token.clone()))
                .current_user()
                .await?
        }
    };
    auth.write().sign_in(&store::make_store(), token.token, user.clone());
    tracing::info!(user = %user.id, "signed in");
    Ok(user)
}

/// Clear the stored session.
pub fn sign_out(mut auth: Signal<AuthState>) {
    auth.write().sign_out(&store::make_store());
    tracing::info!("signed out");
}

/// Provider component for authentication, configuration and the activity log.
/// Wrap your app with this component.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let config = use_context_provider(|| ClientConfig::load(&store::make_store()));
    use_context_provider(|| Signal::new(ActivityLog::default()));
    let mut auth_state = use_context_provider(|| Signal::new(AuthState::from_store(&store::make_store())));
    let refresh = use_context_provider(|| ProfileRefresh(Signal::new(0)));

    let _ = use_resource(move || {
        let config = config.clone();
        async move {
            let _ = (refresh.0)();
            let session = auth_state.peek().session.clone();
            if !session.is_signed_in() {
                return;
            }
            auth_state.write().loading = true;
            let result = ApiClient::from_session(&config, &session).current_user().await;
            auth_state.write().apply_profile(&store::make_store(), result);
        }
    });

    rsx! {
        {children}
    }
}

/// Button that signs the user out and returns to the sign-in page.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                sign_out(auth);
                nav.replace("/signin");
            },
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{PlanTier, Role};
    use store::{keys, MemoryStore};

    fn user() -> UserInfo {
        UserInfo {
            id: "7".into(),
            email: "t@school.ng".into(),
            first_name: Some("Tola".into()),
            last_name: None,
            role: Role::Regular,
            plan: PlanTier::Free,
            is_verified: true,
            school_name: None,
        }
    }

    fn signed_in_store() -> MemoryStore {
        let store = MemoryStore::new();
        user().to_session("tok".into()).save(&store);
        store
    }

    #[test]
    fn test_from_store() {
        let empty = AuthState::from_store(&MemoryStore::new());
        assert!(!empty.signed_in());
        assert!(!empty.loading);

        let state = AuthState::from_store(&signed_in_store());
        assert!(state.signed_in());
        assert!(state.loading);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_profile_success() {
        let store = signed_in_store();
        let mut state = AuthState::from_store(&store);
        let mut fresh = user();
        fresh.plan = PlanTier::Premium;
        state.apply_profile(&store, Ok(fresh));
        assert!(!state.loading);
        assert_eq!(state.user.as_ref().map(|u| u.plan), Some(PlanTier::Premium));
        assert!(store.get(keys::USER).unwrap().contains("\"plan\":2"));
    }

    #[test]
    fn test_unauthorized_clears_session() {
        let store = signed_in_store();
        let mut state = AuthState::from_store(&store);
        state.apply_profile(&store, Err(ApiError::Unauthorized { status: 401 }));
        assert!(!state.signed_in());
        assert!(!state.loading);
        assert!(store.get(keys::TOKEN).is_none());
    }

    #[test]
    fn test_network_failure_uses_cached_profile() {
        let store = signed_in_store();
        let mut state = AuthState::from_store(&store);
        state.apply_profile(&store, Err(ApiError::Status { status: 502, body: String::new() }));
        assert!(state.signed_in());
        assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("7"));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_failure_without_cache_reports_error() {
        let store = MemoryStore::new();
        store.set(keys::TOKEN, "tok");
        let mut state = AuthState::from_store(&store);
        state.apply_profile(&store, Err(ApiError::Status { status: 500, body: String::new() }));
        assert!(state.user.is_none());
        assert!(state.error.is_some());
    }

    #[test]
    fn test_sign_in_and_out() {
        let store = MemoryStore::new();
        let mut state = AuthState::from_store(&store);
        state.sign_in(&store, "abc".into(), user());
        assert_eq!(store.get(keys::TOKEN).as_deref(), Some("abc"));
        assert_eq!(store.get(keys::USER_ID).as_deref(), Some("7"));

        store.set(keys::CONFIG, "[api]");
        state.sign_out(&store);
        assert!(!state.signed_in());
        assert!(store.get(keys::TOKEN).is_none());
        assert_eq!(store.get(keys::CONFIG).as_deref(), Some("[api]"));
    }
}
