use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use gloo::storage::{LocalStorage, Storage};
use serde_json::Value;
use yew::prelude::*;

use crate::api::ApiOutcome;
use crate::config::Config;

pub const TOKEN_KEY: &str = "token";
pub const EMAIL_KEY: &str = "email";

/// Key-value persistence for the session credentials.
pub trait CredentialStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`, raw strings so existing tokens survive reloads.
pub struct BrowserStore;

impl CredentialStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            log::warn!("could not persist {key} to local storage");
        }
    }

    fn remove(&self, key: &str) {
        if LocalStorage::raw().remove_item(key).is_err() {
            log::warn!("could not remove {key} from local storage");
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub email: String,
}

impl Session {
    /// Both keys must be present, a half-written session counts as logged out.
    pub fn restore(store: &dyn CredentialStore) -> Option<Self> {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let email = store.get(EMAIL_KEY).filter(|e| !e.is_empty())?;
        Some(Self { token, email })
    }

    pub fn persist(&self, store: &dyn CredentialStore) {
        store.set(TOKEN_KEY, &self.token);
        store.set(EMAIL_KEY, &self.email);
    }

    pub fn clear(store: &dyn CredentialStore) {
        store.remove(TOKEN_KEY);
        store.remove(EMAIL_KEY);
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Admin comes from the token claims. The configured admin email is only a
    /// fallback for backends that issue no role claim.
    pub fn role(&self, config: &Config) -> Role {
        if token_grants_admin(&self.token) {
            return Role::Admin;
        }
        match &config.admin_email {
            Some(admin) if admin.eq_ignore_ascii_case(&self.email) => Role::Admin,
            _ => Role::User,
        }
    }
}

/// Decodes the JWT payload segment without verifying it.
pub fn token_claims(token: &str) -> Option<Value> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn is_admin_label(label: &str) -> bool {
    let label = label.trim();
    let label = label
        .strip_prefix("ROLE_")
        .or_else(|| label.strip_prefix("role_"))
        .unwrap_or(label);
    label.eq_ignore_ascii_case("admin")
}

fn claim_grants_admin(value: &Value) -> bool {
    match value {
        Value::String(label) => is_admin_label(label),
        Value::Array(items) => items.iter().any(claim_grants_admin),
        // Spring style: {"authority": "ROLE_ADMIN"}
        Value::Object(map) => map.get("authority").is_some_and(claim_grants_admin),
        _ => false,
    }
}

pub fn token_grants_admin(token: &str) -> bool {
    let Some(claims) = token_claims(token) else {
        return false;
    };
    ["role", "roles", "authorities"]
        .iter()
        .filter_map(|key| claims.get(*key))
        .any(claim_grants_admin)
}

#[derive(Debug, PartialEq)]
pub enum SessionAction {
    Login { token: String, email: String },
    Logout,
}

/// The session object injected into every view through `SessionContext`.
#[derive(Clone)]
pub struct SessionState {
    pub session: Option<Session>,
    store: Rc<dyn CredentialStore>,
}

impl PartialEq for SessionState {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session
    }
}

impl SessionState {
    pub fn init(store: Rc<dyn CredentialStore>) -> Self {
        let session = Session::restore(store.as_ref());
        Self { session, store }
    }

    pub fn apply(&self, action: SessionAction) -> Self {
        let session = match action {
            SessionAction::Login { token, email } => {
                let session = Session { token, email };
                session.persist(self.store.as_ref());
                Some(session)
            }
            SessionAction::Logout => {
                Session::clear(self.store.as_ref());
                None
            }
        };
        Self {
            session,
            store: self.store.clone(),
        }
    }

    /// Follow-up for the result of an authorized call. Rejected credentials
    /// end a live session; anything else leaves it alone.
    pub fn on_outcome<T>(&self, outcome: &ApiOutcome<T>) -> Option<SessionAction> {
        match outcome {
            ApiOutcome::AuthRejected if self.session.is_some() => Some(SessionAction::Logout),
            _ => None,
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

pub type SessionContext = UseReducerHandle<SessionState>;

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_restore_requires_both_keys() {
        let store = MemoryStore::default();
        assert_eq!(Session::restore(&store), None);

        store.set(TOKEN_KEY, "abc");
        assert_eq!(Session::restore(&store), None);

        store.set(EMAIL_KEY, "john.doe@example.com");
        let session = Session::restore(&store).unwrap();
        assert_eq!(session.email, "john.doe@example.com");
        assert_eq!(session.bearer(), "Bearer abc");
    }

    #[test]
    fn test_login_then_logout_round_trip_through_store() {
        let store: Rc<dyn CredentialStore> = Rc::new(MemoryStore::default());
        let state = SessionState::init(store.clone());
        assert!(state.session.is_none());

        let state = state.apply(SessionAction::Login {
            token: "abc".into(),
            email: "john.doe@example.com".into(),
        });
        assert!(state.session.is_some());
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));

        let state = state.apply(SessionAction::Logout);
        assert!(state.session.is_none());
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(EMAIL_KEY), None);
    }

    #[test]
    fn test_rejected_outcome_signs_out() {
        let store: Rc<dyn CredentialStore> = Rc::new(MemoryStore::default());
        let state = SessionState::init(store).apply(SessionAction::Login {
            token: "abc".into(),
            email: "john.doe@example.com".into(),
        });

        for status in [401, 403] {
            assert_eq!(state.on_outcome(&ApiOutcome::from_status(status, ())), Some(SessionAction::Logout));
        }
        for status in [200, 404, 500] {
            assert_eq!(state.on_outcome(&ApiOutcome::from_status(status, ())), None);
        }

        let signed_out = state.apply(SessionAction::Logout);
        assert_eq!(signed_out.on_outcome(&ApiOutcome::<()>::AuthRejected), None);
    }

    #[test]
    fn test_role_claim_shapes() {
        assert!(token_grants_admin(&jwt(r#"{"sub":"x","role":"ADMIN"}"#)));
        assert!(token_grants_admin(&jwt(r#"{"roles":["USER","ROLE_ADMIN"]}"#)));
        assert!(token_grants_admin(&jwt(r#"{"authorities":[{"authority":"ROLE_ADMIN"}]}"#)));
        assert!(!token_grants_admin(&jwt(r#"{"role":"USER"}"#)));
        assert!(!token_grants_admin("not-a-jwt"));
        assert!(!token_grants_admin("a.%%%.c"));
    }

    #[test]
    fn test_admin_email_fallback() {
        let session = Session { token: "opaque".into(), email: "Boss@Example.com".into() };
        let open = Config::from_values(None, None, None);
        assert_eq!(session.role(&open), Role::User);

        let pinned = Config::from_values(None, Some("boss@example.com"), None);
        assert_eq!(session.role(&pinned), Role::Admin);
    }
}
