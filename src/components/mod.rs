pub mod admin;
pub mod auth;
pub mod contributor_chart;
pub mod dashboard;
pub mod nav_bar;
pub mod toaster;

pub use admin::AdminPage;
pub use auth::{ForgotPassword, Login, Register, ResetPassword};
pub use contributor_chart::ContributorChart;
pub use dashboard::Dashboard;
pub use nav_bar::NavBar;
pub use toaster::Toaster;

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiOutcome;
use crate::app::Route;
use crate::notify::{use_notifier, Notifier};
use crate::session::SessionContext;

pub(crate) const CARD_STYLE: &str =
    "background:#fff; border:1px solid #d1fae5; border-radius:12px; padding:1.5em; box-shadow:0 1px 3px rgba(6,78,59,0.08);";
pub(crate) const INPUT_STYLE: &str =
    "width:100%; padding:0.6em; border:1px solid #a7f3d0; border-radius:6px; box-sizing:border-box; background:#f0fdf4;";
pub(crate) const PRIMARY_BUTTON_STYLE: &str =
    "padding:0.6em 1.6em; background:#059669; color:white; border:none; border-radius:6px; cursor:pointer; font-size:0.95em;";
pub(crate) const LINK_BUTTON_STYLE: &str =
    "padding:0.6em 1em; background:none; color:#059669; border:none; cursor:pointer; font-size:0.9em;";

pub(crate) fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |event: InputEvent| {
        let target = event.target_unchecked_into::<HtmlInputElement>();
        state.set(target.value());
    })
}

pub(crate) fn bind_textarea(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |event: InputEvent| {
        let target = event.target_unchecked_into::<HtmlTextAreaElement>();
        state.set(target.value());
    })
}

/// Ends the session when an authorized call comes back 401/403.
#[derive(Clone)]
pub(crate) struct SessionExpiry {
    session: Option<SessionContext>,
    navigator: Option<Navigator>,
    notifier: Notifier,
}

impl SessionExpiry {
    /// Signs out, says so, and goes back to login if `outcome` calls for it.
    pub(crate) fn check<T>(&self, outcome: &ApiOutcome<T>) {
        let Some(session) = &self.session else {
            return;
        };
        let Some(action) = session.on_outcome(outcome) else {
            return;
        };
        log::info!("session rejected by the server, signing out");
        self.notifier.error("Session expired or invalid. Please log in again.");
        session.dispatch(action);
        if let Some(navigator) = &self.navigator {
            navigator.push(&Route::Login);
        }
    }
}

#[hook]
pub(crate) fn use_session_expiry() -> SessionExpiry {
    SessionExpiry {
        session: use_context::<SessionContext>(),
        navigator: use_navigator(),
        notifier: use_notifier(),
    }
}
