use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use super::{bind_input, CARD_STYLE, INPUT_STYLE, PRIMARY_BUTTON_STYLE};
use crate::api::{self, ApiError};
use crate::app::Route;
use crate::config::use_config;
use crate::log_form::{check_new_password, reset_email};
use crate::notify::{use_notifier, ToastKind, LONG_TOAST_MILLIS};
use crate::session::{SessionAction, SessionContext};
use crate::types::{Credentials, ResetConfirm, ResetState};

const NETWORK_ERROR: &str = "Network error. Could not connect to the server.";

#[derive(Properties, PartialEq)]
struct AuthCardProps {
    title: AttrValue,
    subtitle: AttrValue,
    onsubmit: Callback<SubmitEvent>,
    children: Html,
    footer: Html,
}

#[function_component(AuthCard)]
fn auth_card(props: &AuthCardProps) -> Html {
    html! {
        <div style="max-width:420px; margin:3em auto;">
            <div style={CARD_STYLE}>
                <h2 style="margin:0; color:#064e3b; font-weight:400;">{ &props.title }</h2>
                <p style="margin:0.4em 0 1.5em 0; color:#059669; font-size:0.9em;">{ &props.subtitle }</p>
                <form onsubmit={props.onsubmit.clone()} style="display:flex; flex-direction:column; gap:1em;">
                    { props.children.clone() }
                </form>
                <p style="margin-top:1.5em; text-align:center; font-size:0.85em; color:#6b7280;">
                    { props.footer.clone() }
                </p>
            </div>
        </div>
    }
}

#[function_component(Login)]
pub fn login() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let session = use_context::<SessionContext>();
    let navigator = use_navigator();
    let notifier = use_notifier();
    let config = use_config();

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let credentials = Credentials {
                email: (*email).clone(),
                password: (*password).clone(),
            };
            let session = session.clone();
            let navigator = navigator.clone();
            let notifier = notifier.clone();
            let config = config.clone();
            spawn_local(async move {
                match api::login(&config, &credentials).await {
                    Ok(token) => {
                        notifier.success("Welcome back!");
                        if let Some(session) = &session {
                            session.dispatch(SessionAction::Login {
                                token,
                                email: credentials.email,
                            });
                        }
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(ApiError::Status { status, .. }) => {
                        log::debug!("login rejected with {status}");
                        notifier.error("Invalid credentials.");
                    }
                    Err(err) => {
                        log::warn!("login failed: {err}");
                        notifier.error("Login failed. Check server.");
                    }
                }
            });
        })
    };

    html! {
        <AuthCard
            title="Welcome back"
            subtitle="Sign in to record your daily work."
            {onsubmit}
            footer={html! {
                <>
                    { "Don't have an account? " }
                    <Link<Route> to={Route::Register}>{ "Create account" }</Link<Route>>
                    { " · " }
                    <Link<Route> to={Route::ForgotPassword}>{ "Forgot password?" }</Link<Route>>
                </>
            }}
        >
            <label style="color:#065f46; font-size:0.85em;">{ "Email" }
                <input type="email" required=true placeholder="name@company.com" style={INPUT_STYLE}
                    value={(*email).clone()} oninput={bind_input(&email)} />
            </label>
            <label style="color:#065f46; font-size:0.85em;">{ "Password" }
                <input type="password" required=true placeholder="••••••••" style={INPUT_STYLE}
                    value={(*password).clone()} oninput={bind_input(&password)} />
            </label>
            <button type="submit" style={PRIMARY_BUTTON_STYLE}>{ "Sign In" }</button>
        </AuthCard>
    }
}

#[function_component(Register)]
pub fn register() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let navigator = use_navigator();
    let notifier = use_notifier();
    let config = use_config();

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let credentials = Credentials {
                email: (*email).clone(),
                password: (*password).clone(),
            };
            let navigator = navigator.clone();
            let notifier = notifier.clone();
            let config = config.clone();
            spawn_local(async move {
                match api::register(&config, &credentials).await {
                    Ok(()) => {
                        notifier.success("Account created! Please login.");
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(err @ ApiError::Status { .. }) => {
                        notifier.error(err.server_message().unwrap_or_else(|| "Registration failed.".to_string()));
                    }
                    Err(err) => {
                        log::warn!("registration failed: {err}");
                        notifier.error("Registration failed. Check server.");
                    }
                }
            });
        })
    };

    html! {
        <AuthCard
            title="Create account"
            subtitle="Start tracking your daily achievements."
            {onsubmit}
            footer={html! {
                <>
                    { "Already have an account? " }
                    <Link<Route> to={Route::Login}>{ "Sign in" }</Link<Route>>
                </>
            }}
        >
            <label style="color:#065f46; font-size:0.85em;">{ "Email" }
                <input type="email" required=true placeholder="name@company.com" style={INPUT_STYLE}
                    value={(*email).clone()} oninput={bind_input(&email)} />
            </label>
            <label style="color:#065f46; font-size:0.85em;">{ "Password" }
                <input type="password" required=true placeholder="Create a password" style={INPUT_STYLE}
                    value={(*password).clone()} oninput={bind_input(&password)} />
            </label>
            <button type="submit" style={PRIMARY_BUTTON_STYLE}>{ "Create Account" }</button>
        </AuthCard>
    }
}

#[function_component(ForgotPassword)]
pub fn forgot_password() -> Html {
    let email = use_state(String::new);
    let navigator = use_navigator();
    let notifier = use_notifier();
    let config = use_config();

    let onsubmit = {
        let email = email.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let email = match reset_email(&email) {
                Ok(email) => email,
                Err(err) => {
                    notifier.error(err.to_string());
                    return;
                }
            };
            let navigator = navigator.clone();
            let notifier = notifier.clone();
            let config = config.clone();
            spawn_local(async move {
                match api::request_password_reset(&config, &email).await {
                    Ok(message) => {
                        let message = if message.is_empty() {
                            "OTP sent. Check your email.".to_string()
                        } else {
                            message
                        };
                        notifier.show(ToastKind::Success, message, LONG_TOAST_MILLIS);
                        if let Some(navigator) = &navigator {
                            navigator.push_with_state(&Route::ResetPassword, ResetState { email });
                        }
                    }
                    Err(err @ ApiError::Status { .. }) => {
                        notifier.error(err.server_message().unwrap_or_else(|| "Failed to reset password.".to_string()));
                    }
                    Err(err) => {
                        log::warn!("reset request failed: {err}");
                        notifier.error(NETWORK_ERROR);
                    }
                }
            });
        })
    };

    html! {
        <AuthCard
            title="Forgot password"
            subtitle="We will email you a one-time passcode."
            {onsubmit}
            footer={html! { <Link<Route> to={Route::Login}>{ "Back to Login" }</Link<Route>> }}
        >
            <label style="color:#065f46; font-size:0.85em;">{ "Email" }
                <input type="email" required=true placeholder="name@company.com" style={INPUT_STYLE}
                    value={(*email).clone()} oninput={bind_input(&email)} />
            </label>
            <button type="submit" style={PRIMARY_BUTTON_STYLE}>{ "Send OTP" }</button>
        </AuthCard>
    }
}

#[function_component(ResetPassword)]
pub fn reset_password() -> Html {
    let otp = use_state(String::new);
    let new_password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let navigator = use_navigator();
    let notifier = use_notifier();
    let config = use_config();
    let email = use_location()
        .and_then(|location| location.state::<ResetState>())
        .map(|state| state.email.clone());

    {
        let missing = email.is_none();
        let navigator = navigator.clone();
        let notifier = notifier.clone();
        use_effect_with(missing, move |missing| {
            if *missing {
                notifier.error("Please request an OTP first.");
                if let Some(navigator) = &navigator {
                    navigator.replace(&Route::ForgotPassword);
                }
            }
            || ()
        });
    }

    let onsubmit = {
        let otp = otp.clone();
        let new_password = new_password.clone();
        let confirm_password = confirm_password.clone();
        let email = email.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(email) = email.clone() else {
                return;
            };
            if let Err(err) = check_new_password(&new_password, &confirm_password) {
                notifier.error(err.to_string());
                return;
            }
            let confirm = ResetConfirm {
                email,
                otp: (*otp).clone(),
                new_password: (*new_password).clone(),
            };
            let navigator = navigator.clone();
            let notifier = notifier.clone();
            let config = config.clone();
            spawn_local(async move {
                match api::confirm_password_reset(&config, &confirm).await {
                    Ok(message) => {
                        let message = if message.is_empty() {
                            "Password updated. Please login.".to_string()
                        } else {
                            message
                        };
                        notifier.show(ToastKind::Success, message, 5000);
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(err @ ApiError::Status { .. }) => {
                        notifier.error(err.server_message().unwrap_or_else(|| "Failed to update password.".to_string()));
                    }
                    Err(err) => {
                        log::warn!("reset confirm failed: {err}");
                        notifier.error(NETWORK_ERROR);
                    }
                }
            });
        })
    };

    let incomplete = otp.is_empty() || new_password.is_empty() || confirm_password.is_empty();

    html! {
        <AuthCard
            title="Reset password"
            subtitle={format!("Enter the code sent to {}", email.as_deref().unwrap_or("your email"))}
            {onsubmit}
            footer={html! { <Link<Route> to={Route::Login}>{ "Back to Login" }</Link<Route>> }}
        >
            <label style="color:#065f46; font-size:0.85em;">{ "One-time passcode" }
                <input type="text" required=true placeholder="123456" maxlength="6" style={INPUT_STYLE}
                    value={(*otp).clone()} oninput={bind_input(&otp)} />
            </label>
            <label style="color:#065f46; font-size:0.85em;">{ "New password" }
                <input type="password" required=true placeholder="••••••••" style={INPUT_STYLE}
                    value={(*new_password).clone()} oninput={bind_input(&new_password)} />
            </label>
            <label style="color:#065f46; font-size:0.85em;">{ "Confirm password" }
                <input type="password" required=true placeholder="••••••••" style={INPUT_STYLE}
                    value={(*confirm_password).clone()} oninput={bind_input(&confirm_password)} />
            </label>
            <button type="submit" disabled={incomplete} style={PRIMARY_BUTTON_STYLE}>{ "Reset Password" }</button>
        </AuthCard>
    }
}
