use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{AdminPage, Dashboard, ForgotPassword, Login, NavBar, Register, ResetPassword, Toaster};
use crate::config::{use_config, Config};
use crate::notify::{ToastContext, Toasts};
use crate::session::{BrowserStore, Role, SessionContext, SessionState};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/forgot-password")]
    ForgotPassword,
    #[at("/reset-password")]
    ResetPassword,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Route::Login | Route::Register | Route::ForgotPassword | Route::ResetPassword
        )
    }
}

#[derive(Properties, PartialEq)]
struct GateProps {
    route: Route,
}

/// Auth routes for visitors, the log views for signed-in users.
#[function_component(Gate)]
fn gate(props: &GateProps) -> Html {
    let session = use_context::<SessionContext>().and_then(|ctx| ctx.session.clone());
    let config = use_config();

    match (&props.route, session) {
        (Route::Home, Some(session)) => match session.role(&config) {
            Role::Admin => html! { <AdminPage {session} /> },
            Role::User => html! { <Dashboard {session} /> },
        },
        (Route::Home, None) => html! { <Redirect<Route> to={Route::Login} /> },
        (route, Some(_)) if route.is_public() => html! { <Redirect<Route> to={Route::Home} /> },
        (Route::Login, None) => html! { <Login /> },
        (Route::Register, None) => html! { <Register /> },
        (Route::ForgotPassword, None) => html! { <ForgotPassword /> },
        (Route::ResetPassword, None) => html! { <ResetPassword /> },
        _ => html! {
            <div style="text-align:center; padding:4em 0; color:#6b7280;">
                <h2>{ "404 - Not Found" }</h2>
                <Link<Route> to={Route::Home}>{ "Back to your timeline" }</Link<Route>>
            </div>
        },
    }
}

fn switch(route: Route) -> Html {
    html! { <Gate {route} /> }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| Config::from_env());
    let session: SessionContext = use_reducer(|| SessionState::init(Rc::new(BrowserStore)));
    let toasts: ToastContext = use_reducer(Toasts::default);

    html! {
        <ContextProvider<Config> context={(*config).clone()}>
            <ContextProvider<SessionContext> context={session}>
                <ContextProvider<ToastContext> context={toasts}>
                    <BrowserRouter>
                        <div style="min-height:100vh; background:#ecfdf5; color:#111827; font-family:Arial,sans-serif;">
                            <NavBar />
                            <main style="padding:2em 1.5em;">
                                <Switch<Route> render={switch} />
                            </main>
                            <Toaster />
                        </div>
                    </BrowserRouter>
                </ContextProvider<ToastContext>>
            </ContextProvider<SessionContext>>
        </ContextProvider<Config>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.to_path(), "/");
        assert_eq!(Route::ResetPassword.to_path(), "/reset-password");
        assert_eq!(Route::recognize("/forgot-password"), Some(Route::ForgotPassword));
        assert!(Route::Login.is_public());
        assert!(!Route::Home.is_public());
    }
}
