use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::session::{SessionAction, SessionContext};

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let session = use_context::<SessionContext>();
    let navigator = use_navigator();

    let signed_in = session.as_ref().and_then(|s| s.session.clone());

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(session) = &session {
                session.dispatch(SessionAction::Logout);
            }
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    html! {
        <nav style="position:sticky; top:0; z-index:50; background:rgba(255,255,255,0.9); border-bottom:1px solid #d1fae5;">
            <div style="max-width:1100px; margin:0 auto; padding:0 1.5em; height:64px; display:flex; align-items:center; justify-content:space-between;">
                <div style="display:flex; align-items:center; gap:0.75em;">
                    <div style="width:40px; height:40px; border-radius:8px; background:#059669; color:white; display:flex; align-items:center; justify-content:center; font-weight:bold;">
                        { "DW" }
                    </div>
                    <span style="font-weight:bold; font-size:1.2em; color:#022c22;">{ "Daily Work Tracker" }</span>
                </div>
                { if let Some(session) = signed_in {
                    html! {
                        <div style="display:flex; align-items:center; gap:1.5em;">
                            <span style="font-size:0.85em; color:#047857; background:#ecfdf5; padding:0.25em 0.75em; border-radius:999px;">
                                { session.email }
                            </span>
                            <button onclick={on_logout} style="background:none; border:none; color:#6b7280; cursor:pointer; font-size:0.9em;">
                                { "Sign Out" }
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }}
            </div>
        </nav>
    }
}
