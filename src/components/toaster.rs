use yew::prelude::*;

use crate::notify::{ToastAction, ToastContext, ToastKind};

#[function_component(Toaster)]
pub fn toaster() -> Html {
    let Some(toasts) = use_context::<ToastContext>() else {
        return html! {};
    };

    html! {
        <div style="position:fixed; right:1.5em; bottom:1.5em; display:flex; flex-direction:column; gap:0.5em; z-index:1000;">
            { for toasts.items.iter().map(|toast| {
                let accent = match toast.kind {
                    ToastKind::Success => "#34d399",
                    ToastKind::Error => "#f87171",
                };
                let on_dismiss = {
                    let toasts = toasts.clone();
                    let id = toast.id;
                    Callback::from(move |_: MouseEvent| toasts.dispatch(ToastAction::Dismiss(id)))
                };
                html! {
                    <div key={toast.id.to_string()} onclick={on_dismiss}
                        style={format!("background:#064e3b; color:#fff; font-size:14px; padding:0.75em 1em; border-radius:8px; border-left:4px solid {}; cursor:pointer; max-width:360px; box-shadow:0 4px 12px rgba(0,0,0,0.2);", accent)}>
                        { &toast.text }
                    </div>
                }
            }) }
        </div>
    }
}
