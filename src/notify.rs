use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use gloo::timers::callback::Timeout;
use yew::prelude::*;

pub const DEFAULT_TOAST_MILLIS: u32 = 4000;
pub const LONG_TOAST_MILLIS: u32 = 6000;

static NEXT_TOAST_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub text: String,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    pub items: Vec<Toast>,
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Push(toast) => items.push(toast),
            ToastAction::Dismiss(id) => items.retain(|toast| toast.id != id),
        }
        Rc::new(Toasts { items })
    }
}

pub type ToastContext = UseReducerHandle<Toasts>;

/// Cloneable handle the views use to raise notifications.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    toasts: Option<ToastContext>,
}

impl Notifier {
    pub fn show(&self, kind: ToastKind, text: impl Into<String>, millis: u32) {
        let text = text.into();
        let Some(toasts) = self.toasts.clone() else {
            log::info!("{text}");
            return;
        };
        let id = NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed);
        toasts.dispatch(ToastAction::Push(Toast { id, kind, text }));
        Timeout::new(millis, move || toasts.dispatch(ToastAction::Dismiss(id))).forget();
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(ToastKind::Success, text, DEFAULT_TOAST_MILLIS);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(ToastKind::Error, text, DEFAULT_TOAST_MILLIS);
    }
}

#[hook]
pub fn use_notifier() -> Notifier {
    Notifier {
        toasts: use_context::<ToastContext>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u32) -> Toast {
        Toast { id, kind: ToastKind::Success, text: format!("toast {id}") }
    }

    #[test]
    fn test_push_and_dismiss() {
        let state = Rc::new(Toasts::default());
        let state = state.reduce(ToastAction::Push(toast(1)));
        let state = state.reduce(ToastAction::Push(toast(2)));
        assert_eq!(state.items.len(), 2);

        let state = state.reduce(ToastAction::Dismiss(1));
        assert_eq!(state.items, vec![toast(2)]);

        let state = state.reduce(ToastAction::Dismiss(7));
        assert_eq!(state.items.len(), 1);
    }
}
