use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{use_session_expiry, CARD_STYLE, INPUT_STYLE, LINK_BUTTON_STYLE, PRIMARY_BUTTON_STYLE};
use crate::api::{self, ApiOutcome};
use crate::config::use_config;
use crate::grouping::group_by_date;
use crate::log_form::{LogForm, LogList, LogListAction, Submission};
use crate::notify::use_notifier;
use crate::session::Session;
use crate::types::{Category, LogEntry};

/// "Monday, January 1, 2024" for the timeline headers.
fn timeline_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|day| day.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub session: Session,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let logs = use_reducer(LogList::default);
    let form = use_state(LogForm::default);
    let notifier = use_notifier();
    let config = use_config();
    let on_expired = use_session_expiry();

    let refresh = {
        let logs = logs.dispatcher();
        let session = props.session.clone();
        let notifier = notifier.clone();
        let config = config.clone();
        let on_expired = on_expired.clone();
        Callback::from(move |_: ()| {
            let logs = logs.clone();
            let session = session.clone();
            let notifier = notifier.clone();
            let config = config.clone();
            let on_expired = on_expired.clone();
            spawn_local(async move {
                match api::fetch_logs(&config, &session, &session.email).await {
                    ApiOutcome::Ok(items) => logs.dispatch(LogListAction::Replace(items)),
                    rejected @ ApiOutcome::AuthRejected => on_expired.check(&rejected),
                    ApiOutcome::Failed(err) => {
                        log::warn!("fetching logs failed: {err}");
                        notifier.error("Failed to fetch logs.");
                    }
                }
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with(props.session.email.clone(), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let on_date = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let target = event.target_unchecked_into::<HtmlInputElement>();
            form.set(LogForm { date: target.value(), ..(*form).clone() });
        })
    };

    let on_category = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            let target = event.target_unchecked_into::<HtmlSelectElement>();
            let category = Category::from_label(Some(target.value().as_str()));
            form.set(LogForm { category, ..(*form).clone() });
        })
    };

    let on_task = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let target = event.target_unchecked_into::<HtmlTextAreaElement>();
            form.set(LogForm { task: target.value(), ..(*form).clone() });
        })
    };

    let on_cancel = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| form.set(LogForm::default()))
    };

    let on_submit = {
        let form = form.clone();
        let logs = logs.dispatcher();
        let session = props.session.clone();
        let notifier = notifier.clone();
        let config = config.clone();
        let on_expired = on_expired.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let submission = match form.submission(&session.email) {
                Ok(submission) => submission,
                Err(err) => {
                    notifier.error(err.to_string());
                    return;
                }
            };
            let form = form.clone();
            let logs = logs.clone();
            let session = session.clone();
            let notifier = notifier.clone();
            let config = config.clone();
            let on_expired = on_expired.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match submission {
                    // Re-fetch after update: the server copy is authoritative.
                    Submission::Update { id, payload } => {
                        match api::update_log(&config, &session, id, &payload).await {
                            ApiOutcome::Ok(()) => {
                                notifier.success("Log updated!");
                                form.set(LogForm::default());
                                refresh.emit(());
                            }
                            rejected @ ApiOutcome::AuthRejected => on_expired.check(&rejected),
                            ApiOutcome::Failed(err) => {
                                log::warn!("updating log {id} failed: {err}");
                                notifier.error("Operation failed.");
                            }
                        }
                    }
                    // Append locally: no round trip, but only as fresh as the POST response.
                    Submission::Create(payload) => match api::create_log(&config, &session, &payload).await {
                        ApiOutcome::Ok(created) => {
                            logs.dispatch(LogListAction::Append(created));
                            form.set(LogForm::default());
                            notifier.success("Log added!");
                        }
                        rejected @ ApiOutcome::AuthRejected => on_expired.check(&rejected),
                        ApiOutcome::Failed(err) => {
                            log::warn!("creating log failed: {err}");
                            notifier.error("Operation failed.");
                        }
                    },
                }
            });
        })
    };

    let on_edit = {
        let form = form.clone();
        Callback::from(move |log: LogEntry| form.set(LogForm::edit(&log)))
    };

    let on_delete = {
        let logs = logs.dispatcher();
        let session = props.session.clone();
        let notifier = notifier.clone();
        let config = config.clone();
        let on_expired = on_expired.clone();
        Callback::from(move |id: i64| {
            if !gloo::dialogs::confirm("Delete this entry?") {
                return;
            }
            let logs = logs.clone();
            let session = session.clone();
            let notifier = notifier.clone();
            let config = config.clone();
            let on_expired = on_expired.clone();
            spawn_local(async move {
                match api::delete_log(&config, &session, id).await {
                    ApiOutcome::Ok(()) => {
                        logs.dispatch(LogListAction::Remove(id));
                        notifier.success("Entry deleted.");
                    }
                    rejected @ ApiOutcome::AuthRejected => on_expired.check(&rejected),
                    ApiOutcome::Failed(err) => {
                        log::warn!("deleting log {id} failed: {err}");
                        notifier.error("Delete failed.");
                    }
                }
            });
        })
    };

    let timeline = group_by_date(&logs.items);

    html! {
        <div style="max-width:900px; margin:0 auto; color:#1f2937;">
            <div style="text-align:center; margin-bottom:2.5em;">
                <h1 style="font-weight:300; color:#022c22; margin:0;">{ "Daily Work Tracker" }</h1>
                <p style="color:#059669; margin-top:0.5em;">{ "Record your daily achievements." }</p>
            </div>

            <div style={format!("{} border-left:6px solid #10b981; margin-bottom:3em;", CARD_STYLE)}>
                <div style="display:flex; gap:1em; flex-wrap:wrap; margin-bottom:1em;">
                    <input type="date" style={format!("{} flex:1; min-width:180px;", INPUT_STYLE)}
                        value={form.date.clone()} oninput={on_date} />
                    <select style={format!("{} flex:1; min-width:180px;", INPUT_STYLE)}
                        value={form.category.as_str()} onchange={on_category}>
                        { for Category::ALL.iter().map(|category| html! {
                            <option value={category.as_str()} selected={*category == form.category}>{ category.as_str() }</option>
                        }) }
                    </select>
                </div>
                <textarea placeholder="What did you accomplish today?" rows=4
                    style={format!("{} resize:none; min-height:100px;", INPUT_STYLE)}
                    value={form.task.clone()} oninput={on_task} />
                <div style="display:flex; justify-content:flex-end; gap:0.75em; margin-top:1em;">
                    { if form.is_editing() {
                        html! { <button onclick={on_cancel} style={LINK_BUTTON_STYLE}>{ "Cancel" }</button> }
                    } else {
                        html! {}
                    }}
                    <button onclick={on_submit} style={PRIMARY_BUTTON_STYLE}>
                        { if form.is_editing() { "Update Entry" } else { "Save Entry" } }
                    </button>
                </div>
            </div>

            <div style="display:flex; flex-direction:column; gap:2em;">
                { for timeline.iter().map(|group| html! {
                    <div key={group.date.clone()}>
                        <div style="display:flex; align-items:center; gap:0.75em; margin-bottom:1em;">
                            <div style="width:10px; height:10px; border-radius:50%; background:#059669;"></div>
                            <span style="font-size:0.8em; font-weight:bold; color:#10b981; text-transform:uppercase; letter-spacing:0.1em;">
                                { timeline_label(&group.date) }
                            </span>
                        </div>
                        <div style="display:flex; flex-direction:column; gap:1em;">
                            { for group.logs.iter().map(|log| {
                                let edit = {
                                    let on_edit = on_edit.clone();
                                    let log = log.clone();
                                    Callback::from(move |_: MouseEvent| on_edit.emit(log.clone()))
                                };
                                let delete = {
                                    let on_delete = on_delete.clone();
                                    let id = log.id;
                                    Callback::from(move |_: MouseEvent| on_delete.emit(id))
                                };
                                html! {
                                    <div key={log.id.to_string()} style="background:#fff; padding:1.25em; border-radius:10px; border:1px solid #ecfdf5; display:flex; justify-content:space-between; align-items:flex-start;">
                                        <div>
                                            <span style="display:inline-block; padding:0.2em 0.6em; margin-bottom:0.5em; font-size:0.75em; font-weight:600; color:#047857; text-transform:uppercase; background:#ecfdf5; border:1px solid #d1fae5; border-radius:6px;">
                                                { log.category_label() }
                                            </span>
                                            <p style="margin:0; color:#374151; white-space:pre-wrap; line-height:1.5;">{ &log.task }</p>
                                        </div>
                                        <div style="display:flex; gap:0.5em;">
                                            <button onclick={edit} style={LINK_BUTTON_STYLE}>{ "Edit" }</button>
                                            <button onclick={delete} style="padding:0.6em 1em; background:none; color:#ef4444; border:none; cursor:pointer; font-size:0.9em;">{ "Delete" }</button>
                                        </div>
                                    </div>
                                }
                            }) }
                        </div>
                    </div>
                }) }

                { if logs.items.is_empty() {
                    html! {
                        <div style="text-align:center; padding:5em 0;">
                            <p style="color:#9ca3af; font-weight:300;">{ "Your timeline is empty." }</p>
                        </div>
                    }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}
