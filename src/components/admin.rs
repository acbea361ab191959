use std::collections::HashSet;

use yew::platform::spawn_local;
use yew::prelude::*;

use super::{bind_input, use_session_expiry, ContributorChart, CARD_STYLE, INPUT_STYLE};
use crate::api::{self, ApiOutcome};
use crate::config::use_config;
use crate::csv_export::{export_filename, to_csv, MIME_TYPE};
use crate::download::offer_download;
use crate::grouping::{filter_groups, AdminView};
use crate::notify::use_notifier;
use crate::session::Session;

/// Expanded users, keyed by email. Absent means collapsed.
fn toggle_expanded(expanded: &HashSet<String>, email: &str) -> HashSet<String> {
    let mut next = expanded.clone();
    if !next.remove(email) {
        next.insert(email.to_string());
    }
    next
}

/// Browser-local calendar date as YYYY-MM-DD.
fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    format!("{:04}-{:02}-{:02}", now.get_full_year(), now.get_month() + 1, now.get_date())
}

#[derive(Properties, PartialEq)]
pub struct AdminPageProps {
    pub session: Session,
}

#[function_component(AdminPage)]
pub fn admin_page(props: &AdminPageProps) -> Html {
    let view = use_state(AdminView::default);
    let search = use_state(String::new);
    let expanded = use_state(HashSet::<String>::new);
    let notifier = use_notifier();
    let config = use_config();
    let on_expired = use_session_expiry();

    {
        let view = view.clone();
        let session = props.session.clone();
        let notifier = notifier.clone();
        let config = config.clone();
        let on_expired = on_expired.clone();
        use_effect_with(props.session.email.clone(), move |_| {
            spawn_local(async move {
                match api::fetch_all_logs(&config, &session).await {
                    ApiOutcome::Ok(logs) => view.set(AdminView::build(logs, &today_iso())),
                    rejected @ ApiOutcome::AuthRejected => on_expired.check(&rejected),
                    ApiOutcome::Failed(err) => {
                        log::warn!("fetching all logs failed: {err}");
                        notifier.error("Failed to fetch logs.");
                    }
                }
            });
            || ()
        });
    }

    let export = {
        let view = view.clone();
        Callback::from(move |email: Option<String>| {
            let logs = match &email {
                Some(email) => view.group(email).map(|group| group.logs.as_slice()).unwrap_or_default(),
                None => view.logs.as_slice(),
            };
            if let Some(csv) = to_csv(logs) {
                offer_download(&export_filename(email.as_deref()), &csv, MIME_TYPE);
            }
        })
    };

    let on_export_all = {
        let export = export.clone();
        Callback::from(move |_: MouseEvent| export.emit(None))
    };

    let visible = filter_groups(&view.groups, &search);
    let summary = view.summary;

    html! {
        <div style="max-width:1100px; margin:0 auto; padding:1em; color:#1f2937;">
            <h1 style="font-weight:300; font-size:2.2em; color:#022c22; margin:0 0 1em 0;">{ "Admin Dashboard" }</h1>

            <div style="display:grid; grid-template-columns:repeat(auto-fit, minmax(220px, 1fr)); gap:1.5em; margin-bottom:3em;">
                <div style={CARD_STYLE}>
                    <div style="font-size:0.8em; text-transform:uppercase; letter-spacing:0.05em; color:#059669;">{ "Total Users" }</div>
                    <div style="font-size:2.4em; font-weight:bold; color:#022c22;">{ summary.total_users }</div>
                </div>
                <div style={CARD_STYLE}>
                    <div style="font-size:0.8em; text-transform:uppercase; letter-spacing:0.05em; color:#059669;">{ "Total Logs" }</div>
                    <div style="font-size:2.4em; font-weight:bold; color:#022c22;">{ summary.total_logs }</div>
                </div>
                <div style="background:#059669; color:white; border-radius:12px; padding:1.5em;">
                    <div style="font-size:0.8em; text-transform:uppercase; letter-spacing:0.05em; color:#d1fae5;">{ "Logs Today" }</div>
                    <div style="font-size:2.4em; font-weight:bold;">{ summary.logs_today }</div>
                </div>
            </div>

            <div style="display:grid; grid-template-columns:1fr 2fr; gap:2em; align-items:start;">
                <div style={CARD_STYLE}>
                    <h3 style="margin:0 0 1.5em 0; font-size:0.8em; text-transform:uppercase; letter-spacing:0.08em; color:#34d399;">{ "Top Contributors" }</h3>
                    <ContributorChart contributors={view.contributors.clone()} />
                </div>

                <div style="display:flex; flex-direction:column; gap:1.5em;">
                    <div style="display:flex; gap:1em;">
                        <input type="text" placeholder="Search users..." style={format!("{} flex:1;", INPUT_STYLE)}
                            value={(*search).clone()} oninput={bind_input(&search)} />
                        <button onclick={on_export_all}
                            style="padding:0.6em 1em; background:white; border:1px solid #a7f3d0; color:#047857; border-radius:6px; cursor:pointer;">
                            { "Export All" }
                        </button>
                    </div>

                    { if visible.is_empty() {
                        html! {
                            <div style="text-align:center; padding:3em 0; border:2px dashed #d1fae5; border-radius:12px; color:#34d399;">
                                { "No users found." }
                            </div>
                        }
                    } else {
                        html! {
                            <div style="display:flex; flex-direction:column; gap:1em;">
                                { for visible.into_iter().map(|group| {
                                    let is_open = expanded.contains(&group.email);
                                    let on_toggle = {
                                        let expanded = expanded.clone();
                                        let email = group.email.clone();
                                        Callback::from(move |_: MouseEvent| expanded.set(toggle_expanded(&expanded, &email)))
                                    };
                                    let on_export = {
                                        let export = export.clone();
                                        let email = group.email.clone();
                                        Callback::from(move |event: MouseEvent| {
                                            event.stop_propagation();
                                            export.emit(Some(email.clone()));
                                        })
                                    };
                                    let initial = group.email.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
                                    html! {
                                        <div key={group.email.clone()} style="background:white; border:1px solid #d1fae5; border-radius:12px; overflow:hidden;">
                                            <div onclick={on_toggle} style="display:flex; align-items:center; justify-content:space-between; padding:1em; cursor:pointer;">
                                                <div style="display:flex; align-items:center; gap:1em;">
                                                    <div style="width:40px; height:40px; border-radius:50%; background:#d1fae5; color:#047857; display:flex; align-items:center; justify-content:center; font-weight:bold;">
                                                        { initial }
                                                    </div>
                                                    <div>
                                                        <div style="font-weight:600; color:#111827;">{ &group.email }</div>
                                                        <div style="font-size:0.75em; color:#059669;">{ format!("{} logs total", group.logs.len()) }</div>
                                                    </div>
                                                </div>
                                                <div style="display:flex; align-items:center; gap:1em;">
                                                    <button onclick={on_export} style="background:none; border:none; color:#059669; cursor:pointer; font-size:0.85em;">{ "Export" }</button>
                                                    <span style="color:#34d399;">{ if is_open { "▲" } else { "▼" } }</span>
                                                </div>
                                            </div>
                                            { if is_open {
                                                html! {
                                                    <div style="border-top:1px solid #d1fae5; max-height:24em; overflow-y:auto;">
                                                        <table style="width:100%; text-align:left; border-collapse:collapse;">
                                                            <thead style="background:#ecfdf5; position:sticky; top:0;">
                                                                <tr>
                                                                    <th style="padding:0.75em 1.5em; font-size:0.75em; color:#065f46; text-transform:uppercase;">{ "Date" }</th>
                                                                    <th style="padding:0.75em 1.5em; font-size:0.75em; color:#065f46; text-transform:uppercase;">{ "Category" }</th>
                                                                    <th style="padding:0.75em 1.5em; font-size:0.75em; color:#065f46; text-transform:uppercase;">{ "Task" }</th>
                                                                </tr>
                                                            </thead>
                                                            <tbody>
                                                                { for group.logs.iter().map(|log| html! {
                                                                    <tr key={log.id.to_string()} style="border-top:1px solid #f0fdf4;">
                                                                        <td style="padding:1em 1.5em; font-size:0.85em; color:#4b5563; white-space:nowrap;">{ &log.date }</td>
                                                                        <td style="padding:1em 1.5em;">
                                                                            <span style="padding:0.15em 0.6em; border-radius:6px; font-size:0.75em; background:#d1fae5; color:#065f46; border:1px solid #a7f3d0;">
                                                                                { log.category_label() }
                                                                            </span>
                                                                        </td>
                                                                        <td style="padding:1em 1.5em; font-size:0.85em; color:#1f2937;">{ &log.task }</td>
                                                                    </tr>
                                                                }) }
                                                            </tbody>
                                                        </table>
                                                    </div>
                                                }
                                            } else {
                                                html! {}
                                            }}
                                        </div>
                                    }
                                }) }
                            </div>
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
