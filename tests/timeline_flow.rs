use std::rc::Rc;

use work_tracker_web::api::ApiOutcome;
use work_tracker_web::csv_export::to_csv;
use work_tracker_web::grouping::{filter_groups, group_by_date, AdminView};
use work_tracker_web::log_form::{LogForm, LogList, LogListAction, Submission};
use work_tracker_web::session::{CredentialStore, MemoryStore, SessionAction, SessionState, EMAIL_KEY, TOKEN_KEY};
use work_tracker_web::types::{Category, LogEntry};
use yew::Reducible;

fn signed_in(store: Rc<dyn CredentialStore>) -> SessionState {
    SessionState::init(store).apply(SessionAction::Login {
        token: "token-123".to_string(),
        email: "john.doe@example.com".to_string(),
    })
}

/// Stands in for the backend assigning an id on POST.
fn server_create(id: i64, submission: Submission) -> LogEntry {
    let Submission::Create(payload) = submission else {
        panic!("expected a create");
    };
    LogEntry {
        id,
        user_email: payload.user_email,
        date: payload.date,
        category: Some(payload.category),
        task: payload.task,
    }
}

#[test]
fn test_login_fetch_and_create_shows_grouped_entry() {
    let store: Rc<dyn CredentialStore> = Rc::new(MemoryStore::default());
    let state = signed_in(store.clone());
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("token-123"));

    let session = state.session.clone().unwrap();
    let list = Rc::new(LogList::default()).reduce(LogListAction::Replace(Vec::new()));
    assert!(group_by_date(&list.items).is_empty());

    let form = LogForm {
        date: "2024-01-01".to_string(),
        task: "Wrote docs".to_string(),
        category: Category::Writing,
        editing: None,
    };
    let created = server_create(1, form.submission(&session.email).unwrap());
    let list = list.reduce(LogListAction::Append(created));

    let groups = group_by_date(&list.items);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].date, "2024-01-01");
    assert_eq!(groups[0].logs[0].task, "Wrote docs");
    assert_eq!(groups[0].logs[0].category.as_deref(), Some("Writing"));
}

#[test]
fn test_unauthorized_response_clears_session() {
    let store: Rc<dyn CredentialStore> = Rc::new(MemoryStore::default());
    let state = signed_in(store.clone());

    let fetched = ApiOutcome::from_status(401, Vec::<LogEntry>::new());
    let action = state.on_outcome(&fetched).expect("401 ends the session");
    let state = Rc::new(state).reduce(action);

    assert!(state.session.is_none());
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(EMAIL_KEY), None);
    assert!(SessionState::init(store).session.is_none());
}

#[test]
fn test_admin_search_and_export() {
    let entry = |id: i64, email: &str, task: &str| LogEntry {
        id,
        user_email: email.to_string(),
        date: "2024-01-01".to_string(),
        category: None,
        task: task.to_string(),
    };
    let view = AdminView::build(
        vec![
            entry(1, "john.doe@example.com", r#"He said "hi""#),
            entry(2, "alice@example.com", "Reviewed PR"),
        ],
        "2024-01-01",
    );

    let hits = filter_groups(&view.groups, "john");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].email, "john.doe@example.com");

    let john = view.group("john.doe@example.com").unwrap();
    let csv = to_csv(&john.logs).unwrap();
    assert!(csv.ends_with(r#",-,"He said ""hi""""#));
    assert_eq!(view.summary.logs_today, 2);
}
