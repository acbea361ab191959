use std::rc::Rc;

use thiserror::Error;
use yew::Reducible;

use crate::types::{Category, LogEntry, LogPayload};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in date and task.")]
    MissingDateOrTask,
    #[error("Please enter your email address.")]
    MissingEmail,
    #[error("Passwords do not match!")]
    PasswordMismatch,
}

/// What a successful submit should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// POST, then append the returned record locally.
    Create(LogPayload),
    /// PUT, then reset the form and re-fetch the list.
    Update { id: i64, payload: LogPayload },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogForm {
    pub date: String,
    pub task: String,
    pub category: Category,
    pub editing: Option<i64>,
}

impl LogForm {
    pub fn edit(log: &LogEntry) -> Self {
        Self {
            date: log.date.clone(),
            task: log.task.clone(),
            category: Category::from_label(log.category.as_deref()),
            editing: Some(log.id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn submission(&self, user_email: &str) -> Result<Submission, ValidationError> {
        if self.date.is_empty() || self.task.is_empty() {
            return Err(ValidationError::MissingDateOrTask);
        }
        let payload = LogPayload {
            date: self.date.clone(),
            task: self.task.clone(),
            category: self.category.as_str().to_string(),
            user_email: user_email.to_string(),
        };
        Ok(match self.editing {
            Some(id) => Submission::Update { id, payload },
            None => Submission::Create(payload),
        })
    }
}

pub fn append_created(logs: &[LogEntry], created: LogEntry) -> Vec<LogEntry> {
    let mut next = logs.to_vec();
    next.push(created);
    next
}

pub fn remove_deleted(logs: &[LogEntry], id: i64) -> Vec<LogEntry> {
    logs.iter().filter(|log| log.id != id).cloned().collect()
}

pub enum LogListAction {
    /// Authoritative list from a fetch.
    Replace(Vec<LogEntry>),
    /// Record returned by a create, added without re-fetching.
    Append(LogEntry),
    Remove(i64),
}

/// The user's cached copy of their logs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogList {
    pub items: Vec<LogEntry>,
}

impl Reducible for LogList {
    type Action = LogListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let items = match action {
            LogListAction::Replace(items) => items,
            LogListAction::Append(created) => append_created(&self.items, created),
            LogListAction::Remove(id) => remove_deleted(&self.items, id),
        };
        Rc::new(LogList { items })
    }
}

/// Trimmed email for the forgot-password request.
pub fn reset_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim();
    if email.is_empty() {
        Err(ValidationError::MissingEmail)
    } else {
        Ok(email.to_string())
    }
}

pub fn check_new_password(new_password: &str, confirm: &str) -> Result<(), ValidationError> {
    if new_password == confirm {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(id: i64) -> LogEntry {
        LogEntry {
            id,
            user_email: "john.doe@example.com".into(),
            date: "2024-01-01".into(),
            category: Some("Writing".into()),
            task: "Wrote docs".into(),
        }
    }

    #[test]
    fn test_empty_fields_block_submit() {
        let form = LogForm { task: "x".into(), ..Default::default() };
        assert_eq!(form.submission("a@b.c"), Err(ValidationError::MissingDateOrTask));

        let form = LogForm { date: "2024-01-01".into(), ..Default::default() };
        assert_eq!(
            form.submission("a@b.c").unwrap_err().to_string(),
            "Please fill in date and task."
        );
    }

    #[test]
    fn test_new_entry_creates() {
        let form = LogForm {
            date: "2024-01-01".into(),
            task: "Wrote docs".into(),
            category: Category::Writing,
            editing: None,
        };
        match form.submission("john.doe@example.com").unwrap() {
            Submission::Create(payload) => {
                assert_eq!(payload.category, "Writing");
                assert_eq!(payload.user_email, "john.doe@example.com");
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_editing_updates_same_id() {
        let form = LogForm::edit(&created(9));
        assert!(form.is_editing());
        assert!(matches!(form.submission("john.doe@example.com"), Ok(Submission::Update { id: 9, .. })));
    }

    #[test]
    fn test_edit_defaults_missing_category() {
        let mut log = created(3);
        log.category = None;
        assert_eq!(LogForm::edit(&log).category, Category::Development);
    }

    #[test]
    fn test_cancel_drops_edited_category() {
        let editing = LogForm::edit(&created(4));
        assert_eq!(editing.category.as_str(), "Writing");

        let form = LogForm { date: "2024-01-02".into(), task: "Standup".into(), ..LogForm::default() };
        assert_eq!(form.category.as_str(), "Development");
        match form.submission("john.doe@example.com").unwrap() {
            Submission::Create(payload) => assert_eq!(payload.category, "Development"),
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_list_transitions() {
        let logs = append_created(&[], created(1));
        let logs = append_created(&logs, created(2));
        assert_eq!(logs.len(), 2);
        let logs = remove_deleted(&logs, 1);
        assert_eq!(logs.iter().map(|l| l.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(remove_deleted(&logs, 99).len(), 1);
    }

    #[test]
    fn test_log_list_reducer() {
        let list = Rc::new(LogList::default());
        let list = list.reduce(LogListAction::Replace(vec![created(1)]));
        let list = list.reduce(LogListAction::Append(created(2)));
        let list = list.reduce(LogListAction::Remove(1));
        assert_eq!(list.items, vec![created(2)]);
    }

    #[test]
    fn test_reset_validation() {
        assert_eq!(reset_email("  a@b.c "), Ok("a@b.c".to_string()));
        assert_eq!(reset_email("   "), Err(ValidationError::MissingEmail));
        assert!(check_new_password("pw", "pw").is_ok());
        assert_eq!(check_new_password("pw", "wp"), Err(ValidationError::PasswordMismatch));
    }
}
