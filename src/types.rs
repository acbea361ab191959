use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    #[serde(default)]
    pub user_email: String,
    pub date: String, // YYYY-MM-DD
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub task: String,
}

impl LogEntry {
    /// Category label for the timeline and admin tables.
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => category,
            _ => "General",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Development,
    Design,
    Meeting,
    Research,
    Writing,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Development,
        Category::Design,
        Category::Meeting,
        Category::Research,
        Category::Writing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Development => "Development",
            Category::Design => "Design",
            Category::Meeting => "Meeting",
            Category::Research => "Research",
            Category::Writing => "Writing",
        }
    }

    /// Unknown or missing server values fall back to the form default.
    pub fn from_label(label: Option<&str>) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| Some(c.as_str()) == label)
            .unwrap_or_default()
    }
}

/// Body of the create and update log calls.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPayload {
    pub date: String,
    pub task: String,
    pub category: String,
    pub user_email: String,
}

#[derive(Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize)]
pub struct ResetRequest {
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetConfirm {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// History state carried from forgot-password to reset-password.
#[derive(Clone, Debug, PartialEq)]
pub struct ResetState {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_wire_format() {
        let raw = r#"{"id":7,"userEmail":"john.doe@example.com","date":"2024-01-01","category":null,"task":"Wrote docs"}"#;
        let entry: LogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.user_email, "john.doe@example.com");
        assert_eq!(entry.category, None);
        assert_eq!(entry.category_label(), "General");
    }

    #[test]
    fn test_payload_uses_camel_case() {
        let payload = LogPayload {
            date: "2024-01-01".into(),
            task: "Wrote docs".into(),
            category: "Writing".into(),
            user_email: "a@b.c".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["userEmail"], "a@b.c");

        let confirm = ResetConfirm { email: "a@b.c".into(), otp: "123456".into(), new_password: "pw".into() };
        let json = serde_json::to_value(&confirm).unwrap();
        assert_eq!(json["newPassword"], "pw");
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(Category::from_label(Some("Writing")), Category::Writing);
        assert_eq!(Category::from_label(Some("Gardening")), Category::Development);
        assert_eq!(Category::from_label(None), Category::Development);
    }
}
