use crate::types::LogEntry;

pub const HEADER: [&str; 4] = ["User Email", "Date", "Category", "Task"];
pub const ALL_LOGS_FILENAME: &str = "all_work_logs.csv";
pub const MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// Task text is always quoted. Other columns only when they would break the row.
pub fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn plain(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        quote(field)
    } else {
        field.to_string()
    }
}

fn row(log: &LogEntry) -> String {
    let category = match log.category.as_deref() {
        Some(category) if !category.is_empty() => category,
        _ => "-",
    };
    [
        plain(&log.user_email),
        plain(&log.date),
        plain(category),
        quote(&log.task),
    ]
    .join(",")
}

/// `None` when there is nothing to export.
pub fn to_csv(logs: &[LogEntry]) -> Option<String> {
    if logs.is_empty() {
        return None;
    }
    let lines: Vec<String> = std::iter::once(HEADER.join(","))
        .chain(logs.iter().map(row))
        .collect();
    Some(lines.join("\n"))
}

pub fn export_filename(email: Option<&str>) -> String {
    match email {
        Some(email) => format!("{email}_logs.csv"),
        None => ALL_LOGS_FILENAME.to_string(),
    }
}
