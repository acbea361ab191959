//! Grouping and aggregation behind the timeline and the admin dashboard.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::LogEntry;

pub const TOP_CONTRIBUTORS: usize = 5;

/// Newest first. Valid ISO dates sort ahead of anything unparseable.
pub fn cmp_date_desc(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok();
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// One timeline bucket. Entries keep their fetch order.
#[derive(Clone, Debug, PartialEq)]
pub struct DateGroup {
    pub date: String,
    pub logs: Vec<LogEntry>,
}

pub fn group_by_date(logs: &[LogEntry]) -> Vec<DateGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<DateGroup> = Vec::new();

    for log in logs {
        let day = log.date.trim();
        match index.get(day) {
            Some(&slot) => groups[slot].logs.push(log.clone()),
            None => {
                index.insert(day, groups.len());
                groups.push(DateGroup {
                    date: day.to_string(),
                    logs: vec![log.clone()],
                });
            }
        }
    }

    groups.sort_by(|a, b| cmp_date_desc(&a.date, &b.date));
    groups
}

/// All logs of one user, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct UserGroup {
    pub email: String,
    pub logs: Vec<LogEntry>,
}

/// Groups appear in first-seen email order.
pub fn group_by_user(logs: &[LogEntry]) -> Vec<UserGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<UserGroup> = Vec::new();

    for log in logs {
        match index.get(log.user_email.as_str()) {
            Some(&slot) => groups[slot].logs.push(log.clone()),
            None => {
                index.insert(log.user_email.as_str(), groups.len());
                groups.push(UserGroup {
                    email: log.user_email.clone(),
                    logs: vec![log.clone()],
                });
            }
        }
    }

    for group in &mut groups {
        group.logs.sort_by(|a, b| cmp_date_desc(&a.date, &b.date));
    }
    groups
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdminSummary {
    pub total_users: usize,
    pub total_logs: usize,
    pub logs_today: usize,
}

/// `today` is an ISO date, compared as a plain string.
pub fn summarize(logs: &[LogEntry], groups: &[UserGroup], today: &str) -> AdminSummary {
    AdminSummary {
        total_users: groups.len(),
        total_logs: logs.len(),
        logs_today: logs.iter().filter(|log| log.date.trim() == today).count(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contributor {
    pub name: String,
    pub email: String,
    pub count: usize,
}

/// Local part of the address.
pub fn display_name(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Top users by log count. Stable sort, so ties keep group order.
pub fn top_contributors(groups: &[UserGroup], limit: usize) -> Vec<Contributor> {
    let mut ranked: Vec<Contributor> = groups
        .iter()
        .map(|group| Contributor {
            name: display_name(&group.email).to_string(),
            email: group.email.clone(),
            count: group.logs.len(),
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

pub fn matches_search(email: &str, term: &str) -> bool {
    email.to_lowercase().contains(&term.to_lowercase())
}

pub fn filter_groups<'a>(groups: &'a [UserGroup], term: &str) -> Vec<&'a UserGroup> {
    groups
        .iter()
        .filter(|group| matches_search(&group.email, term))
        .collect()
}

/// Everything the admin dashboard renders, rebuilt on every fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminView {
    pub logs: Vec<LogEntry>,
    pub groups: Vec<UserGroup>,
    pub summary: AdminSummary,
    pub contributors: Vec<Contributor>,
}

impl AdminView {
    pub fn build(logs: Vec<LogEntry>, today: &str) -> Self {
        let groups = group_by_user(&logs);
        let summary = summarize(&logs, &groups, today);
        let contributors = top_contributors(&groups, TOP_CONTRIBUTORS);
        Self {
            logs,
            groups,
            summary,
            contributors,
        }
    }

    pub fn group(&self, email: &str) -> Option<&UserGroup> {
        self.groups.iter().find(|group| group.email == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, email: &str, date: &str) -> LogEntry {
        LogEntry {
            id,
            user_email: email.to_string(),
            date: date.to_string(),
            category: Some("Development".to_string()),
            task: format!("task {id}"),
        }
    }

    fn sample() -> Vec<LogEntry> {
        vec![
            entry(1, "john.doe@example.com", "2024-01-02"),
            entry(2, "alice@example.com", "2024-01-01"),
            entry(3, "john.doe@example.com", "2024-01-03"),
            entry(4, "john.doe@example.com", "2024-01-02"),
            entry(5, "bob@example.com", "2023-12-31"),
        ]
    }

    #[test]
    fn test_group_by_date_partitions_input() {
        let logs = sample();
        let groups = group_by_date(&logs);

        let mut ids: Vec<i64> = groups.iter().flat_map(|g| g.logs.iter().map(|l| l.id)).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        for group in &groups {
            assert!(group.logs.iter().all(|l| l.date == group.date));
        }
    }

    #[test]
    fn test_date_keys_strictly_descending() {
        let groups = group_by_date(&sample());
        let dates: Vec<&str> = groups.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-02", "2024-01-01", "2023-12-31"]);
    }

    #[test]
    fn test_entries_keep_fetch_order_within_date() {
        let groups = group_by_date(&sample());
        let jan2: Vec<i64> = groups[1].logs.iter().map(|l| l.id).collect();
        assert_eq!(jan2, vec![1, 4]);
    }

    #[test]
    fn test_padded_dates_share_one_group() {
        let logs = vec![entry(1, "a@example.com", " 2024-01-01"), entry(2, "a@example.com", "2024-01-01 ")];
        let groups = group_by_date(&logs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date, "2024-01-01");
        assert_eq!(groups[0].logs.len(), 2);
        assert_eq!(summarize(&logs, &group_by_user(&logs), "2024-01-01").logs_today, 2);
    }

    #[test]
    fn test_unparseable_dates_sort_last() {
        assert_eq!(cmp_date_desc("2024-01-01", "garbage"), Ordering::Less);
        assert_eq!(cmp_date_desc("garbage", "2024-01-01"), Ordering::Greater);
        assert_eq!(cmp_date_desc("2024-02-01", "2024-01-31"), Ordering::Less);
    }

    #[test]
    fn test_group_by_user_sorted_newest_first() {
        let groups = group_by_user(&sample());
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].email, "john.doe@example.com");
        let dates: Vec<&str> = groups[0].logs.iter().map(|l| l.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-02", "2024-01-02"]);
    }

    #[test]
    fn test_summary_counts() {
        let view = AdminView::build(sample(), "2024-01-02");
        assert_eq!(view.summary.total_users, 3);
        assert_eq!(view.summary.total_logs, 5);
        assert_eq!(view.summary.total_logs, view.groups.iter().map(|g| g.logs.len()).sum::<usize>());
        assert_eq!(view.summary.logs_today, 2);
    }

    #[test]
    fn test_top_contributors_capped_and_stable() {
        let mut logs = Vec::new();
        let mut id = 0;
        for (user, count) in [("a", 1), ("b", 3), ("c", 2), ("d", 2), ("e", 1), ("f", 4), ("g", 1)] {
            for _ in 0..count {
                id += 1;
                logs.push(entry(id, &format!("{user}@example.com"), "2024-01-01"));
            }
        }
        let top = top_contributors(&group_by_user(&logs), TOP_CONTRIBUTORS);
        let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["f", "b", "c", "d", "a"]);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        assert!(matches_search("john.doe@example.com", "john"));
        assert!(matches_search("John.Doe@Example.com", "JOHN"));
        assert!(!matches_search("alice@example.com", "john"));

        let groups = group_by_user(&sample());
        assert_eq!(filter_groups(&groups, "").len(), 3);
        assert_eq!(filter_groups(&groups, "john").len(), 1);
    }

    #[test]
    fn test_display_name_is_local_part() {
        assert_eq!(display_name("john.doe@example.com"), "john.doe");
        assert_eq!(display_name("nodomain"), "nodomain");
    }

    #[test]
    fn test_empty_input() {
        let view = AdminView::build(Vec::new(), "2024-01-01");
        assert_eq!(view.summary, AdminSummary::default());
        assert!(view.contributors.is_empty());
        assert!(group_by_date(&[]).is_empty());
    }
}
