use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Queue entry for a client visit.
///
/// `date` is derived from `check_in_time` at creation so the day's queue can
/// be fetched with an index lookup instead of a range scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIn {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub organization_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub client_id: RecordId,
    pub client_name: String,
    pub service: String,
    /// RFC 3339 instant of the check-in
    pub check_in_time: String,
    /// Day key, `YYYY-MM-DD`
    pub date: String,
    #[serde(deserialize_with = "serde_helpers::bool_false", default)]
    pub is_in_service: bool,
    // Enrichment fields filled on read, not stored
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub visits_before_today: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_visit_rating: Option<u8>,
}

/// Waiting entries first, oldest first within each group.
pub fn queue_order(a: &CheckIn, b: &CheckIn) -> Ordering {
    a.is_in_service
        .cmp(&b.is_in_service)
        .then_with(|| a.check_in_time.cmp(&b.check_in_time))
}

pub fn sort_queue(entries: &mut [CheckIn]) {
    entries.sort_by(queue_order);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInCreate {
    pub client_id: String,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, time: &str, in_service: bool) -> CheckIn {
        CheckIn {
            id: None,
            organization_id: "organization:o1".parse().unwrap(),
            client_id: "client:c1".parse().unwrap(),
            client_name: name.to_string(),
            service: "haircut".to_string(),
            check_in_time: time.to_string(),
            date: "2026-03-01".to_string(),
            is_in_service: in_service,
            visits_before_today: None,
            last_visit_rating: None,
        }
    }

    #[test]
    fn test_waiting_entries_come_first() {
        let mut queue = vec![
            entry("A", "2026-03-01T09:00:00Z", true),
            entry("B", "2026-03-01T10:00:00Z", false),
            entry("C", "2026-03-01T09:30:00Z", false),
        ];
        sort_queue(&mut queue);
        let names: Vec<&str> = queue.iter().map(|c| c.client_name.as_str()).collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[test]
    fn test_ties_break_on_check_in_time() {
        let mut queue = vec![
            entry("late", "2026-03-01T11:00:00Z", false),
            entry("early", "2026-03-01T08:00:00Z", false),
        ];
        sort_queue(&mut queue);
        assert_eq!(queue[0].client_name, "early");
    }
}
