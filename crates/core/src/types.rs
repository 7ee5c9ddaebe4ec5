// crates/core/src/types.rs
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Row identity for every table (SQLite `INTEGER PRIMARY KEY`).
pub type DbId = i64;

/// Timestamps keep the offset the client submitted them with.
pub type Timestamp = DateTime<FixedOffset>;

/// Color assigned to a category when none is supplied.
pub const DEFAULT_CATEGORY_COLOR: &str = "#718096";

/// Render a timestamp the way it is stored and sent on the wire:
/// RFC 3339, whole seconds, `Z` for UTC.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A recorded block of time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: DbId,
    pub task: String,
    pub description: String,
    pub category: String,
    /// `None` only for legacy rows written before timestamps were stored.
    #[serde(default, with = "timestamp_opt")]
    pub start_time: Option<Timestamp>,
    #[serde(default, with = "timestamp_opt")]
    pub end_time: Option<Timestamp>,
    /// Whole minutes between start and end.
    pub duration: i64,
    /// Local calendar date (`YYYY-MM-DD`) the entry was last written.
    pub date: String,
}

/// Payload for creating or replacing a time entry.
///
/// Missing keys deserialize to empty strings so the validator can report
/// which required field is absent instead of a generic JSON error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryRequest {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: DbId,
    pub name: String,
    pub category_id: Option<DbId>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub name: String,
    /// Zero or negative means "no category", as older clients send `0`.
    #[serde(default)]
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub description: Option<String>,
}

mod timestamp_opt {
    use super::{format_timestamp, Timestamp};
    use chrono::DateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Timestamp>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => s.serialize_str(&format_timestamp(ts)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Timestamp>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| DateTime::parse_from_rfc3339(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ts(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_format_timestamp_uses_z_for_utc() {
        assert_eq!(format_timestamp(&ts("2025-11-09T09:00:00+00:00")), "2025-11-09T09:00:00Z");
    }

    #[test]
    fn test_format_timestamp_keeps_offset_and_drops_fraction() {
        assert_eq!(
            format_timestamp(&ts("2025-11-09T09:00:00.750+02:00")),
            "2025-11-09T09:00:00+02:00"
        );
    }

    #[test]
    fn test_time_entry_serializes_timestamps_as_strings() {
        let entry = TimeEntry {
            id: 7,
            task: "Development".to_string(),
            description: String::new(),
            category: "project work".to_string(),
            start_time: Some(ts("2025-11-09T09:00:00Z")),
            end_time: None,
            duration: 60,
            date: "2025-11-09".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["start_time"], "2025-11-09T09:00:00Z");
        assert!(json["end_time"].is_null());
        assert_eq!(json["duration"], 60);

        let back: TimeEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_entry_request_missing_keys_default_to_empty() {
        let req: TimeEntryRequest = serde_json::from_str(r#"{"task":"Write docs"}"#).unwrap();
        assert_eq!(req.task, "Write docs");
        assert_eq!(req.category, "");
        assert_eq!(req.start_time, "");
        assert!(req.description.is_none());
    }

    #[test]
    fn test_entry_request_ignores_legacy_duration_fields() {
        let req: TimeEntryRequest = serde_json::from_str(
            r#"{"task":"a","category":"other","duration":30,"date":"2025-01-01"}"#,
        )
        .unwrap();
        assert_eq!(req.category, "other");
    }

    #[test]
    fn test_task_request_accepts_null_category() {
        let req: TaskRequest =
            serde_json::from_str(r#"{"name":"Review","category_id":null}"#).unwrap();
        assert_eq!(req.category_id, None);
    }
}
