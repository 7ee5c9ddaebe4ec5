// crates/core/src/validation.rs
//! Payload validation for time entries, categories and tasks.
//!
//! Everything here is pure: no clock reads, no store access. Referential
//! checks (does the category exist?) belong to the persistence layer.

use chrono::{DateTime, SubsecRound};

use crate::error::ValidationError;
use crate::types::{
    CategoryRequest, DbId, TaskRequest, TimeEntryRequest, Timestamp, DEFAULT_CATEGORY_COLOR,
};

/// Required time-entry fields, in the order they are reported when missing.
const REQUIRED_ENTRY_FIELDS: [&str; 4] = ["task", "category", "start_time", "end_time"];

/// A time entry that passed validation, with derived values filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub task: String,
    pub description: String,
    pub category: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCategory {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTask {
    pub name: String,
    pub category_id: Option<DbId>,
    pub description: String,
}

/// Check that every required entry field is non-empty.
///
/// Reports only the first missing field. Values are not trimmed: a field
/// holding a single space counts as present.
pub fn check_required_fields(req: &TimeEntryRequest) -> Result<(), ValidationError> {
    let values = [&req.task, &req.category, &req.start_time, &req.end_time];
    for (field, value) in REQUIRED_ENTRY_FIELDS.into_iter().zip(values) {
        if value.is_empty() {
            return Err(ValidationError::missing(field));
        }
    }
    Ok(())
}

/// Parse an ISO-8601 / RFC 3339 timestamp, tagging failures with `field`.
///
/// Fractional seconds are dropped here, since the store keeps whole seconds
/// and ordering and duration must hold for the stored values.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<Timestamp, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.trunc_subsecs(0))
        .map_err(|e| ValidationError::MalformedTimestamp {
            field,
            message: e.to_string(),
        })
}

/// `end` must be strictly later than `start`.
pub fn validate_time_sequence(start: &Timestamp, end: &Timestamp) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::OrderingViolation);
    }
    Ok(())
}

/// Whole minutes between `start` and `end`, truncated toward zero.
pub fn duration_minutes(start: &Timestamp, end: &Timestamp) -> i64 {
    end.signed_duration_since(*start).num_minutes()
}

/// Validate a time-entry submission and derive its duration.
pub fn validate_time_entry(req: &TimeEntryRequest) -> Result<ValidatedEntry, ValidationError> {
    check_required_fields(req)?;

    let start_time = parse_timestamp("start_time", &req.start_time)?;
    let end_time = parse_timestamp("end_time", &req.end_time)?;
    validate_time_sequence(&start_time, &end_time)?;

    Ok(ValidatedEntry {
        task: req.task.clone(),
        description: req.description.clone().unwrap_or_default(),
        category: req.category.clone(),
        duration_minutes: duration_minutes(&start_time, &end_time),
        start_time,
        end_time,
    })
}

/// Validate a category submission, applying the default color.
pub fn validate_category(req: &CategoryRequest) -> Result<ValidatedCategory, ValidationError> {
    if req.name.is_empty() {
        return Err(ValidationError::missing("name"));
    }
    let color = match req.color.as_deref() {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY_COLOR.to_string(),
    };
    Ok(ValidatedCategory {
        name: req.name.clone(),
        color,
    })
}

/// Validate a task submission. A non-positive `category_id` means none.
pub fn validate_task(req: &TaskRequest) -> Result<ValidatedTask, ValidationError> {
    if req.name.is_empty() {
        return Err(ValidationError::missing("name"));
    }
    Ok(ValidatedTask {
        name: req.name.clone(),
        category_id: req.category_id.filter(|id| *id > 0),
        description: req.description.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(task: &str, category: &str, start: &str, end: &str) -> TimeEntryRequest {
        TimeEntryRequest {
            task: task.to_string(),
            description: None,
            category: category.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn ts(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    // ========================================================================
    // Required fields
    // ========================================================================

    #[test]
    fn test_valid_request_has_all_fields() {
        let req = request(
            "Development",
            "project work",
            "2025-11-09T09:00:00Z",
            "2025-11-09T10:00:00Z",
        );
        assert!(check_required_fields(&req).is_ok());
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let cases = [
            (request("", "c", "s", "e"), "task"),
            (request("t", "", "s", "e"), "category"),
            (request("t", "c", "", "e"), "start_time"),
            (request("t", "c", "s", ""), "end_time"),
            (request("", "", "", ""), "task"),
            (request("t", "", "", ""), "category"),
        ];
        for (req, field) in cases {
            assert_eq!(
                check_required_fields(&req),
                Err(ValidationError::missing(field)),
                "request {req:?}"
            );
        }
    }

    #[test]
    fn test_whitespace_is_not_missing() {
        let req = request(" ", " ", "2025-11-09T09:00:00Z", "2025-11-09T10:00:00Z");
        assert!(validate_time_entry(&req).is_ok());
    }

    // ========================================================================
    // Timestamp parsing
    // ========================================================================

    #[test]
    fn test_invalid_start_time_names_field() {
        let req = request("t", "c", "invalid-time", "2025-11-09T10:00:00Z");
        let err = validate_time_entry(&req).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedTimestamp { field: "start_time", .. }
        ));
        assert!(err.to_string().contains("invalid start_time format"));
    }

    #[test]
    fn test_invalid_end_time_names_field() {
        let req = request("t", "c", "2025-11-09T09:00:00Z", "2025-11-09 10:00");
        let err = validate_time_entry(&req).unwrap_err();
        assert_eq!(err.field(), "end_time");
        assert!(err.to_string().contains("invalid end_time format"));
    }

    #[test]
    fn test_timestamp_without_offset_rejected() {
        let err = parse_timestamp("start_time", "2025-11-09T09:00:00").unwrap_err();
        assert_eq!(err.field(), "start_time");
    }

    #[test]
    fn test_offsets_are_compared_as_instants() {
        // 10:30+02:00 is 08:30Z, so this is a 30 minute entry
        let req = request("t", "c", "2025-11-09T08:00:00Z", "2025-11-09T10:30:00+02:00");
        let entry = validate_time_entry(&req).unwrap();
        assert_eq!(entry.duration_minutes, 30);
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    #[test]
    fn test_end_before_start_rejected() {
        let req = request("t", "c", "2025-11-09T10:00:00Z", "2025-11-09T09:00:00Z");
        assert_eq!(
            validate_time_entry(&req),
            Err(ValidationError::OrderingViolation)
        );
    }

    #[test]
    fn test_equal_times_rejected() {
        let req = request("t", "c", "2025-11-09T09:00:00Z", "2025-11-09T09:00:00Z");
        assert_eq!(
            validate_time_entry(&req),
            Err(ValidationError::OrderingViolation)
        );
    }

    #[test]
    fn test_subsecond_span_within_one_second_rejected() {
        let req = request("t", "c", "2025-11-09T09:00:00.100Z", "2025-11-09T09:00:00.900Z");
        assert_eq!(
            validate_time_entry(&req),
            Err(ValidationError::OrderingViolation)
        );
    }

    #[test]
    fn test_fractional_seconds_dropped_before_duration() {
        let req = request("t", "c", "2025-11-09T09:00:00.900Z", "2025-11-09T09:01:00.100Z");
        let entry = validate_time_entry(&req).unwrap();
        assert_eq!(entry.start_time, ts("2025-11-09T09:00:00Z"));
        assert_eq!(entry.end_time, ts("2025-11-09T09:01:00Z"));
        assert_eq!(entry.duration_minutes, 1);
    }

    #[test]
    fn test_one_second_apart_accepted() {
        assert!(validate_time_sequence(
            &ts("2025-11-09T09:00:00Z"),
            &ts("2025-11-09T09:00:01Z")
        )
        .is_ok());
    }

    // ========================================================================
    // Duration
    // ========================================================================

    #[test]
    fn test_duration_truncates_partial_minutes() {
        let cases = [
            ("2025-11-09T10:00:00Z", 60),
            ("2025-11-09T09:30:00Z", 30),
            ("2025-11-09T11:30:00Z", 150),
            ("2025-11-09T09:01:00Z", 1),
            ("2025-11-09T09:00:15Z", 0),
            ("2025-11-09T09:00:45Z", 0),
            ("2025-11-09T09:01:30Z", 1),
            ("2025-11-09T09:01:59Z", 1),
        ];
        let start = ts("2025-11-09T09:00:00Z");
        for (end, expected) in cases {
            assert_eq!(duration_minutes(&start, &ts(end)), expected, "end {end}");
        }
    }

    #[test]
    fn test_validated_entry_carries_derived_duration() {
        let mut req = request(
            "Research",
            "project work",
            "2025-11-09T09:00:00Z",
            "2025-11-09T11:30:00Z",
        );
        req.description = Some("reading papers".to_string());

        let entry = validate_time_entry(&req).unwrap();
        assert_eq!(entry.task, "Research");
        assert_eq!(entry.description, "reading papers");
        assert_eq!(entry.duration_minutes, 150);
        assert!(entry.end_time > entry.start_time);
    }

    #[test]
    fn test_missing_field_checked_before_timestamps() {
        let req = request("", "c", "garbage", "garbage");
        assert_eq!(
            validate_time_entry(&req),
            Err(ValidationError::missing("task"))
        );
    }

    // ========================================================================
    // Categories and tasks
    // ========================================================================

    #[test]
    fn test_category_requires_name() {
        let req = CategoryRequest::default();
        assert_eq!(
            validate_category(&req),
            Err(ValidationError::missing("name"))
        );
    }

    #[test]
    fn test_category_default_color() {
        for color in [None, Some(String::new())] {
            let req = CategoryRequest {
                name: "meetings".to_string(),
                color,
            };
            assert_eq!(validate_category(&req).unwrap().color, DEFAULT_CATEGORY_COLOR);
        }
    }

    #[test]
    fn test_category_keeps_given_color() {
        let req = CategoryRequest {
            name: "meetings".to_string(),
            color: Some("#123abc".to_string()),
        };
        assert_eq!(validate_category(&req).unwrap().color, "#123abc");
    }

    #[test]
    fn test_task_requires_name() {
        assert_eq!(
            validate_task(&TaskRequest::default()),
            Err(ValidationError::missing("name"))
        );
    }

    #[test]
    fn test_task_non_positive_category_means_none() {
        for id in [Some(0), Some(-3), None] {
            let req = TaskRequest {
                name: "Review".to_string(),
                category_id: id,
                description: None,
            };
            assert_eq!(validate_task(&req).unwrap().category_id, None);
        }
        let req = TaskRequest {
            name: "Review".to_string(),
            category_id: Some(2),
            description: Some("weekly".to_string()),
        };
        let task = validate_task(&req).unwrap();
        assert_eq!(task.category_id, Some(2));
        assert_eq!(task.description, "weekly");
    }
}
