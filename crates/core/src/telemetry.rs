//! Telemetry batch validation and trend windows.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CoreError, FieldViolation};
use crate::types::Timestamp;

/// Maximum number of events accepted in one batch.
pub const MAX_EVENT_BATCH: usize = 100;

/// Maximum length of an event type tag in characters.
pub const MAX_EVENT_TYPE_LENGTH: usize = 64;

/// Default number of events returned by a listing.
pub const DEFAULT_EVENT_LIST_LIMIT: i64 = 50;

/// Upper bound on the number of events returned by a listing.
pub const MAX_EVENT_LIST_LIMIT: i64 = 100;

/// One event as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub payload: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A validated event ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTelemetryEvent {
    pub event_type: String,
    pub payload: Option<Value>,
    pub created_at: Timestamp,
}

/// Validate a whole batch before anything is written.
///
/// A single malformed record rejects the batch; every offending record is
/// reported. Records without a timestamp are stamped with `now`.
pub fn validate_batch(
    items: Vec<EventItem>,
    now: Timestamp,
) -> Result<Vec<NewTelemetryEvent>, CoreError> {
    if items.len() > MAX_EVENT_BATCH {
        return Err(CoreError::Validation(format!(
            "A batch may contain at most {MAX_EVENT_BATCH} events (got {})",
            items.len()
        )));
    }

    let mut violations = Vec::new();
    let mut accepted = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let type_len = item.event_type.chars().count();
        if item.event_type.trim().is_empty() {
            violations.push(FieldViolation::new(
                format!("events[{index}].type"),
                "must not be empty",
            ));
        } else if type_len > MAX_EVENT_TYPE_LENGTH {
            violations.push(FieldViolation::new(
                format!("events[{index}].type"),
                format!("must be at most {MAX_EVENT_TYPE_LENGTH} characters"),
            ));
        }

        let payload = match item.payload {
            None | Some(Value::Null) => None,
            Some(obj @ Value::Object(_)) => Some(obj),
            Some(_) => {
                violations.push(FieldViolation::new(
                    format!("events[{index}].payload"),
                    "must be a JSON object",
                ));
                None
            }
        };

        accepted.push(NewTelemetryEvent {
            event_type: item.event_type,
            payload,
            created_at: item.created_at.unwrap_or(now),
        });
    }

    if violations.is_empty() {
        Ok(accepted)
    } else {
        Err(CoreError::InvalidFields(violations))
    }
}

/// Page size for an event listing.
///
/// Absent means [`DEFAULT_EVENT_LIST_LIMIT`]; anything below one lists a
/// single event and anything above [`MAX_EVENT_LIST_LIMIT`] is capped.
pub fn event_list_limit(requested: Option<i64>) -> i64 {
    match requested {
        None => DEFAULT_EVENT_LIST_LIMIT,
        Some(n) => n.clamp(1, MAX_EVENT_LIST_LIMIT),
    }
}

// ---------------------------------------------------------------------------
// Trend windows
// ---------------------------------------------------------------------------

/// Trailing window for a trend summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendRange {
    #[default]
    SevenDays,
    ThirtyDays,
}

impl TrendRange {
    /// Parse the `range` query value; absent means seven days.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw {
            None | Some("7d") => Ok(Self::SevenDays),
            Some("30d") => Ok(Self::ThirtyDays),
            Some(other) => Err(CoreError::Validation(format!(
                "Invalid range '{other}'. Must be one of: 7d, 30d"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
        }
    }

    /// Inclusive start of the window ending at `now`.
    pub fn window_start(self, now: Timestamp) -> Timestamp {
        now - chrono::Duration::days(self.days())
    }
}
