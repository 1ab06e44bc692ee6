//! Records exchanged with the ground station REST service.
//!
//! Timestamps arrive either as RFC 3339 strings or as naive ISO datetimes
//! (no offset). Naive values are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::coordinate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AroRequestStatus {
    Pending,
    Scheduled,
    Taken,
    Cancelled,
    Failed,
    Completed,
}

impl AroRequestStatus {
    pub const ALL: [AroRequestStatus; 6] = [
        AroRequestStatus::Pending,
        AroRequestStatus::Scheduled,
        AroRequestStatus::Taken,
        AroRequestStatus::Cancelled,
        AroRequestStatus::Failed,
        AroRequestStatus::Completed,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AroRequestStatus::Pending => "pending",
            AroRequestStatus::Scheduled => "scheduled",
            AroRequestStatus::Taken => "taken",
            AroRequestStatus::Cancelled => "cancelled",
            AroRequestStatus::Failed => "failed",
            AroRequestStatus::Completed => "completed",
        }
    }

    /// Capitalized label used in tables, e.g. `Pending`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AroRequestStatus::Pending => "Pending",
            AroRequestStatus::Scheduled => "Scheduled",
            AroRequestStatus::Taken => "Taken",
            AroRequestStatus::Cancelled => "Cancelled",
            AroRequestStatus::Failed => "Failed",
            AroRequestStatus::Completed => "Completed",
        }
    }

    /// Whether the remote service can still act on a request in this state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AroRequestStatus::Cancelled | AroRequestStatus::Failed | AroRequestStatus::Completed
        )
    }
}

impl std::fmt::Display for AroRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AroRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == lowered)
            .ok_or_else(|| {
                format!(
                    "unknown request status \"{s}\"; expected one of: pending, scheduled, taken, cancelled, failed, completed"
                )
            })
    }
}

/// An imaging request as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AroRequest {
    pub id: i64,
    #[serde(default)]
    pub aro_id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: AroRequestStatus,
    #[serde(deserialize_with = "timestamp::required")]
    pub created_on: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub request_sent_to_obc_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub pic_taken_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub pic_transmitted_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub packet_id: Option<i64>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub cancellable_after: Option<DateTime<Utc>>,
}

impl AroRequest {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// A request may be cancelled once `cancellable_after` has passed and it
    /// has not already reached a terminal state. Requests without a
    /// `cancellable_after` are cancellable immediately.
    #[must_use]
    pub fn is_cancellable_at(&self, now: DateTime<Utc>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.cancellable_after.is_none_or(|after| now >= after)
    }
}

/// Body of `POST /aro-request`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAroRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aro_id: Option<i64>,
}

impl NewAroRequest {
    #[must_use]
    pub fn new(coordinate: Coordinate, aro_id: Option<i64>) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            aro_id,
        }
    }
}

/// One line of the recent-logs feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the most recent response; assigned client-side.
    #[serde(default)]
    pub id: usize,
    pub date: serde_json::Value,
    pub log: String,
}

impl LogEntry {
    /// Renders `date` without JSON quoting when it is a string.
    #[must_use]
    pub fn date_label(&self) -> String {
        match &self.date {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: i64,
    pub value: String,
    #[serde(default)]
    pub telemetry_name: Option<String>,
    #[serde(default)]
    pub telemetry_format: Option<String>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub created_on: Option<DateTime<Utc>>,
}

impl TelemetryRecord {
    /// Telemetry name, or `Type {n}` when the master record was not joined.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.telemetry_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Type {}", self.kind))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionCommand {
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MissionCommandReply {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub call_sign: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Partial update for `PUT /user/profile`. Unset fields keep their current
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub call_sign: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the set fields over `current`.
    #[must_use]
    pub fn apply(self, current: UserProfile) -> UserProfile {
        UserProfile {
            call_sign: self.call_sign.unwrap_or(current.call_sign),
            first_name: self.first_name.unwrap_or(current.first_name),
            last_name: self.last_name.or(current.last_name),
            email: self.email.or(current.email),
            phone_number: self.phone_number.or(current.phone_number),
        }
    }
}

mod timestamp {
    use super::{DateTime, Deserialize, Deserializer, NaiveDateTime, Utc};

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub(super) fn required<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub(super) fn optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
        }
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
