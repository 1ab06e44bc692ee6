use chrono::{Duration, TimeZone};

use super::*;

fn sample_request() -> AroRequest {
    serde_json::from_value(serde_json::json!({
        "id": 7,
        "aro_id": 3,
        "latitude": 43.4723,
        "longitude": -80.5449,
        "status": "pending",
        "created_on": "2025-03-01T12:00:00",
        "request_sent_to_obc_on": null,
        "pic_taken_on": null,
        "pic_transmitted_on": null,
        "packet_id": null,
        "cancellable_after": "2025-03-01T12:30:00Z"
    }))
    .expect("request should deserialize")
}

#[test]
fn status_round_trips_lowercase() {
    let json = serde_json::to_string(&AroRequestStatus::Scheduled).unwrap();
    assert_eq!(json, "\"scheduled\"");
    let parsed: AroRequestStatus = serde_json::from_str("\"taken\"").unwrap();
    assert_eq!(parsed, AroRequestStatus::Taken);
}

#[test]
fn status_from_str_is_case_insensitive() {
    assert_eq!(
        "Completed".parse::<AroRequestStatus>().unwrap(),
        AroRequestStatus::Completed
    );
    assert!("archived".parse::<AroRequestStatus>().is_err());
}

#[test]
fn status_label_is_capitalized() {
    assert_eq!(AroRequestStatus::Cancelled.label(), "Cancelled");
}

#[test]
fn request_accepts_naive_and_offset_timestamps() {
    let req = sample_request();
    assert_eq!(
        req.created_on,
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    );
    assert_eq!(
        req.cancellable_after,
        Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap())
    );
    assert!(req.pic_taken_on.is_none());
}

#[test]
fn request_tolerates_missing_optional_fields() {
    let req: AroRequest = serde_json::from_value(serde_json::json!({
        "id": 1,
        "latitude": 0.0,
        "longitude": 0.0,
        "status": "failed",
        "created_on": "2025-03-01 08:15:00"
    }))
    .unwrap();
    assert!(req.aro_id.is_none());
    assert!(req.cancellable_after.is_none());
}

#[test]
fn request_rejects_garbage_timestamp() {
    let result: Result<AroRequest, _> = serde_json::from_value(serde_json::json!({
        "id": 1,
        "latitude": 0.0,
        "longitude": 0.0,
        "status": "pending",
        "created_on": "yesterday"
    }));
    assert!(result.is_err());
}

#[test]
fn cancellable_only_after_threshold() {
    let req = sample_request();
    let after = req.cancellable_after.unwrap();
    assert!(!req.is_cancellable_at(after - Duration::seconds(1)));
    assert!(req.is_cancellable_at(after));
}

#[test]
fn terminal_requests_are_never_cancellable() {
    let mut req = sample_request();
    req.status = AroRequestStatus::Completed;
    req.cancellable_after = None;
    assert!(!req.is_cancellable_at(Utc::now()));
}

#[test]
fn new_request_omits_missing_aro_id() {
    let coord = Coordinate::new(10.0, 20.0).unwrap();
    let body = serde_json::to_value(NewAroRequest::new(coord, None)).unwrap();
    assert_eq!(body, serde_json::json!({ "latitude": 10.0, "longitude": 20.0 }));
}

#[test]
fn telemetry_display_name_falls_back_to_type() {
    let record: TelemetryRecord = serde_json::from_value(serde_json::json!({
        "id": 1,
        "type": 4,
        "value": "3.3"
    }))
    .unwrap();
    assert_eq!(record.display_name(), "Type 4");
}

#[test]
fn log_date_label_strips_quotes() {
    let entry = LogEntry {
        id: 0,
        date: serde_json::json!("2025-03-01 10:00"),
        log: "boot".to_string(),
    };
    assert_eq!(entry.date_label(), "2025-03-01 10:00");

    let numeric = LogEntry {
        id: 1,
        date: serde_json::json!(1_700_000_000),
        log: "tick".to_string(),
    };
    assert_eq!(numeric.date_label(), "1700000000");
}

#[test]
fn profile_update_merges_set_fields_only() {
    let current = UserProfile {
        call_sign: "VE3ABC".to_string(),
        first_name: "Ada".to_string(),
        last_name: Some("Lovelace".to_string()),
        email: None,
        phone_number: None,
    };
    let update = ProfileUpdate {
        email: Some("ada@example.com".to_string()),
        ..ProfileUpdate::default()
    };
    let merged = update.apply(current);
    assert_eq!(merged.call_sign, "VE3ABC");
    assert_eq!(merged.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(merged.email.as_deref(), Some("ada@example.com"));
}

#[test]
fn empty_profile_update_is_detected() {
    assert!(ProfileUpdate::default().is_empty());
}
