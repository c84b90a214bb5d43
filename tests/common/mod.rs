//! Shared fixtures for integration tests
//!
//! Builds in-memory sources that look like real short robot recordings,
//! with wall-clock timestamps, schemas, and publisher metadata.

use std::sync::Once;

use chrono::{TimeZone, Utc};
use serde_json::json;

use logplay::{MemoryLogSource, MessageEvent, PlayerProblem, Timestamp};

static INIT_TRACING: Once = Once::new();

/// Route test log output through tracing, once per process.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A wall-clock instant `offset_secs` into the recording session.
pub fn session_time(offset_secs: i64) -> Timestamp {
    let base = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .expect("valid fixture date");
    Timestamp::from_utc(base + chrono::Duration::seconds(offset_secs))
}

/// First half of a drive: /imu at 1 Hz and /gps every 5 s over [0, 10].
pub fn drive_first_leg() -> MemoryLogSource {
    let mut messages = Vec::new();
    for offset in 0..=10 {
        messages.push(imu_message(offset));
    }
    for offset in [0, 5, 10] {
        messages.push(gps_message(offset));
    }
    MemoryLogSource::new()
        .with_messages(messages)
        .with_profile("ros1")
        .with_datatype("sensor_msgs/Imu", json!({"fields": ["orientation", "angular_velocity"]}))
        .with_datatype("sensor_msgs/NavSatFix", json!({"fields": ["latitude", "longitude"]}))
        .with_publishers("/imu", ["imu_driver"])
        .with_publishers("/gps", ["gps_driver"])
}

/// Second half of the drive over [11, 20], same topics plus /diagnostics,
/// and a recording problem the merge should surface.
pub fn drive_second_leg() -> MemoryLogSource {
    let mut messages = Vec::new();
    for offset in 11..=20 {
        messages.push(imu_message(offset));
    }
    for offset in [15, 20] {
        messages.push(gps_message(offset));
    }
    messages.push(
        MessageEvent::new("/diagnostics", session_time(12), json!({"level": "warn"}))
            .with_schema("diagnostic_msgs/DiagnosticArray"),
    );
    MemoryLogSource::new()
        .with_messages(messages)
        .with_profile("ros1")
        .with_datatype("sensor_msgs/Imu", json!({"fields": ["orientation", "angular_velocity"]}))
        .with_datatype("diagnostic_msgs/DiagnosticArray", json!({"fields": ["status"]}))
        .with_publishers("/imu", ["imu_driver", "imu_driver_backup"])
        .with_problem(PlayerProblem::warn("dropped 3 chunks near 09:30:12"))
}

pub fn imu_message(offset_secs: i64) -> MessageEvent {
    MessageEvent::new(
        "/imu",
        session_time(offset_secs),
        json!({"orientation": {"w": 1.0}, "seq": offset_secs}),
    )
    .with_schema("sensor_msgs/Imu")
    .with_size(324)
}

pub fn gps_message(offset_secs: i64) -> MessageEvent {
    MessageEvent::new(
        "/gps",
        session_time(offset_secs),
        json!({"latitude": 47.6, "longitude": -122.3, "seq": offset_secs}),
    )
    .with_schema("sensor_msgs/NavSatFix")
    .with_size(88)
}
