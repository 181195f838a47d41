//! Probe session records.

use chrono::{DateTime, Utc};
use netsonde_types::SpeedtestResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a probe record.
pub type RecordId = Uuid;

/// Status of a recorded probe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// The probe is running (or was interrupted without a final save).
    #[default]
    Running,
    /// The probe completed and produced a result.
    Completed,
    /// The probe failed with an error.
    Failed,
}

impl RecordStatus {
    /// Returns true if the record is in a terminal state.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns the status as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded probe run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeRecord {
    /// Unique identifier for this record.
    pub id: RecordId,
    /// The normalized URL that was probed.
    pub url: String,
    /// When the probe started.
    pub started_at: DateTime<Utc>,
    /// When the probe finished (success or failure).
    pub completed_at: Option<DateTime<Utc>>,
    /// Current status of the run.
    pub status: RecordStatus,
    /// The aggregate result, present once the run completed.
    pub result: Option<SpeedtestResult>,
    /// Error message if the run failed.
    pub error_message: Option<String>,
}

impl ProbeRecord {
    /// Creates a new in-progress record for the given target.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            started_at: Utc::now(),
            completed_at: None,
            status: RecordStatus::Running,
            result: None,
            error_message: None,
        }
    }

    /// Marks the run as completed with its result.
    pub fn mark_completed(&mut self, result: SpeedtestResult) {
        self.status = RecordStatus::Completed;
        self.result = Some(result);
        self.completed_at = Some(Utc::now());
    }

    /// Marks the run as failed.
    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = RecordStatus::Failed;
        self.error_message = Some(error.into());
        self.completed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_running() {
        let record = ProbeRecord::new("https://example.com/data/");
        assert_eq!(record.status, RecordStatus::Running);
        assert!(!record.status.is_finished());
        assert!(record.result.is_none());
        assert!(record.completed_at.is_none());
    }

    #[test]
    fn test_mark_completed() {
        let mut record = ProbeRecord::new("https://example.com/data/");
        record.mark_completed(SpeedtestResult::new(1024, 25_000, 0.5));

        assert_eq!(record.status, RecordStatus::Completed);
        assert!(record.status.is_finished());
        assert!(record.completed_at.is_some());
        assert_eq!(record.result.unwrap().downloaded_bytes, 1024);
    }

    #[test]
    fn test_mark_failed() {
        let mut record = ProbeRecord::new("https://example.com/data/");
        record.mark_failed("connection failed: refused");

        assert_eq!(record.status, RecordStatus::Failed);
        assert_eq!(
            record.error_message.as_deref(),
            Some("connection failed: refused")
        );
        assert!(record.result.is_none());
    }

    #[test]
    fn test_record_serde_round_trip() {
        let mut record = ProbeRecord::new("https://example.com/data/");
        record.mark_completed(SpeedtestResult::new(2048, 13_000, 1.5));

        let json = serde_json::to_string(&record).unwrap();
        let back: ProbeRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, record.id);
        assert_eq!(back.status, RecordStatus::Completed);
        assert_eq!(back.result.unwrap(), record.result.unwrap());
    }
}
