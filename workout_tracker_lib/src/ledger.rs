use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::workout::WorkoutRecord;

/// The session's workouts, append-only and in submission order. Records are
/// never removed or reordered, and nothing survives a reload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLedger {
    records: Vec<WorkoutRecord>,
}

impl WorkoutLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and logs a running workout. On failure the ledger is left
    /// untouched.
    pub fn create_running(
        &mut self,
        position: Point,
        timestamp: DateTime<Utc>,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Result<&WorkoutRecord, ValidationError> {
        let record =
            WorkoutRecord::running(position, timestamp, distance_km, duration_min, cadence_spm)?;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Validates and logs a cycling workout. On failure the ledger is left
    /// untouched.
    pub fn create_cycling(
        &mut self,
        position: Point,
        timestamp: DateTime<Utc>,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<&WorkoutRecord, ValidationError> {
        let record = WorkoutRecord::cycling(
            position,
            timestamp,
            distance_km,
            duration_min,
            elevation_gain_m,
        )?;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Ids are time-derived and assumed unique within a session, so no
    /// duplicate check is made.
    pub fn append(&mut self, record: WorkoutRecord) {
        self.records.push(record);
    }

    /// All records in the order they were submitted.
    pub fn all(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::WorkoutKind;
    use chrono::TimeZone;

    fn position() -> Point {
        Point::new(10.196123, 56.175188)
    }

    fn timestamp(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 14, 10, minute, 0).unwrap()
    }

    #[test]
    fn records_keep_submission_order() {
        let mut ledger = WorkoutLedger::new();
        ledger
            .create_running(position(), timestamp(0), 5.2, 24.0, 178.0)
            .unwrap();
        ledger
            .create_cycling(position(), timestamp(1), 27.0, 95.0, 523.0)
            .unwrap();
        ledger
            .create_running(position(), timestamp(2), 10.0, 55.0, 170.0)
            .unwrap();

        let kinds: Vec<&str> = ledger.all().iter().map(|r| r.type_name()).collect();
        assert_eq!(kinds, ["running", "cycling", "running"]);

        let ids: Vec<i64> = ledger.all().iter().map(|r| r.workout_id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn rejected_input_leaves_the_ledger_empty() {
        let mut ledger = WorkoutLedger::new();
        let result = ledger.create_running(position(), timestamp(0), -1.0, 24.0, 178.0);

        assert_eq!(result, Err(ValidationError::NotPositive("distance")));
        assert!(ledger.is_empty());
    }

    #[test]
    fn create_returns_the_stored_record() {
        let mut ledger = WorkoutLedger::new();
        let record = ledger
            .create_cycling(position(), timestamp(0), 27.0, 95.0, 523.0)
            .unwrap();

        assert!(matches!(record.kind, WorkoutKind::Cycling { .. }));
        assert_eq!(ledger.all().last(), Some(&ledger.all()[0]));
    }

    #[test]
    fn duplicate_ids_are_not_rejected() {
        // Two submissions within the same millisecond share an id; the ledger
        // keeps both.
        let mut ledger = WorkoutLedger::new();
        ledger
            .create_running(position(), timestamp(0), 5.2, 24.0, 178.0)
            .unwrap();
        ledger
            .create_running(position(), timestamp(0), 8.0, 40.0, 165.0)
            .unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.all()[0].workout_id, ledger.all()[1].workout_id);
    }
}
