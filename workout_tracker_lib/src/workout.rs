use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Variant-specific part of a workout. The headline metric is computed once
/// when the record is built and stored next to the input it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkoutKind {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

/// A single logged exercise session. Immutable once constructed, only ledger
/// membership changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Time-derived, assumed unique within a session.
    pub workout_id: i64,
    pub timestamp: DateTime<Utc>,
    pub position: Point,
    pub distance_km: f64,
    pub duration_min: f64,
    pub kind: WorkoutKind,
}

/// min/km
pub fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// km/h
pub fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

impl WorkoutRecord {
    pub fn running(
        position: Point,
        timestamp: DateTime<Utc>,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Result<Self, ValidationError> {
        let distance_km = check_positive("distance", distance_km)?;
        let duration_min = check_positive("duration", duration_min)?;
        let cadence_spm = check_positive("cadence", cadence_spm)?;

        Ok(Self {
            workout_id: timestamp.timestamp_millis(),
            timestamp,
            position,
            distance_km,
            duration_min,
            kind: WorkoutKind::Running {
                cadence_spm,
                pace_min_per_km: pace_min_per_km(distance_km, duration_min),
            },
        })
    }

    pub fn cycling(
        position: Point,
        timestamp: DateTime<Utc>,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<Self, ValidationError> {
        let distance_km = check_positive("distance", distance_km)?;
        let duration_min = check_positive("duration", duration_min)?;
        // The climb total only has to be a real number. Zero is a flat route,
        // negative a net descent.
        let elevation_gain_m = check_finite("elevation gain", elevation_gain_m)?;

        Ok(Self {
            workout_id: timestamp.timestamp_millis(),
            timestamp,
            position,
            distance_km,
            duration_min,
            kind: WorkoutKind::Cycling {
                elevation_gain_m,
                speed_km_per_h: speed_km_per_h(distance_km, duration_min),
            },
        })
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            WorkoutKind::Running { .. } => "running",
            WorkoutKind::Cycling { .. } => "cycling",
        }
    }

    /// Title line for popups and the side panel, e.g. "Running on April 14".
    pub fn description(&self) -> String {
        let name = match self.kind {
            WorkoutKind::Running { .. } => "Running",
            WorkoutKind::Cycling { .. } => "Cycling",
        };
        format!("{} on {}", name, self.timestamp.format("%B %-d"))
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite(field))
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = check_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn position() -> Point {
        // (lng, lat)
        Point::new(12.0, 39.0)
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 14, 10, 30, 0).unwrap()
    }

    #[test]
    fn running_pace_is_computed_at_construction() {
        let record = WorkoutRecord::running(position(), timestamp(), 5.2, 24.0, 178.0).unwrap();

        let WorkoutKind::Running { pace_min_per_km, cadence_spm } = record.kind else {
            panic!("expected a running workout");
        };
        assert!((pace_min_per_km - 4.615).abs() < 1e-3);
        assert_eq!(cadence_spm, 178.0);
        assert_eq!(record.distance_km, 5.2);
        assert_eq!(record.duration_min, 24.0);
    }

    #[test]
    fn cycling_speed_is_computed_at_construction() {
        let record = WorkoutRecord::cycling(position(), timestamp(), 27.0, 95.0, 523.0).unwrap();

        let WorkoutKind::Cycling { speed_km_per_h, elevation_gain_m } = record.kind else {
            panic!("expected a cycling workout");
        };
        assert!((speed_km_per_h - 17.05).abs() < 1e-2);
        assert_eq!(elevation_gain_m, 523.0);
    }

    #[test]
    fn metric_computation_is_pure() {
        let record = WorkoutRecord::running(position(), timestamp(), 5.2, 24.0, 178.0).unwrap();
        let WorkoutKind::Running { pace_min_per_km: cached, .. } = record.kind else {
            panic!("expected a running workout");
        };

        // Recomputing from the stored inputs always matches the cached value.
        assert_eq!(pace_min_per_km(record.distance_km, record.duration_min), cached);
        assert_eq!(
            pace_min_per_km(record.distance_km, record.duration_min),
            pace_min_per_km(record.distance_km, record.duration_min)
        );
    }

    #[test]
    fn running_rejects_non_positive_inputs() {
        assert_eq!(
            WorkoutRecord::running(position(), timestamp(), -1.0, 24.0, 178.0),
            Err(ValidationError::NotPositive("distance"))
        );
        assert_eq!(
            WorkoutRecord::running(position(), timestamp(), 5.0, 0.0, 178.0),
            Err(ValidationError::NotPositive("duration"))
        );
        assert_eq!(
            WorkoutRecord::running(position(), timestamp(), 5.0, 24.0, 0.0),
            Err(ValidationError::NotPositive("cadence"))
        );
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert_eq!(
            WorkoutRecord::running(position(), timestamp(), f64::NAN, 24.0, 178.0),
            Err(ValidationError::NotFinite("distance"))
        );
        assert_eq!(
            WorkoutRecord::cycling(position(), timestamp(), 27.0, f64::INFINITY, 523.0),
            Err(ValidationError::NotFinite("duration"))
        );
        assert_eq!(
            WorkoutRecord::cycling(position(), timestamp(), 27.0, 95.0, f64::NAN),
            Err(ValidationError::NotFinite("elevation gain"))
        );
    }

    #[test]
    fn cycling_accepts_flat_and_downhill_routes() {
        // Elevation gain is not required to be positive, unlike cadence.
        assert!(WorkoutRecord::cycling(position(), timestamp(), 5.0, 30.0, 0.0).is_ok());
        assert!(WorkoutRecord::cycling(position(), timestamp(), 5.0, 30.0, -120.0).is_ok());
    }

    #[test]
    fn id_is_derived_from_the_creation_time() {
        let record = WorkoutRecord::running(position(), timestamp(), 5.2, 24.0, 178.0).unwrap();
        assert_eq!(record.workout_id, timestamp().timestamp_millis());
    }

    #[test]
    fn position_accessors_undo_the_axis_order() {
        let record = WorkoutRecord::running(position(), timestamp(), 5.2, 24.0, 178.0).unwrap();
        assert_eq!(record.latitude(), 39.0);
        assert_eq!(record.longitude(), 12.0);
    }

    #[test]
    fn description_names_the_variant_and_the_date() {
        let running = WorkoutRecord::running(position(), timestamp(), 5.2, 24.0, 178.0).unwrap();
        assert_eq!(running.description(), "Running on April 14");

        let july = Utc.with_ymd_and_hms(2025, 7, 2, 8, 0, 0).unwrap();
        let cycling = WorkoutRecord::cycling(position(), july, 27.0, 95.0, 523.0).unwrap();
        assert_eq!(cycling.description(), "Cycling on July 2");
        assert_eq!(cycling.type_name(), "cycling");
    }
}
