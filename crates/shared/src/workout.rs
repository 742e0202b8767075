//! Recorded workouts and their type-specific derived metrics.
//!
//! Constructors trust their inputs: `distance > 0` and `duration > 0` are
//! checked by the tracker controller before anything here is called.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, WorkoutId, WorkoutType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkoutKind {
    Running {
        /// Steps per minute.
        cadence: f64,
        /// Minutes per kilometer.
        pace: f64,
    },
    Cycling {
        /// Meters climbed.
        elevation_gain: f64,
        speed: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinate: Coordinate,
    /// Kilometers.
    distance: f64,
    /// Minutes.
    duration: f64,
    #[serde(flatten)]
    kind: WorkoutKind,
}

impl Workout {
    pub fn running(coordinate: Coordinate, distance: f64, duration: f64, cadence: f64) -> Self {
        let pace = duration / distance;
        Self::build(
            coordinate,
            distance,
            duration,
            WorkoutKind::Running { cadence, pace },
        )
    }

    pub fn cycling(
        coordinate: Coordinate,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        // Duration is in minutes.
        let speed = distance / duration / 60.0;
        Self::build(
            coordinate,
            distance,
            duration,
            WorkoutKind::Cycling {
                elevation_gain,
                speed,
            },
        )
    }

    fn build(coordinate: Coordinate, distance: f64, duration: f64, kind: WorkoutKind) -> Self {
        Self {
            id: WorkoutId::generate(),
            created_at: Utc::now(),
            coordinate,
            distance,
            duration,
            kind,
        }
    }

    pub fn id(&self) -> WorkoutId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self.kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }

    /// Popup label such as `Running on April 14`.
    pub fn description(&self) -> String {
        format!(
            "{} on {}",
            self.workout_type().label(),
            self.created_at.format("%B %-d")
        )
    }
}

/// Builds the variant named by `workout_type`. `extra` is the cadence for
/// running and the elevation gain for cycling.
pub fn create_workout(
    workout_type: WorkoutType,
    coordinate: Coordinate,
    distance: f64,
    duration: f64,
    extra: f64,
) -> Workout {
    match workout_type {
        WorkoutType::Running => Workout::running(coordinate, distance, duration, extra),
        WorkoutType::Cycling => Workout::cycling(coordinate, distance, duration, extra),
    }
}

#[cfg(test)]
#[path = "tests/workout_tests.rs"]
mod tests;
