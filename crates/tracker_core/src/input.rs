//! Conversion and validation of raw form values.

use shared::{domain::WorkoutType, error::TrackerError, protocol::RawFormValues};

/// Numeric conversion with the form's historical semantics: surrounding
/// whitespace is ignored, a blank field reads as `0`, anything unparseable
/// reads as NaN.
pub fn parse_numeric_input(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn all_finite(inputs: &[f64]) -> bool {
    inputs.iter().all(|input| input.is_finite())
}

fn all_positive(inputs: &[f64]) -> bool {
    inputs.iter().all(|input| *input > 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub workout_type: WorkoutType,
    pub distance: f64,
    pub duration: f64,
    /// Cadence for running, elevation gain for cycling.
    pub extra: f64,
}

/// Running needs distance, duration and cadence finite and positive.
/// Cycling needs all three finite but only distance and duration positive;
/// elevation may be zero or negative.
pub fn validate_form(values: &RawFormValues) -> Result<ValidatedInput, TrackerError> {
    let workout_type = values
        .workout_type
        .parse::<WorkoutType>()
        .map_err(|_| TrackerError::InvalidInput)?;
    let distance = parse_numeric_input(&values.distance);
    let duration = parse_numeric_input(&values.duration);

    let extra = match workout_type {
        WorkoutType::Running => {
            let cadence = parse_numeric_input(&values.cadence);
            if !all_finite(&[distance, duration, cadence])
                || !all_positive(&[distance, duration, cadence])
            {
                return Err(TrackerError::InvalidInput);
            }
            cadence
        }
        WorkoutType::Cycling => {
            let elevation = parse_numeric_input(&values.elevation);
            if !all_finite(&[distance, duration, elevation])
                || !all_positive(&[distance, duration])
            {
                return Err(TrackerError::InvalidInput);
            }
            elevation
        }
    };

    Ok(ValidatedInput {
        workout_type,
        distance,
        duration,
        extra,
    })
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
