use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(WorkoutId);

/// A `(latitude, longitude)` pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn google_maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/@{},{},8.25z?entry=ttu",
            self.lat, self.lng
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    /// CSS class the map front-end applies to this type's marker popup.
    pub fn popup_class(self) -> String {
        format!("{}-popup", self.as_str())
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown workout type '{0}'")]
pub struct UnknownWorkoutType(pub String);

impl FromStr for WorkoutType {
    type Err = UnknownWorkoutType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(UnknownWorkoutType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workout_type_round_trips_form_values() {
        assert_eq!("running".parse::<WorkoutType>(), Ok(WorkoutType::Running));
        assert_eq!("cycling".parse::<WorkoutType>(), Ok(WorkoutType::Cycling));
        assert_eq!(WorkoutType::Cycling.to_string(), "cycling");
    }

    #[test]
    fn workout_type_rejects_unknown_values() {
        let err = "swimming".parse::<WorkoutType>().expect_err("unknown type");
        assert_eq!(err, UnknownWorkoutType("swimming".to_string()));
        assert!("Running".parse::<WorkoutType>().is_err());
    }

    #[test]
    fn popup_class_is_derived_from_type() {
        assert_eq!(WorkoutType::Running.popup_class(), "running-popup");
        assert_eq!(WorkoutType::Cycling.popup_class(), "cycling-popup");
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(WorkoutId::generate(), WorkoutId::generate());
    }
}
