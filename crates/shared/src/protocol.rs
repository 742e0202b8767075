use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, WorkoutType};

/// Events fed into the tracker's queue by the map and form wiring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum TrackerEvent {
    MapClicked { coordinate: Coordinate },
    WorkoutTypeChanged,
    FormSubmitted,
}

/// Raw form field values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFormValues {
    pub workout_type: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRequest {
    pub coordinate: Coordinate,
    pub workout_type: WorkoutType,
    pub popup: PopupOptions,
    pub content: String,
}
