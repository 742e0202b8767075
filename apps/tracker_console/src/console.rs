//! Terminal implementations of the tracker's map, form, alert and position
//! collaborators.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use shared::{
    domain::{Coordinate, WorkoutType},
    error::{GeolocationError, Notice},
    protocol::{MarkerRequest, RawFormValues},
};
use tracker_core::{ClickSink, FormSurface, GeolocationProvider, MapWidget, Notifier};

use crate::commands::FormField;

pub struct DeniedGeolocation;

#[async_trait]
impl GeolocationProvider for DeniedGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}

/// The map's click listener slot, shared with the stdin reader that plays
/// the part of the pointer.
#[derive(Clone, Default)]
pub struct ClickSlot(Arc<Mutex<Option<ClickSink>>>);

impl ClickSlot {
    fn lock(&self) -> MutexGuard<'_, Option<ClickSink>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns `false` when no map is listening.
    pub fn click(&self, coordinate: Coordinate) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|sink| sink.clicked(coordinate))
    }

    pub fn close(&self) {
        self.lock().take();
    }
}

pub struct ConsoleMap {
    clicks: ClickSlot,
}

impl ConsoleMap {
    pub fn new(clicks: ClickSlot) -> Self {
        Self { clicks }
    }
}

impl MapWidget for ConsoleMap {
    fn create_map(&mut self, center: Coordinate, zoom_level: u8) {
        println!("[map] centered at {center} (zoom {zoom_level})");
    }

    fn add_tile_layer(&mut self, url: &str, attribution: &str) {
        tracing::debug!(url, attribution, "tile layer added");
    }

    fn register_click_listener(&mut self, sink: ClickSink) {
        *self.clicks.lock() = Some(sink);
    }

    fn place_marker(&mut self, marker: &MarkerRequest) {
        println!(
            "[map] marker at {} <{}> \"{}\"",
            marker.coordinate, marker.popup.class_name, marker.content
        );
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub values: RawFormValues,
    pub visible: bool,
    pub elevation_row_visible: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: RawFormValues {
                workout_type: WorkoutType::Running.to_string(),
                ..RawFormValues::default()
            },
            visible: false,
            elevation_row_visible: false,
        }
    }
}

/// Form contents shared between the tracker and the stdin reader typing
/// into it.
#[derive(Clone, Default)]
pub struct SharedForm(Arc<Mutex<FormState>>);

impl SharedForm {
    pub fn lock(&self) -> MutexGuard<'_, FormState> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_field(&self, field: &FormField, value: String) {
        let mut state = self.lock();
        let slot = match field {
            FormField::Distance => &mut state.values.distance,
            FormField::Duration => &mut state.values.duration,
            FormField::Cadence => &mut state.values.cadence,
            FormField::Elevation => &mut state.values.elevation,
        };
        *slot = value;
    }

    /// Returns `true` when the selection actually changed, which is when
    /// the select element fires its change event.
    pub fn select_type(&self, workout_type: String) -> bool {
        let mut state = self.lock();
        if state.values.workout_type == workout_type {
            return false;
        }
        state.values.workout_type = workout_type;
        true
    }
}

pub struct ConsoleForm {
    form: SharedForm,
}

impl ConsoleForm {
    pub fn new(form: SharedForm) -> Self {
        Self { form }
    }
}

impl FormSurface for ConsoleForm {
    fn read_values(&self) -> RawFormValues {
        self.form.lock().values.clone()
    }

    fn show(&mut self) {
        self.form.lock().visible = true;
        println!("[form] open");
    }

    fn hide(&mut self) {
        self.form.lock().visible = false;
        println!("[form] closed");
    }

    fn clear(&mut self) {
        let mut state = self.form.lock();
        state.values.distance.clear();
        state.values.duration.clear();
        state.values.cadence.clear();
        state.values.elevation.clear();
    }

    fn toggle_secondary_field(&mut self) {
        let mut state = self.form.lock();
        state.elevation_row_visible = !state.elevation_row_visible;
        let shown = if state.elevation_row_visible {
            "elevation"
        } else {
            "cadence"
        };
        println!("[form] showing {shown} field");
    }

    fn focus_distance_field(&mut self) {
        tracing::debug!("distance field focused");
    }
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: &Notice) {
        eprintln!("[alert] {}", notice.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_starts_hidden_with_running_selected() {
        let form = SharedForm::default();
        let state = form.lock();
        assert!(!state.visible);
        assert!(!state.elevation_row_visible);
        assert_eq!(state.values.workout_type, "running");
    }

    #[test]
    fn selecting_same_type_does_not_fire_change() {
        let form = SharedForm::default();
        assert!(!form.select_type("running".into()));
        assert!(form.select_type("cycling".into()));
        assert!(!form.select_type("cycling".into()));
    }

    #[test]
    fn clear_keeps_selected_type() {
        let shared = SharedForm::default();
        shared.select_type("cycling".into());
        shared.set_field(&FormField::Distance, "20".into());
        shared.set_field(&FormField::Elevation, "400".into());

        let mut form = ConsoleForm::new(shared.clone());
        form.show();
        form.toggle_secondary_field();
        assert!(shared.lock().elevation_row_visible);

        form.clear();
        form.hide();
        let values = form.read_values();
        assert_eq!(values.workout_type, "cycling");
        assert!(values.distance.is_empty());
        assert!(values.elevation.is_empty());
        assert!(!shared.lock().visible);
    }

    #[test]
    fn click_slot_without_listener_reports_no_map() {
        let slot = ClickSlot::default();
        assert!(!slot.click(Coordinate::new(1.0, 2.0)));
        slot.close();
    }
}
