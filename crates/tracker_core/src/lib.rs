//! Tracker controller: turns map clicks and form submissions into recorded
//! workouts and map markers.

use std::sync::Arc;

use shared::{
    domain::Coordinate,
    error::{Notice, TrackerError},
    protocol::{MarkerRequest, TrackerEvent},
    workout::{create_workout, Workout},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub mod collaborators;
pub mod config;
pub mod input;

use collaborators::QueuedEvent;
pub use collaborators::{
    ClickSink, FixedGeolocation, FormSurface, GeolocationProvider, MapWidget, MissingGeolocation,
    Notifier, TrackerEventSender,
};
pub use config::{load_settings, TrackerSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// Waiting on the position request issued by [`Tracker::start`].
    AcquiringPosition,
    /// The position request failed; the map stays unusable for this session.
    PositionUnavailable,
    Idle,
    AwaitingFormInput,
}

impl TrackerPhase {
    pub fn map_ready(self) -> bool {
        matches!(self, Self::Idle | Self::AwaitingFormInput)
    }
}

pub struct TrackerParts {
    pub geolocation: Arc<dyn GeolocationProvider>,
    pub map: Box<dyn MapWidget>,
    pub form: Box<dyn FormSurface>,
    pub notifier: Box<dyn Notifier>,
}

pub struct Tracker {
    settings: TrackerSettings,
    geolocation: Arc<dyn GeolocationProvider>,
    map: Box<dyn MapWidget>,
    form: Box<dyn FormSurface>,
    notifier: Box<dyn Notifier>,
    phase: TrackerPhase,
    // Kept after a successful submit; only a new click replaces it.
    pending: Option<Coordinate>,
    workouts: Vec<Workout>,
    events_tx: TrackerEventSender,
    events_rx: mpsc::UnboundedReceiver<QueuedEvent>,
}

impl Tracker {
    pub fn new(settings: TrackerSettings, parts: TrackerParts) -> Self {
        let (tx, events_rx) = mpsc::unbounded_channel();
        Self {
            settings,
            geolocation: parts.geolocation,
            map: parts.map,
            form: parts.form,
            notifier: parts.notifier,
            phase: TrackerPhase::AcquiringPosition,
            pending: None,
            workouts: Vec::new(),
            events_tx: TrackerEventSender::new(tx),
            events_rx,
        }
    }

    /// Sender for form wiring. The tracker keeps its own clone for the map's
    /// click listener until [`Tracker::run`] starts.
    pub fn event_sender(&self) -> TrackerEventSender {
        self.events_tx.clone()
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn pending_coordinate(&self) -> Option<Coordinate> {
        self.pending
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Requests the current position and, on success, brings up the map.
    /// A failure is reported once and not retried.
    pub async fn start(&mut self) -> Result<(), TrackerError> {
        self.phase = TrackerPhase::AcquiringPosition;
        match self.geolocation.current_position().await {
            Ok(position) => {
                self.load_map(position);
                Ok(())
            }
            Err(source) => {
                warn!(error = %source, "geolocation request failed");
                self.phase = TrackerPhase::PositionUnavailable;
                let err = TrackerError::EnvironmentUnavailable(source);
                self.notifier.notify(&Notice::from(&err));
                Err(err)
            }
        }
    }

    fn load_map(&mut self, position: Coordinate) {
        info!(
            lat = position.lat,
            lng = position.lng,
            url = %position.google_maps_url(),
            "current position acquired"
        );

        self.map.create_map(position, self.settings.zoom_level);
        self.map
            .add_tile_layer(&self.settings.tile_url, &self.settings.tile_attribution);
        self.map
            .register_click_listener(ClickSink::new(self.events_tx.clone()));
        self.phase = TrackerPhase::Idle;
    }

    pub fn handle_map_click(&mut self, coordinate: Coordinate) -> Result<(), TrackerError> {
        if !self.phase.map_ready() {
            warn!(%coordinate, phase = ?self.phase, "ignoring click before map is ready");
            return Err(TrackerError::MapNotReady);
        }

        debug!(%coordinate, "map clicked; opening workout form");
        self.pending = Some(coordinate);
        self.form.show();
        self.form.focus_distance_field();
        self.phase = TrackerPhase::AwaitingFormInput;
        Ok(())
    }

    pub fn handle_type_changed(&mut self) {
        debug!("workout type changed; toggling secondary field");
        self.form.toggle_secondary_field();
    }

    /// Validates the form and records a workout at the pending coordinate.
    /// On invalid input the user is notified and nothing else changes.
    pub fn handle_submit(&mut self) -> Result<&Workout, TrackerError> {
        let values = self.form.read_values();
        let input = match input::validate_form(&values) {
            Ok(input) => input,
            Err(err) => {
                warn!(workout_type = %values.workout_type, "rejected workout submission");
                self.notifier.notify(&Notice::from(&err));
                return Err(err);
            }
        };

        let Some(coordinate) = self.pending else {
            warn!("workout submitted before any map location was selected");
            return Err(TrackerError::NoPendingCoordinate);
        };

        let workout = create_workout(
            input.workout_type,
            coordinate,
            input.distance,
            input.duration,
            input.extra,
        );
        info!(
            id = %workout.id(),
            workout_type = %workout.workout_type(),
            %coordinate,
            "workout recorded"
        );
        debug!(?workout, "recorded workout details");

        self.render_workout_marker(&workout);
        let index = self.workouts.len();
        self.workouts.push(workout);

        self.form.clear();
        self.form.hide();
        self.phase = TrackerPhase::Idle;

        Ok(&self.workouts[index])
    }

    fn render_workout_marker(&mut self, workout: &Workout) {
        let workout_type = workout.workout_type();
        self.map.place_marker(&MarkerRequest {
            coordinate: workout.coordinate(),
            workout_type,
            popup: self.settings.popup_options(workout_type),
            content: workout.description(),
        });
    }

    /// Failures are reported to the user by the handlers themselves.
    pub fn handle_event(&mut self, event: TrackerEvent) {
        match event {
            TrackerEvent::MapClicked { coordinate } => {
                let _ = self.handle_map_click(coordinate);
            }
            TrackerEvent::WorkoutTypeChanged => self.handle_type_changed(),
            TrackerEvent::FormSubmitted => {
                let _ = self.handle_submit();
            }
        }
    }

    /// Handles queued events one at a time until every sender is gone, then
    /// returns the workouts recorded during the session.
    pub async fn run(mut self) -> Vec<Workout> {
        // Swap out our own sender so the loop ends once the wiring is done;
        // the map's click sink still holds a clone while it is alive.
        self.events_tx = TrackerEventSender::new(mpsc::unbounded_channel().0);

        while let Some(QueuedEvent { event, handled }) = self.events_rx.recv().await {
            self.handle_event(event);
            if let Some(handled) = handled {
                let _ = handled.send(());
            }
        }

        info!(count = self.workouts.len(), "tracker session ended");
        self.workouts
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
