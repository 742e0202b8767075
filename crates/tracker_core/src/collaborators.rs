//! Seams between the controller and the environment it runs in: the map
//! widget, the workout form, the position source and the alert surface.

use async_trait::async_trait;
use shared::{
    domain::Coordinate,
    error::{GeolocationError, Notice},
    protocol::{MarkerRequest, RawFormValues, TrackerEvent},
};
use tokio::sync::{mpsc, oneshot};

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// One-shot request. No timeout is applied on the controller side.
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Stand-in for environments with no position source at all.
pub struct MissingGeolocation;

#[async_trait]
impl GeolocationProvider for MissingGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

pub struct FixedGeolocation(pub Coordinate);

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Ok(self.0)
    }
}

pub trait MapWidget: Send {
    fn create_map(&mut self, center: Coordinate, zoom_level: u8);
    fn add_tile_layer(&mut self, url: &str, attribution: &str);
    fn register_click_listener(&mut self, sink: ClickSink);
    fn place_marker(&mut self, marker: &MarkerRequest);
}

pub trait FormSurface: Send {
    fn read_values(&self) -> RawFormValues;
    fn show(&mut self);
    fn hide(&mut self);
    fn clear(&mut self);
    /// Swaps visibility of the cadence and elevation rows.
    fn toggle_secondary_field(&mut self);
    fn focus_distance_field(&mut self);
}

pub trait Notifier: Send {
    fn notify(&mut self, notice: &Notice);
}

/// An event plus an optional signal fired once its handler has returned.
#[derive(Debug)]
pub(crate) struct QueuedEvent {
    pub(crate) event: TrackerEvent,
    pub(crate) handled: Option<oneshot::Sender<()>>,
}

/// Cloneable handle that feeds events into a tracker's queue.
#[derive(Debug, Clone)]
pub struct TrackerEventSender {
    tx: mpsc::UnboundedSender<QueuedEvent>,
}

impl TrackerEventSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<QueuedEvent>) -> Self {
        Self { tx }
    }

    /// Returns `false` once the tracker has stopped listening.
    pub fn send(&self, event: TrackerEvent) -> bool {
        self.tx
            .send(QueuedEvent {
                event,
                handled: None,
            })
            .is_ok()
    }

    fn send_tracked(&self, event: TrackerEvent) -> Option<oneshot::Receiver<()>> {
        let (handled, done) = oneshot::channel();
        self.tx
            .send(QueuedEvent {
                event,
                handled: Some(handled),
            })
            .ok()
            .map(|_| done)
    }

    /// Queues `event` and waits until the tracker has finished handling it.
    /// Returns `false` if the tracker stopped before getting to it.
    pub async fn send_and_wait(&self, event: TrackerEvent) -> bool {
        match self.send_tracked(event) {
            Some(done) => done.await.is_ok(),
            None => false,
        }
    }

    /// Blocking form of [`TrackerEventSender::send_and_wait`] for input
    /// readers running outside the async runtime.
    pub fn blocking_send_and_wait(&self, event: TrackerEvent) -> bool {
        match self.send_tracked(event) {
            Some(done) => done.blocking_recv().is_ok(),
            None => false,
        }
    }
}

/// Click listener handed to the map once it has been created.
#[derive(Debug, Clone)]
pub struct ClickSink {
    events: TrackerEventSender,
}

impl ClickSink {
    pub(crate) fn new(events: TrackerEventSender) -> Self {
        Self { events }
    }

    pub fn clicked(&self, coordinate: Coordinate) -> bool {
        self.events.send(TrackerEvent::MapClicked { coordinate })
    }
}
