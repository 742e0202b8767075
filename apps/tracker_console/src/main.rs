use std::{io::BufRead, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use shared::{domain::Coordinate, protocol::TrackerEvent};
use tracing_subscriber::EnvFilter;
use tracker_core::{
    config::DEFAULT_SETTINGS_FILE, load_settings, FixedGeolocation, GeolocationProvider,
    MissingGeolocation, Tracker, TrackerEventSender, TrackerParts,
};

mod commands;
mod console;

use commands::{parse_command, ConsoleCommand, HELP};
use console::{
    ClickSlot, ConsoleForm, ConsoleMap, ConsoleNotifier, DeniedGeolocation, SharedForm,
};

#[derive(Parser, Debug)]
#[command(about = "Record running and cycling workouts on a map from the terminal")]
struct Args {
    /// Latitude reported as the current position.
    #[arg(long, default_value_t = 51.5, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude reported as the current position.
    #[arg(long, default_value_t = -0.1, allow_hyphen_values = true)]
    lng: f64,
    /// Simulate the user refusing the position request.
    #[arg(long, conflicts_with = "no_geolocation")]
    deny_location: bool,
    /// Simulate an environment without geolocation support.
    #[arg(long)]
    no_geolocation: bool,
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
}

impl Args {
    fn geolocation(&self) -> Arc<dyn GeolocationProvider> {
        if self.deny_location {
            Arc::new(DeniedGeolocation)
        } else if self.no_geolocation {
            Arc::new(MissingGeolocation)
        } else {
            Arc::new(FixedGeolocation(Coordinate::new(self.lat, self.lng)))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = load_settings(&args.config);

    let clicks = ClickSlot::default();
    let form = SharedForm::default();
    let mut tracker = Tracker::new(
        settings,
        TrackerParts {
            geolocation: args.geolocation(),
            map: Box::new(ConsoleMap::new(clicks.clone())),
            form: Box::new(ConsoleForm::new(form.clone())),
            notifier: Box::new(ConsoleNotifier),
        },
    );

    if let Err(err) = tracker.start().await {
        tracing::warn!(error = %err, "continuing without a usable map");
    }
    println!("{HELP}");

    let events = tracker.event_sender();
    let input = tokio::task::spawn_blocking(move || {
        read_commands(std::io::stdin().lock(), events, clicks, form)
    });

    let workouts = tracker.run().await;
    input.await.context("stdin reader task failed")??;

    println!("session ended with {} workout(s)", workouts.len());
    for workout in &workouts {
        tracing::debug!(
            workout = %serde_json::to_string(workout).context("failed to encode workout")?,
            "session workout"
        );
    }
    Ok(())
}

fn read_commands(
    input: impl BufRead,
    events: TrackerEventSender,
    clicks: ClickSlot,
    form: SharedForm,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(ConsoleCommand::Click(coordinate)) => {
                if !clicks.click(coordinate) {
                    println!("the map is not available");
                }
            }
            Ok(ConsoleCommand::SelectType(workout_type)) => {
                if form.select_type(workout_type) {
                    events.send(TrackerEvent::WorkoutTypeChanged);
                }
            }
            Ok(ConsoleCommand::SetField { field, value }) => form.set_field(&field, value),
            Ok(ConsoleCommand::Submit) => {
                // The handler reads and clears the form; typing on before it
                // returns would race it.
                if !events.blocking_send_and_wait(TrackerEvent::FormSubmitted) {
                    break;
                }
            }
            Ok(ConsoleCommand::Help) => println!("{HELP}"),
            Ok(ConsoleCommand::Quit) => break,
            Err(message) => println!("{message}"),
        }
    }

    // Releasing both senders lets the tracker's event loop finish.
    clicks.close();
    drop(events);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tracker_core::TrackerSettings;

    #[tokio::test]
    async fn back_to_back_submissions_each_record_their_own_values() {
        let clicks = ClickSlot::default();
        let form = SharedForm::default();
        let mut tracker = Tracker::new(
            TrackerSettings::default(),
            TrackerParts {
                geolocation: Arc::new(FixedGeolocation(Coordinate::new(51.5, -0.1))),
                map: Box::new(ConsoleMap::new(clicks.clone())),
                form: Box::new(ConsoleForm::new(form.clone())),
                notifier: Box::new(ConsoleNotifier),
            },
        );
        tracker.start().await.expect("start");

        let script = "click 51.5 -0.1\n\
                      distance 5\nduration 30\ncadence 150\nsubmit\n\
                      distance 10\nduration 50\ncadence 160\nsubmit\n\
                      quit\n";
        let events = tracker.event_sender();
        let input = tokio::task::spawn_blocking(move || {
            read_commands(Cursor::new(script), events, clicks, form)
        });

        let workouts = tracker.run().await;
        input.await.expect("reader task").expect("read commands");

        let recorded: Vec<_> = workouts
            .iter()
            .map(|workout| (workout.distance(), workout.duration(), workout.pace()))
            .collect();
        assert_eq!(
            recorded,
            vec![(5.0, 30.0, Some(6.0)), (10.0, 50.0, Some(5.0))]
        );
    }

    #[tokio::test]
    async fn reader_stops_when_input_ends() {
        let clicks = ClickSlot::default();
        let form = SharedForm::default();
        let tracker = Tracker::new(
            TrackerSettings::default(),
            TrackerParts {
                geolocation: Arc::new(MissingGeolocation),
                map: Box::new(ConsoleMap::new(clicks.clone())),
                form: Box::new(ConsoleForm::new(form.clone())),
                notifier: Box::new(ConsoleNotifier),
            },
        );

        let events = tracker.event_sender();
        let input = tokio::task::spawn_blocking(move || {
            read_commands(Cursor::new("click 1 2\ndistance 3\n"), events, clicks, form)
        });

        let workouts = tracker.run().await;
        input.await.expect("reader task").expect("read commands");
        assert!(workouts.is_empty());
    }
}
