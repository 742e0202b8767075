//! Line commands typed on stdin, standing in for map clicks and form input.

use shared::domain::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Click(Coordinate),
    SelectType(String),
    SetField { field: FormField, value: String },
    Submit,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  click <lat> <lng>          click the map at a coordinate
  type <running|cycling>     change the workout type
  distance <km>              fill the distance field
  duration <min>             fill the duration field
  cadence <steps/min>        fill the cadence field
  elevation <m>              fill the elevation gain field
  submit                     submit the workout form
  help                       show this message
  quit                       end the session";

pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Err("empty command".to_string());
    };
    // Field values are passed through untouched; the tracker validates them.
    let rest = parts.collect::<Vec<_>>().join(" ");

    let field = |field: FormField| ConsoleCommand::SetField {
        field,
        value: rest.clone(),
    };

    match verb.to_ascii_lowercase().as_str() {
        "click" => parse_click(&rest).map(ConsoleCommand::Click),
        "type" => Ok(ConsoleCommand::SelectType(rest.clone())),
        "distance" => Ok(field(FormField::Distance)),
        "duration" => Ok(field(FormField::Duration)),
        "cadence" => Ok(field(FormField::Cadence)),
        "elevation" => Ok(field(FormField::Elevation)),
        "submit" => Ok(ConsoleCommand::Submit),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        other => Err(format!("unknown command '{other}'; type 'help'")),
    }
}

fn parse_click(args: &str) -> Result<Coordinate, String> {
    let mut parts = args.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty());
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("usage: click <lat> <lng>".to_string());
    };
    let lat = parse_degrees(lat, 90.0).ok_or_else(|| format!("invalid latitude '{lat}'"))?;
    let lng = parse_degrees(lng, 180.0).ok_or_else(|| format!("invalid longitude '{lng}'"))?;
    Ok(Coordinate::new(lat, lng))
}

/// Finite decimal degrees within `±limit`.
fn parse_degrees(raw: &str, limit: f64) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() <= limit)
}
