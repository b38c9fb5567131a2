//! Line-oriented terminal front-end.
//!
//! Each position line is submitted to the tracker and the ledger is printed
//! back, so an operator can keep a log from a plain terminal.

mod command;
mod table;

use std::io::{self, BufRead, Write};

use crate::route::{RouteLabels, RouteView};
use crate::tracker::Tracker;

pub use command::{parse_line, CommandError, ConsoleCommand};
pub use table::{write_ledger, write_route};

const HELP: &str = "\
Commands:
  LAT LON SPEED COURSE   log a position (knots, degrees)
  log                    print the ledger
  route                  print markers and track
  reset                  start a fresh log
  help                   this text
  quit                   leave";

pub fn run<R: BufRead, W: Write>(
    tracker: &Tracker,
    labels: &RouteLabels,
    input: R,
    mut output: W,
) -> io::Result<()> {
    let waypoints = tracker.waypoints();
    writeln!(
        output,
        "Voyage {} ({}) -> {} ({}). Type \"help\" for commands.",
        labels.origin, waypoints.origin, labels.destination, waypoints.destination
    )?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(c) => c,
            Err(e) => {
                writeln!(output, "error: {}", e)?;
                continue;
            }
        };

        match command {
            ConsoleCommand::Submit(report) => match tracker.submit_report(report, chrono::Utc::now()) {
                Ok(record) => {
                    writeln!(
                        output,
                        "Record {} logged: {:.2} km to go.",
                        record.number, record.entry.remaining_distance_km
                    )?;
                    print_ledger(tracker, labels, &mut output)?;
                }
                Err(e) => writeln!(output, "error: {}", e)?,
            },
            ConsoleCommand::Log => print_ledger(tracker, labels, &mut output)?,
            ConsoleCommand::Route => {
                let view = RouteView::from_status(&tracker.status(), labels);
                write_route(&mut output, &view)?;
            }
            ConsoleCommand::Reset => {
                tracker.reset();
                writeln!(output, "Log cleared.")?;
            }
            ConsoleCommand::Help => writeln!(output, "{}", HELP)?,
            ConsoleCommand::Quit => break,
            ConsoleCommand::Empty => {}
        }
        output.flush()?;
    }

    Ok(())
}

fn print_ledger<W: Write>(tracker: &Tracker, labels: &RouteLabels, output: &mut W) -> io::Result<()> {
    let view = RouteView::from_status(&tracker.status(), labels);
    write_ledger(output, &view.ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::FixedWaypoints;
    use crate::tracker::TrackerSettings;

    fn session(script: &str) -> (Tracker, String) {
        let tracker = Tracker::new(FixedWaypoints::default(), TrackerSettings::default());
        let mut out = Vec::new();
        run(&tracker, &RouteLabels::default(), script.as_bytes(), &mut out).unwrap();
        (tracker, String::from_utf8(out).unwrap())
    }

    #[test]
    fn submits_and_prints_ledger() {
        let (tracker, out) = session("31.9621 33.2487 8.86 112.5\n31.9 33.5 9 112\n");

        assert_eq!(tracker.len(), 2);
        assert!(out.contains("Record 1 logged: 126.42 km to go."));
        assert!(out.contains("Record 2 logged"));
    }

    #[test]
    fn errors_do_not_stop_the_session() {
        let (tracker, out) = session("1 2 3\n95 33 8 112\n31.9621 33.2487 8.86 112.5\n");

        assert!(out.contains("error: expected 4 values"));
        assert!(out.contains("error: invalid latitude"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn quit_stops_reading() {
        let (tracker, _) = session("quit\n31.9621 33.2487 8.86 112.5\n");
        assert!(tracker.is_empty());
    }

    #[test]
    fn reset_and_log() {
        let (tracker, out) = session("31.9621 33.2487 8.86 112.5\nreset\nlog\n");

        assert!(tracker.is_empty());
        assert!(out.contains("Log cleared."));
        assert!(out.trim_end().ends_with("No positions recorded yet."));
    }
}
