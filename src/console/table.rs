use std::io::{self, Write};

use crate::route::{LedgerRow, RouteView};

const HEADERS: [&str; 9] = [
    "#",
    "Time",
    "Lat",
    "Lon",
    "Speed kn",
    "Course",
    "Dist km",
    "ETA",
    "Bearing",
];

fn columns(row: &LedgerRow) -> [String; 9] {
    [
        row.record.to_string(),
        row.timestamp.clone(),
        row.latitude.clone(),
        row.longitude.clone(),
        row.speed_knots.clone(),
        row.course_degrees.clone(),
        row.remaining_distance_km.clone(),
        format!("{} ({})", row.eta, row.eta_duration),
        row.bearing_degrees.clone(),
    ]
}

pub fn write_ledger<W: Write>(out: &mut W, rows: &[LedgerRow]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No positions recorded yet.");
    }

    let cells: Vec<[String; 9]> = rows.iter().map(columns).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADERS.map(String::from), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in &cells {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 9], widths: &[usize; 9]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())
}

pub fn write_route<W: Write>(out: &mut W, view: &RouteView) -> io::Result<()> {
    for marker in &view.markers {
        writeln!(out, "[{}] {} @ {}", marker.color, marker.label, marker.position)?;
    }
    let track: Vec<String> = view
        .polyline
        .iter()
        .map(|p| format!("({})", p))
        .collect();
    writeln!(out, "Track: {}", track.join(" -> "))
}
