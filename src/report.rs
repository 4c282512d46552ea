//! Report exporter - serializes the trace history into a printable table.

use std::fs;
use std::io;
use std::path::Path;

use bevy::ecs::error::Result as BevyResult;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use serde::Serialize;

use crate::events::ExportCommand;
use crate::resources::{ActiveFlight, TraceHistory, WorldScale};
use crate::types::{FlightPath, LaunchConfig, Projectile};

/// Fixed output filename for the printable table.
pub const REPORT_FILENAME: &str = "simulacion-proyectiles.txt";

/// Table header (fixed Spanish labels, one per column).
pub const HEADERS: [&str; 8] = [
    "Objetos",
    "Diámetro (m)",
    "Masa (Kg)",
    "Angulo (grados)",
    "Velocidad inicial (m/s)",
    "Alcance (m)",
    "Altura (m)",
    "Tiempo (s)",
];

/// Caption above the table: the worksheet asks for the drag coefficient.
pub const DRAG_PROMPT: &str =
    "Coeficiente de arrastre: ........................................";
/// Caption below the table: rationale commentary prompt.
pub const RATIONALE_PROMPT: &str = "Explicar el porqué de la elección de sus datos.";

/// A built report: one row per recorded flight, cells pre-formatted.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub rows: Vec<[String; 8]>,
}

/// Build the report from the history plus the active flight, if any (the
/// active flight need not have landed).
///
/// Rows derive everything from the recorded path: start sample, running
/// minimum y (apex), maximum x (furthest point) and maximum t (total
/// flight time), converted to meters through the current scale. With no
/// usable rows the report still carries a single all-empty placeholder
/// row, so the printed table is never bodyless.
pub fn build_report(
    history: &TraceHistory,
    current: Option<&Projectile>,
    pixels_per_meter: f32,
) -> Report {
    let mut rows: Vec<[String; 8]> = history
        .traces
        .iter()
        .filter_map(|trace| build_row(&trace.path, &trace.config, pixels_per_meter))
        .chain(
            current
                .and_then(|shot| build_row(&shot.path, &shot.config, pixels_per_meter)),
        )
        .collect();

    if rows.is_empty() {
        rows.push(Default::default());
    }

    Report { rows }
}

/// One table row; `None` when the path holds no samples.
fn build_row(
    path: &FlightPath,
    config: &LaunchConfig,
    pixels_per_meter: f32,
) -> Option<[String; 8]> {
    let samples = path.samples();
    let start = samples.first()?;

    let mut min_y = start.y;
    let mut max_x = start.x;
    let mut max_t = 0.0f32;
    for sample in samples {
        min_y = min_y.min(sample.y);
        max_x = max_x.max(sample.x);
        max_t = max_t.max(sample.t);
    }

    // Canvas y grows downward: the apex is the minimum y.
    let height = (start.y - min_y) / pixels_per_meter;
    let range = (max_x - start.x) / pixels_per_meter;

    Some([
        config.kind.display_name().to_string(),
        format!("{:.2}", config.diameter),
        format!("{:.2}", config.mass),
        format!("{:.1}", config.angle),
        format!("{:.1}", config.velocity),
        format!("{range:.2}"),
        format!("{height:.2}"),
        format!("{max_t:.2}"),
    ])
}

/// Render the report as a grid table with the fixed captions around it.
pub fn render_table(report: &Report) -> String {
    // Column widths in characters (the labels carry accents, so count
    // chars, not bytes).
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &report.rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: String = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let render_row = |cells: &[&str]| -> String {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(&widths) {
            let padding = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(padding + 1));
            line.push('|');
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(DRAG_PROMPT);
    out.push_str("\n\n");

    out.push_str(&rule);
    out.push_str(&render_row(&HEADERS));
    out.push_str(&rule);
    for row in &report.rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_row(&cells));
        out.push_str(&rule);
    }

    out.push('\n');
    out.push_str(RATIONALE_PROMPT);
    out.push('\n');
    out
}

/// Write the rendered table to disk.
pub fn write_report(report: &Report, path: &Path) -> io::Result<()> {
    fs::write(path, render_table(report))
}

/// Export system. Fallible by design: an I/O failure is not caught here,
/// it propagates to the app's error handler.
pub fn export_report(
    mut messages: MessageReader<ExportCommand>,
    history: Res<TraceHistory>,
    flight: Res<ActiveFlight>,
    scale: Res<WorldScale>,
) -> BevyResult {
    for _ in messages.read() {
        let report = build_report(&history, flight.0.as_ref(), scale.pixels_per_meter);
        write_report(&report, Path::new(REPORT_FILENAME))?;
        info!("report written to {REPORT_FILENAME}");
    }
    Ok(())
}
