//! Headless run of the simulation core: fires each preset once (with and
//! without drag for the cannonball), prints the flight table, and writes
//! the text report plus a JSON sidecar.

use bevy_cannon_lab::prelude::*;
use bevy_cannon_lab::report::{build_report, render_table, write_report, REPORT_FILENAME};
use bevy_cannon_lab::systems::kinematics::step_flight;
use bevy_cannon_lab::systems::logic::fire;
use bevy_cannon_lab::systems::scale::compute_scale;
use std::path::Path;

const JSON_FILENAME: &str = "simulacion-proyectiles.json";
const DT: f32 = 1.0 / 240.0;
const MAX_STEPS: usize = 240 * 60;

fn main() {
    println!("Simulación sin ventana: un disparo por objeto...");

    let viewport = Viewport::default();
    let cannon = Cannon::default();
    let mut flight = ActiveFlight::default();
    let mut history = TraceHistory::default();
    let mut params = LaunchParams::default();

    let shots = [
        (ProjectileKind::Cannonball, false),
        (ProjectileKind::Cannonball, true),
        (ProjectileKind::Piano, false),
        (ProjectileKind::Car, false),
        (ProjectileKind::Human, false),
    ];

    let mut pixels_per_meter = WorldScale::default().pixels_per_meter;
    for (kind, drag) in shots {
        params.apply_preset(kind);
        params.drag_enabled = drag;
        pixels_per_meter = compute_scale(
            params.velocity,
            params.angle,
            params.gravity,
            viewport.width,
            viewport.available_height(),
        );

        println!(
            "\n[DISPARO] {} (arrastre: {})  escala {:.1} px/m",
            params.kind.display_name(),
            if drag { "sí" } else { "no" },
            pixels_per_meter
        );

        fire(&mut flight, &mut history, &params, cannon.pivot);
        let Some(shot) = flight.0.as_mut() else {
            continue;
        };

        let mut steps = 0;
        while shot.in_flight() && steps < MAX_STEPS {
            step_flight(shot, DT, pixels_per_meter, viewport.road_center_y());
            steps += 1;
        }

        let range = (shot.pos.x - cannon.pivot.x) / pixels_per_meter;
        println!(
            "  tiempo de vuelo {:.2} s, alcance {:.2} m, {} muestras",
            shot.elapsed,
            range,
            shot.path.len()
        );
    }

    // Archive the last landed flight by hand, a refire would do the same.
    if let Some(shot) = flight.0.take() {
        history.push(Trace {
            path: shot.path,
            config: shot.config,
        });
    }

    let report = build_report(&history, None, pixels_per_meter);
    println!("\n{}", render_table(&report));

    if let Err(err) = write_report(&report, Path::new(REPORT_FILENAME)) {
        eprintln!("no se pudo escribir {REPORT_FILENAME}: {err}");
        std::process::exit(1);
    }
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            if let Err(err) = std::fs::write(JSON_FILENAME, json) {
                eprintln!("no se pudo escribir {JSON_FILENAME}: {err}");
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("no se pudo serializar el informe: {err}");
            std::process::exit(1);
        }
    }

    println!("Informe escrito en {REPORT_FILENAME} y {JSON_FILENAME}");
}
