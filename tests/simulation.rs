//! End-to-end checks of the simulation core: closed-form ballistics,
//! scale fitting, press routing and the full app loop.

use bevy::prelude::*;
use bevy_cannon_lab::prelude::*;
use bevy_cannon_lab::report::build_report;
use bevy_cannon_lab::systems::input::{route_press, PressClaim};
use bevy_cannon_lab::systems::kinematics::step_flight;
use bevy_cannon_lab::systems::logic::fire;
use bevy_cannon_lab::systems::scale::{
    compute_scale, MAX_PIXELS_PER_METER, MIN_PIXELS_PER_METER,
};

const DT: f32 = 1.0 / 240.0;
const MAX_STEPS: usize = 240 * 120;

struct FlightOutcome {
    elapsed: f32,
    apex_m: f32,
    range_m: f32,
    landing_y: f32,
}

/// Fire with the given parameters and integrate until landing.
fn run_flight(params: &LaunchParams, pixels_per_meter: f32) -> FlightOutcome {
    let viewport = Viewport::default();
    let cannon = Cannon::default();
    let mut flight = ActiveFlight::default();
    let mut history = TraceHistory::default();

    fire(&mut flight, &mut history, params, cannon.pivot);
    let shot = flight.0.as_mut().expect("fire launches a projectile");

    let mut min_y = shot.pos.y;
    let mut steps = 0;
    while shot.in_flight() && steps < MAX_STEPS {
        step_flight(shot, DT, pixels_per_meter, viewport.road_center_y());
        min_y = min_y.min(shot.pos.y);
        steps += 1;
    }
    assert!(!shot.in_flight(), "flight must land within the step budget");

    FlightOutcome {
        elapsed: shot.elapsed,
        apex_m: (cannon.pivot.y - min_y) / pixels_per_meter,
        range_m: (shot.pos.x - cannon.pivot.x) / pixels_per_meter,
        landing_y: shot.pos.y,
    }
}

#[test]
fn vertical_shot_matches_closed_form() {
    let viewport = Viewport::default();
    let mut params = LaunchParams::default();
    params.set_velocity(10.0);
    params.set_angle(90.0);
    params.set_gravity(9.81);
    params.drag_enabled = false;

    let scale = compute_scale(
        params.velocity,
        params.angle,
        params.gravity,
        viewport.width,
        viewport.available_height(),
    );
    let outcome = run_flight(&params, scale);

    // Closed form: t = 2v/g, apex = v^2/2g.
    assert!((outcome.elapsed - 2.0 * 10.0 / 9.81).abs() < 0.05);
    assert!((outcome.apex_m - 10.0 * 10.0 / (2.0 * 9.81)).abs() < 0.1);
    assert!(outcome.range_m.abs() < 0.05);
}

#[test]
fn landing_clamps_exactly_onto_the_road_line() {
    let params = LaunchParams::default();
    let outcome = run_flight(&params, 10.0);
    assert_eq!(outcome.landing_y, Viewport::default().road_center_y());
}

#[test]
fn recorded_sample_times_strictly_increase() {
    let viewport = Viewport::default();
    let cannon = Cannon::default();
    let params = LaunchParams::default();
    let mut flight = ActiveFlight::default();
    let mut history = TraceHistory::default();

    fire(&mut flight, &mut history, &params, cannon.pivot);
    let shot = flight.0.as_mut().expect("fire launches a projectile");
    let mut steps = 0;
    while shot.in_flight() && steps < MAX_STEPS {
        step_flight(shot, DT, 10.0, viewport.road_center_y());
        steps += 1;
    }

    let samples = shot.path.samples();
    assert!(samples.len() > 2);
    for pair in samples.windows(2) {
        assert!(pair[1].t > pair[0].t);
    }
}

#[test]
fn default_scale_fit_is_width_limited_and_in_bounds() {
    let viewport = Viewport::default();
    let params = LaunchParams::default();
    let scale = compute_scale(
        params.velocity,
        params.angle,
        params.gravity,
        viewport.width,
        viewport.available_height(),
    );

    assert!((MIN_PIXELS_PER_METER..=MAX_PIXELS_PER_METER).contains(&scale));
    // Defaults (18 m/s at 25 degrees) fly further than high, so the
    // horizontal fit decides the scale.
    assert!((scale - 42.16).abs() < 0.1);
}

#[test]
fn refire_while_airborne_is_ignored() {
    let cannon = Cannon::default();
    let params = LaunchParams::default();
    let mut flight = ActiveFlight::default();
    let mut history = TraceHistory::default();

    fire(&mut flight, &mut history, &params, cannon.pivot);
    let first_vel = flight.0.as_ref().map(|shot| shot.vel);
    fire(&mut flight, &mut history, &params, cannon.pivot);

    assert!(history.is_empty());
    assert_eq!(flight.0.as_ref().map(|shot| shot.vel), first_vel);
}

#[test]
fn probe_press_outranks_the_target_under_overlap() {
    let viewport = Viewport::default();
    let bar = ButtonBar::default();
    let cannon = Cannon::default();
    let target = Target::default();
    let meter = TrajectoryMeter {
        pos: target.pos,
        ..Default::default()
    };

    let claim = route_press(target.pos, &bar, &viewport, &meter, &target, &cannon);
    assert!(matches!(claim, Some(PressClaim::Meter { .. })));
}

#[test]
fn full_flight_report_row_is_plausible() {
    let viewport = Viewport::default();
    let cannon = Cannon::default();
    let params = LaunchParams::default();
    let mut flight = ActiveFlight::default();
    let mut history = TraceHistory::default();

    fire(&mut flight, &mut history, &params, cannon.pivot);
    let shot = flight.0.as_mut().expect("fire launches a projectile");
    let mut steps = 0;
    while shot.in_flight() && steps < MAX_STEPS {
        step_flight(shot, DT, 10.0, viewport.road_center_y());
        steps += 1;
    }

    let report = build_report(&history, flight.0.as_ref(), 10.0);
    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row[0], "Bala de Cañón");

    let range: f32 = row[5].parse().expect("range cell is numeric");
    let height: f32 = row[6].parse().expect("height cell is numeric");
    let time: f32 = row[7].parse().expect("time cell is numeric");
    assert!(range > 0.0);
    assert!(height > 0.0);
    assert!(time > 0.0);
}

fn core_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(CannonLabCorePlugin);
    app
}

#[test]
fn app_fires_and_reset_preserves_the_setup() {
    let mut app = core_app();
    app.update();

    let target_before = app.world().resource::<Target>().pos;
    let meter_before = app.world().resource::<TrajectoryMeter>().pos;

    app.world_mut().write_message(FireCommand);
    app.update();
    assert!(app.world().resource::<ActiveFlight>().0.is_some());

    app.world_mut().write_message(ResetCommand);
    app.update();

    let world = app.world();
    assert!(world.resource::<ActiveFlight>().0.is_none());
    assert!(world.resource::<TraceHistory>().is_empty());
    assert_eq!(world.resource::<Target>().pos, target_before);
    assert_eq!(world.resource::<TrajectoryMeter>().pos, meter_before);
}

#[test]
fn app_preset_change_refits_the_scale_and_clears_history() {
    let mut app = core_app();
    app.update();
    let scale_before = app.world().resource::<WorldScale>().pixels_per_meter;

    app.world_mut().write_message(FireCommand);
    app.update();
    assert!(app.world().resource::<ActiveFlight>().0.is_some());

    app.world_mut()
        .resource_mut::<LaunchParams>()
        .apply_preset(ProjectileKind::Piano);
    app.update();

    let world = app.world();
    assert!(world.resource::<ActiveFlight>().0.is_none());
    assert!(world.resource::<TraceHistory>().is_empty());
    assert_ne!(
        world.resource::<WorldScale>().pixels_per_meter,
        scale_before
    );
}
