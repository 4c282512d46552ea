//! Kinematics integrator - semi-implicit Euler with quadratic drag.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::resources::{ActiveFlight, Viewport, WorldScale};
use crate::types::{FlightPhase, LaunchConfig, PathSample, Projectile};

/// Air density at sea level (kg/m³).
pub const AIR_DENSITY: f32 = 1.225;
/// Drag coefficient of a sphere, good enough for every classroom load.
pub const DRAG_COEFFICIENT: f32 = 0.47;

/// Advance the active flight by the real frame delta.
///
/// Runs in Update with the rendered frame's `dt` rather than a fixed step:
/// the lab favours a trajectory that tracks wall-clock time over
/// determinism.
pub fn update_flight(
    time: Res<Time>,
    viewport: Res<Viewport>,
    scale: Res<WorldScale>,
    mut flight: ResMut<ActiveFlight>,
) {
    if let Some(shot) = flight.0.as_mut() {
        step_flight(
            shot,
            time.delta_secs(),
            scale.pixels_per_meter,
            viewport.road_center_y(),
        );
    }
}

/// One integration step.
///
/// Semi-implicit Euler: velocity first, then position. Velocity stays in
/// SI units for the whole flight; `pixels_per_meter` bridges units only in
/// the position step. The path sample is appended before the landing
/// clamp, so the recorded path may end just below the road line while the
/// projectile itself never does.
pub fn step_flight(shot: &mut Projectile, dt: f32, pixels_per_meter: f32, road_center_y: f32) {
    if shot.phase == FlightPhase::Landed {
        return;
    }

    let accel = acceleration(shot.vel, &shot.config);
    shot.vel += accel * dt;
    shot.pos += shot.vel * (dt * pixels_per_meter);
    shot.elapsed += dt;

    shot.path.push(PathSample {
        t: shot.elapsed,
        x: shot.pos.x,
        y: shot.pos.y,
    });

    // Land exactly on the road center line so the shot neither floats nor
    // sinks. A single landing ends the flight; no bounce.
    if shot.pos.y > road_center_y {
        shot.pos.y = road_center_y;
        shot.phase = FlightPhase::Landed;
    }
}

/// Acceleration (m/s², canvas frame: y down) from gravity and, when the
/// config enables it, quadratic air drag.
///
/// Drag magnitude follows `0.5 · ρ · v² · Cd · A` with the cross-section
/// of a disk of the projectile's diameter, opposing the velocity.
pub fn acceleration(vel: Vec2, config: &LaunchConfig) -> Vec2 {
    let gravity = Vec2::new(0.0, config.gravity);
    if !config.drag_enabled {
        return gravity;
    }

    let speed_sq = vel.length_squared();
    if speed_sq < 1e-6 {
        // Stationary: drag has no defined direction.
        return gravity;
    }

    let area = PI * (config.diameter / 2.0).powi(2);
    let drag_magnitude = 0.5 * AIR_DENSITY * speed_sq * DRAG_COEFFICIENT * area;
    gravity - vel.normalize() * (drag_magnitude / config.mass)
}
