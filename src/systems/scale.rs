//! Scale controller - fits the predicted trajectory into the viewport.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::resources::{
    ActiveFlight, LaunchParams, ScaleInputs, TraceHistory, Viewport, WorldScale,
};

/// Scale clamp bounds (px/m): keeps extreme parameter combinations from
/// zooming the scene into uselessness.
pub const MIN_PIXELS_PER_METER: f32 = 2.0;
pub const MAX_PIXELS_PER_METER: f32 = 50.0;

/// The world always shows at least this many meters on each axis.
const MIN_EXTENT_METERS: f32 = 10.0;
/// Breathing room around the predicted trajectory.
const PADDING: f32 = 1.2;

/// Analytic drag-free apex height for the current parameters, with a small
/// buffer so the trajectory never grazes the top edge.
pub fn predicted_max_height(velocity: f32, angle_deg: f32, gravity: f32) -> f32 {
    let v0y = velocity * angle_deg.to_radians().sin();
    v0y * v0y / (2.0 * gravity) + 2.0
}

/// Analytic drag-free ground-to-ground range: `v0x · (2·v0y / g)`.
pub fn predicted_range(velocity: f32, angle_deg: f32, gravity: f32) -> f32 {
    let theta = angle_deg.to_radians();
    let v0y = velocity * theta.sin();
    let v0x = velocity * theta.cos();
    v0x * (2.0 * v0y / gravity)
}

/// Derive the pixels-per-meter scale that fits the predicted trajectory
/// into the available canvas area.
///
/// Required world extents are the predicted apex height and range, floored
/// at [`MIN_EXTENT_METERS`] and inflated by [`PADDING`]; the result is the
/// more restrictive of the two axis ratios, clamped to
/// [[`MIN_PIXELS_PER_METER`], [`MAX_PIXELS_PER_METER`]].
pub fn compute_scale(
    velocity: f32,
    angle_deg: f32,
    gravity: f32,
    available_width: f32,
    available_height: f32,
) -> f32 {
    let required_height = predicted_max_height(velocity, angle_deg, gravity).max(MIN_EXTENT_METERS);
    let required_width = predicted_range(velocity, angle_deg, gravity).max(MIN_EXTENT_METERS);

    let ppm_height = available_height / (required_height * PADDING);
    let ppm_width = available_width / (required_width * PADDING);

    ppm_height
        .min(ppm_width)
        .clamp(MIN_PIXELS_PER_METER, MAX_PIXELS_PER_METER)
}

/// Mirror the primary window size into the [`Viewport`] resource.
///
/// Headless apps and tests have no window; the viewport then keeps its
/// default (or manually inserted) size.
pub fn sync_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    if width > 0.0 && height > 0.0 && (viewport.width, viewport.height) != (width, height) {
        viewport.width = width;
        viewport.height = height;
    }
}

/// Recompute the world scale whenever velocity, angle, gravity or the
/// viewport changed since the last recompute.
///
/// A scale change invalidates every pixel-space path, so the recompute
/// also clears the active flight and the whole trace history.
pub fn recompute_scale(
    params: Res<LaunchParams>,
    viewport: Res<Viewport>,
    mut scale: ResMut<WorldScale>,
    mut flight: ResMut<ActiveFlight>,
    mut history: ResMut<TraceHistory>,
) {
    let inputs = ScaleInputs {
        velocity: params.velocity,
        angle: params.angle,
        gravity: params.gravity,
        width: viewport.width,
        height: viewport.height,
    };
    if scale.inputs == Some(inputs) {
        return;
    }

    scale.pixels_per_meter = compute_scale(
        inputs.velocity,
        inputs.angle,
        inputs.gravity,
        viewport.width,
        viewport.available_height(),
    );
    scale.inputs = Some(inputs);

    flight.0 = None;
    history.clear();
}
