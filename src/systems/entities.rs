//! Interactive entities: cannon, target and trajectory probe.

use bevy::prelude::*;

use crate::resources::{
    ActiveFlight, Cannon, DragState, LaunchParams, PointerState, Target, TraceHistory,
    TrajectoryMeter, Viewport, WorldScale,
};
use crate::types::{FlightPath, MeterSnap};

/// Keep the cannon on the road and its barrel in sync with the launch
/// angle.
///
/// The angle binding is one-way (parameters to cannon) except while the
/// operator drags inside the hover square: then the angle follows the
/// pointer direction from the pivot, clamped to [0, 90], and is written
/// back into the editable parameters.
pub fn sync_cannon(
    viewport: Res<Viewport>,
    pointer: Res<PointerState>,
    drag: Res<DragState>,
    mut params: ResMut<LaunchParams>,
    mut cannon: ResMut<Cannon>,
) {
    cannon.pivot = Vec2::new(
        viewport.width * Cannon::PIVOT_X_RATIO,
        viewport.road_center_y(),
    );

    if *drag == DragState::CannonAngle {
        if let Some(cursor) = pointer.position {
            let delta = cursor - cannon.pivot;
            // Canvas y grows downward; negate to get the angle above the
            // horizon.
            let angle = (-delta.y).atan2(delta.x).to_degrees();
            params.set_angle(angle);
        }
    }

    cannon.angle = params.angle;
}

/// Target drag. The y coordinate is re-locked to the road center every
/// frame whether or not a drag is active; x follows the pointer, clamped
/// so the full disc stays on screen.
pub fn drag_target(
    viewport: Res<Viewport>,
    pointer: Res<PointerState>,
    drag: Res<DragState>,
    mut target: ResMut<Target>,
) {
    target.pos.y = viewport.road_center_y();

    if *drag == DragState::Target {
        if let Some(cursor) = pointer.position {
            let (lo, hi) = target.x_bounds(&viewport);
            target.pos.x = cursor.x.clamp(lo, hi);
        }
    }
}

/// Probe drag: free on both axes, offset by the grab point captured at
/// press time so the probe does not jump to the cursor.
pub fn drag_meter(
    pointer: Res<PointerState>,
    drag: Res<DragState>,
    mut meter: ResMut<TrajectoryMeter>,
) {
    if let DragState::Meter { grab_offset } = *drag {
        if let Some(cursor) = pointer.position {
            meter.pos = cursor + grab_offset;
        }
    }
}

/// Snap the probe readout to the nearest recorded sample, if any is close
/// enough. Runs every frame regardless of drag state, over the history
/// and the current flight alike.
pub fn update_meter_readout(
    viewport: Res<Viewport>,
    scale: Res<WorldScale>,
    cannon: Res<Cannon>,
    flight: Res<ActiveFlight>,
    history: Res<TraceHistory>,
    mut meter: ResMut<TrajectoryMeter>,
) {
    let paths = history
        .traces
        .iter()
        .map(|trace| &trace.path)
        .chain(flight.0.as_ref().map(|shot| &shot.path));

    meter.readout = nearest_snap(
        meter.pos,
        paths,
        scale.pixels_per_meter,
        cannon.pivot.x,
        viewport.road_center_y(),
    );
}

/// Find the sample nearest to the probe across all paths; within the snap
/// tolerance, derive the readout (time, range from the cannon pivot,
/// height above the road) by dividing pixel deltas by the current scale.
pub fn nearest_snap<'a>(
    probe: Vec2,
    paths: impl IntoIterator<Item = &'a FlightPath>,
    pixels_per_meter: f32,
    cannon_x: f32,
    road_center_y: f32,
) -> Option<MeterSnap> {
    let mut best: Option<(f32, crate::types::PathSample)> = None;
    for path in paths {
        for sample in path.samples() {
            let dist = probe.distance(sample.position());
            if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                best = Some((dist, *sample));
            }
        }
    }

    let (dist, sample) = best?;
    if dist >= TrajectoryMeter::SNAP_TOLERANCE {
        return None;
    }

    Some(MeterSnap {
        time: sample.t,
        range: (sample.x - cannon_x) / pixels_per_meter,
        height: ((road_center_y - sample.y) / pixels_per_meter).max(0.0),
        point: sample.position(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathSample;

    fn path_with(samples: &[(f32, f32, f32)]) -> FlightPath {
        let mut path = FlightPath::default();
        for &(t, x, y) in samples {
            path.push(PathSample { t, x, y });
        }
        path
    }

    #[test]
    fn snaps_to_the_nearest_sample_within_tolerance() {
        let near = path_with(&[(0.0, 100.0, 500.0), (0.5, 120.0, 480.0)]);
        let far = path_with(&[(0.0, 400.0, 200.0)]);

        let snap = nearest_snap(
            Vec2::new(118.0, 482.0),
            [&near, &far],
            10.0,
            50.0,
            520.0,
        )
        .expect("sample within 30 px");

        assert_eq!(snap.time, 0.5);
        assert_eq!(snap.point, Vec2::new(120.0, 480.0));
        // (120 - 50) px / 10 px/m and (520 - 480) px / 10 px/m.
        assert!((snap.range - 7.0).abs() < 1e-5);
        assert!((snap.height - 4.0).abs() < 1e-5);
    }

    #[test]
    fn no_readout_outside_tolerance() {
        let path = path_with(&[(0.0, 100.0, 500.0)]);
        let snap = nearest_snap(Vec2::new(200.0, 500.0), [&path], 10.0, 50.0, 520.0);
        assert!(snap.is_none());
    }

    #[test]
    fn height_below_the_road_reads_as_zero() {
        // The last recorded sample of a landed flight can dip below the
        // road line; the readout never shows a negative height.
        let path = path_with(&[(1.0, 100.0, 525.0)]);
        let snap = nearest_snap(Vec2::new(100.0, 525.0), [&path], 10.0, 50.0, 520.0)
            .expect("snapped");
        assert_eq!(snap.height, 0.0);
    }

    #[test]
    fn empty_history_yields_no_readout() {
        let snap = nearest_snap(Vec2::new(0.0, 0.0), [] as [&FlightPath; 0], 10.0, 0.0, 0.0);
        assert!(snap.is_none());
    }
}
