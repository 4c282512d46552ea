//! Presentation layer: scene sprites, gizmo overlays and text labels.
//!
//! Simulation state lives in canvas coordinates (origin top-left, y down);
//! everything here converts through [`canvas_to_world`] right before it
//! touches a `Transform` or a gizmo call.

use bevy::prelude::*;

use crate::resources::{
    ActiveFlight, ButtonBar, Cannon, DragState, PointerState, Target, TraceHistory,
    TrajectoryMeter, Viewport, WorldScale,
};
use crate::types::FlightPath;

/// Sky backdrop.
pub const SKY_COLOR: Color = Color::srgb(0.53, 0.81, 0.98);
const GRASS_COLOR: Color = Color::srgb(0.36, 0.62, 0.26);
const ROAD_COLOR: Color = Color::srgb(0.24, 0.24, 0.27);
const ROAD_LINE_COLOR: Color = Color::srgb(0.95, 0.82, 0.15);
const TRACE_COLOR: Color = Color::srgb(0.16, 0.35, 0.85);
const BUTTON_COLOR: Color = Color::srgb(0.17, 0.32, 0.55);
const BUTTON_HOVER_COLOR: Color = Color::srgb(0.25, 0.45, 0.72);

/// Marker for the grass band sprite.
#[derive(Component)]
pub struct GrassBand;

/// Marker for the road band sprite.
#[derive(Component)]
pub struct RoadBand;

/// One toolbar button sprite, indexed into [`ButtonBar::buttons`].
#[derive(Component)]
pub struct ButtonVisual {
    pub index: usize,
}

/// Marker for the meter readout text block.
#[derive(Component)]
pub struct ReadoutText;

/// Marker for the target distance label.
#[derive(Component)]
pub struct TargetLabel;

/// Convert a canvas-space point (y down, origin top-left) to Bevy world
/// space (y up, origin centered).
pub fn canvas_to_world(point: Vec2, viewport: &Viewport) -> Vec2 {
    Vec2::new(
        point.x - viewport.width / 2.0,
        viewport.height / 2.0 - point.y,
    )
}

/// Spawn the static scene: ground bands, toolbar buttons and text labels.
/// Positions are provisional here, `layout_scene` places everything from
/// the live viewport each frame.
pub fn setup_scene(mut commands: Commands, bar: Res<ButtonBar>) {
    commands.spawn((
        GrassBand,
        Sprite::from_color(GRASS_COLOR, Vec2::ONE),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));
    commands.spawn((
        RoadBand,
        Sprite::from_color(ROAD_COLOR, Vec2::ONE),
        Transform::from_xyz(0.0, 0.0, -0.5),
    ));

    for (index, button) in bar.buttons.iter().enumerate() {
        commands
            .spawn((
                ButtonVisual { index },
                Sprite::from_color(BUTTON_COLOR, button.size),
                Transform::from_xyz(0.0, 0.0, 1.0),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(button.label),
                    TextFont::from_font_size(16.0),
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            });
    }

    commands.spawn((
        ReadoutText,
        Text2d::new(""),
        TextFont::from_font_size(14.0),
        TextColor(Color::BLACK),
        Transform::from_xyz(0.0, 0.0, 2.0),
    ));
    commands.spawn((
        TargetLabel,
        Text2d::new(""),
        TextFont::from_font_size(16.0),
        TextColor(Color::BLACK),
        Transform::from_xyz(0.0, 0.0, 2.0),
    ));
}

/// Re-fit the ground bands and toolbar to the current viewport.
pub fn layout_scene(
    viewport: Res<Viewport>,
    bar: Res<ButtonBar>,
    mut grass: Query<(&mut Sprite, &mut Transform), (With<GrassBand>, Without<RoadBand>)>,
    mut road: Query<(&mut Sprite, &mut Transform), (With<RoadBand>, Without<GrassBand>)>,
    mut buttons: Query<(&ButtonVisual, &mut Transform), (Without<GrassBand>, Without<RoadBand>)>,
) {
    let grass_center = Vec2::new(
        viewport.width / 2.0,
        viewport.height - Viewport::GRASS_HEIGHT / 2.0,
    );
    if let Ok((mut sprite, mut transform)) = grass.single_mut() {
        sprite.custom_size = Some(Vec2::new(viewport.width, Viewport::GRASS_HEIGHT));
        transform.translation = canvas_to_world(grass_center, &viewport).extend(-1.0);
    }

    let road_center = Vec2::new(viewport.width / 2.0, viewport.road_center_y());
    if let Ok((mut sprite, mut transform)) = road.single_mut() {
        sprite.custom_size = Some(Vec2::new(viewport.width, Viewport::ROAD_HEIGHT));
        transform.translation = canvas_to_world(road_center, &viewport).extend(-0.5);
    }

    for (visual, mut transform) in buttons.iter_mut() {
        if let Some(button) = bar.buttons.get(visual.index) {
            transform.translation = canvas_to_world(button.center(&viewport), &viewport).extend(1.0);
        }
    }
}

/// Tint toolbar buttons while the pointer hovers them.
pub fn update_button_visuals(
    pointer: Res<PointerState>,
    viewport: Res<Viewport>,
    bar: Res<ButtonBar>,
    mut buttons: Query<(&ButtonVisual, &mut Sprite)>,
) {
    for (visual, mut sprite) in buttons.iter_mut() {
        let hovered = match (pointer.position, bar.buttons.get(visual.index)) {
            (Some(cursor), Some(button)) => button.contains(cursor, &viewport),
            _ => false,
        };
        sprite.color = if hovered { BUTTON_HOVER_COLOR } else { BUTTON_COLOR };
    }
}

/// Dashed center line along the road.
pub fn draw_road_markings(mut gizmos: Gizmos, viewport: Res<Viewport>) {
    let y = viewport.road_center_y();
    let dash = 30.0;
    let gap = 20.0;
    let mut x = 0.0;
    while x < viewport.width {
        let end = (x + dash).min(viewport.width);
        gizmos.line_2d(
            canvas_to_world(Vec2::new(x, y), &viewport),
            canvas_to_world(Vec2::new(end, y), &viewport),
            ROAD_LINE_COLOR,
        );
        x += dash + gap;
    }
}

/// Barrel line, pivot crosshair, and a hover square while the pointer is
/// over the angle grab zone (or the angle drag is live).
pub fn draw_cannon(
    mut gizmos: Gizmos,
    cannon: Res<Cannon>,
    pointer: Res<PointerState>,
    drag: Res<DragState>,
    viewport: Res<Viewport>,
) {
    let theta = cannon.angle.to_radians();
    // Canvas frame: up is -y.
    let muzzle = cannon.pivot + Vec2::new(theta.cos(), -theta.sin()) * cannon.barrel_length;
    let pivot = canvas_to_world(cannon.pivot, &viewport);

    gizmos.line_2d(pivot, canvas_to_world(muzzle, &viewport), Color::BLACK);
    gizmos.circle_2d(Isometry2d::from_translation(pivot), 6.0, Color::BLACK);

    let hovered = pointer
        .position
        .is_some_and(|cursor| cannon.hover_test(cursor));
    if hovered || matches!(*drag, DragState::CannonAngle) {
        gizmos.rect_2d(
            Isometry2d::from_translation(pivot),
            Vec2::splat(Cannon::HOVER_HALF_EXTENT * 2.0),
            Color::srgba(0.0, 0.0, 0.0, 0.4),
        );
    }
}

/// Concentric flattened rings lying on the ground around the target point.
pub fn draw_target(mut gizmos: Gizmos, target: Res<Target>, viewport: Res<Viewport>) {
    let center = Isometry2d::from_translation(canvas_to_world(target.pos, &viewport));
    let flatten = 0.3;
    for (fraction, color) in [
        (0.5, Color::srgb(0.85, 0.15, 0.15)),
        (0.33, Color::WHITE),
        (0.16, Color::srgb(0.85, 0.15, 0.15)),
    ] {
        let radius = target.size * fraction;
        gizmos.ellipse_2d(center, Vec2::new(radius, radius * flatten), color);
    }
}

/// Crosshair for the trajectory probe, plus a marker on its snapped sample.
pub fn draw_meter(mut gizmos: Gizmos, meter: Res<TrajectoryMeter>, viewport: Res<Viewport>) {
    let center = canvas_to_world(meter.pos, &viewport);
    let half = meter.size / 2.0;
    gizmos.line_2d(
        center - Vec2::new(half, 0.0),
        center + Vec2::new(half, 0.0),
        Color::BLACK,
    );
    gizmos.line_2d(
        center - Vec2::new(0.0, half),
        center + Vec2::new(0.0, half),
        Color::BLACK,
    );
    gizmos.circle_2d(Isometry2d::from_translation(center), half, Color::BLACK);

    if let Some(snap) = &meter.readout {
        gizmos.circle_2d(
            Isometry2d::from_translation(canvas_to_world(snap.point, &viewport)),
            5.0,
            Color::srgb(0.9, 0.3, 0.1),
        );
    }
}

/// One trace overlay: the path polyline, sparse dots, second marks and
/// the apex highlight.
fn draw_path(gizmos: &mut Gizmos, path: &FlightPath, viewport: &Viewport) {
    let samples = path.samples();
    if samples.len() < 2 {
        return;
    }

    let points: Vec<Vec2> = samples
        .iter()
        .map(|s| canvas_to_world(s.position(), viewport))
        .collect();
    gizmos.linestrip_2d(points.iter().copied(), TRACE_COLOR);

    for point in points.iter().step_by(5) {
        gizmos.circle_2d(Isometry2d::from_translation(*point), 1.5, TRACE_COLOR);
    }

    // A grey ring wherever the flight crosses a whole second.
    for pair in samples.windows(2) {
        if pair[0].t.floor() < pair[1].t.floor() {
            gizmos.circle_2d(
                Isometry2d::from_translation(canvas_to_world(pair[1].position(), viewport)),
                4.0,
                Color::srgb(0.55, 0.55, 0.55),
            );
        }
    }

    if let Some(apex) = samples.iter().min_by(|a, b| a.y.total_cmp(&b.y)) {
        gizmos.circle_2d(
            Isometry2d::from_translation(canvas_to_world(apex.position(), viewport)),
            4.0,
            Color::srgb(0.1, 0.7, 0.2),
        );
    }
}

/// Draw every archived trace plus the path of the active flight.
pub fn draw_traces(
    mut gizmos: Gizmos,
    history: Res<TraceHistory>,
    flight: Res<ActiveFlight>,
    viewport: Res<Viewport>,
) {
    for trace in &history.traces {
        draw_path(&mut gizmos, &trace.path, &viewport);
    }
    if let Some(shot) = &flight.0 {
        draw_path(&mut gizmos, &shot.path, &viewport);
    }
}

/// The projectile itself, at its physical size on screen.
pub fn draw_projectile(
    mut gizmos: Gizmos,
    flight: Res<ActiveFlight>,
    scale: Res<WorldScale>,
    viewport: Res<Viewport>,
) {
    if let Some(shot) = &flight.0 {
        let radius = (shot.config.diameter / 2.0 * scale.pixels_per_meter).max(3.0);
        gizmos.circle_2d(
            Isometry2d::from_translation(canvas_to_world(shot.pos, &viewport)),
            radius,
            Color::BLACK,
        );
    }
}

/// Keep the readout text next to the probe and fill it from the snap.
pub fn update_readout_text(
    meter: Res<TrajectoryMeter>,
    viewport: Res<Viewport>,
    mut query: Query<(&mut Text2d, &mut Transform), With<ReadoutText>>,
) {
    let Ok((mut text, mut transform)) = query.single_mut() else {
        return;
    };
    let anchor = canvas_to_world(meter.pos + Vec2::new(70.0, -30.0), &viewport);
    transform.translation = anchor.extend(2.0);

    text.0 = match &meter.readout {
        Some(snap) => format!(
            "Tiempo: {:.2} s\nAlcance: {:.2} m\nAltura: {:.2} m",
            snap.time, snap.range, snap.height
        ),
        None => String::new(),
    };
}

/// Distance label under the target, measured from the cannon pivot.
pub fn update_target_label(
    target: Res<Target>,
    cannon: Res<Cannon>,
    scale: Res<WorldScale>,
    viewport: Res<Viewport>,
    mut query: Query<(&mut Text2d, &mut Transform), With<TargetLabel>>,
) {
    let Ok((mut text, mut transform)) = query.single_mut() else {
        return;
    };
    let anchor = canvas_to_world(target.pos + Vec2::new(0.0, 35.0), &viewport);
    transform.translation = anchor.extend(2.0);

    let distance = (target.pos.x - cannon.pivot.x) / scale.pixels_per_meter;
    text.0 = format!("{distance:.1} m");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_to_world_flips_y_and_centers() {
        let viewport = Viewport {
            width: 1280.0,
            height: 720.0,
        };
        // Canvas origin is the top-left corner.
        assert_eq!(
            canvas_to_world(Vec2::ZERO, &viewport),
            Vec2::new(-640.0, 360.0)
        );
        // The canvas center maps to the world origin.
        assert_eq!(
            canvas_to_world(Vec2::new(640.0, 360.0), &viewport),
            Vec2::ZERO
        );
    }
}
