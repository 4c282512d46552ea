//! Global resources for the projectile laboratory.

use bevy::prelude::*;

use crate::types::{LaunchConfig, MeterSnap, ProjectileKind, Projectile, Trace};

/// Live, editable launch parameters.
///
/// This is what the parameter panel mutates. Every numeric setter clamps to
/// its documented range instead of rejecting the edit, so the fields are
/// always valid; a [`LaunchConfig`] snapshot is taken from here when the
/// cannon fires.
///
/// # Fields
/// * `kind` - selected projectile kind
/// * `mass` - kilograms, clamped to [0.1, 2000]
/// * `diameter` - meters, clamped to [0.01, 5]
/// * `velocity` - m/s, clamped to [0, 100]
/// * `angle` - degrees, clamped to [0, 90]
/// * `gravity` - m/s², clamped to [0.5, 30]
/// * `drag_enabled` - air resistance toggle
#[derive(Resource, Reflect, Clone, Debug)]
#[reflect(Resource)]
pub struct LaunchParams {
    pub kind: ProjectileKind,
    pub mass: f32,
    pub diameter: f32,
    pub velocity: f32,
    pub angle: f32,
    pub gravity: f32,
    pub drag_enabled: bool,
}

impl Default for LaunchParams {
    /// Cannonball defaults: 17.60 kg, 0.18 m, 18 m/s at 25°, g = 9.81,
    /// air resistance off.
    fn default() -> Self {
        Self {
            kind: ProjectileKind::Cannonball,
            mass: 17.60,
            diameter: 0.18,
            velocity: 18.0,
            angle: 25.0,
            gravity: 9.81,
            drag_enabled: false,
        }
    }
}

impl LaunchParams {
    pub const VELOCITY_RANGE: (f32, f32) = (0.0, 100.0);
    pub const ANGLE_RANGE: (f32, f32) = (0.0, 90.0);
    pub const GRAVITY_RANGE: (f32, f32) = (0.5, 30.0);
    pub const MASS_RANGE: (f32, f32) = (0.1, 2000.0);
    pub const DIAMETER_RANGE: (f32, f32) = (0.01, 5.0);

    pub fn set_velocity(&mut self, value: f32) {
        self.velocity = value.clamp(Self::VELOCITY_RANGE.0, Self::VELOCITY_RANGE.1);
    }

    pub fn set_angle(&mut self, value: f32) {
        self.angle = value.clamp(Self::ANGLE_RANGE.0, Self::ANGLE_RANGE.1);
    }

    pub fn set_gravity(&mut self, value: f32) {
        self.gravity = value.clamp(Self::GRAVITY_RANGE.0, Self::GRAVITY_RANGE.1);
    }

    pub fn set_mass(&mut self, value: f32) {
        self.mass = value.clamp(Self::MASS_RANGE.0, Self::MASS_RANGE.1);
    }

    pub fn set_diameter(&mut self, value: f32) {
        self.diameter = value.clamp(Self::DIAMETER_RANGE.0, Self::DIAMETER_RANGE.1);
    }

    /// Select a projectile kind: overwrites mass, diameter, velocity and
    /// angle with the kind's preset values (via the clamping setters).
    pub fn apply_preset(&mut self, kind: ProjectileKind) {
        let preset = kind.preset();
        self.kind = kind;
        self.set_mass(preset.mass);
        self.set_diameter(preset.diameter);
        self.set_velocity(preset.velocity);
        self.set_angle(preset.angle);
    }

    /// Snapshot the current values into an immutable [`LaunchConfig`].
    pub fn config(&self) -> LaunchConfig {
        LaunchConfig {
            kind: self.kind,
            mass: self.mass,
            diameter: self.diameter,
            velocity: self.velocity,
            angle: self.angle,
            gravity: self.gravity,
            drag_enabled: self.drag_enabled,
        }
    }
}

/// Canvas geometry: the tracked window size plus the fixed ground layout.
///
/// All simulation positions use canvas coordinates (origin top-left, y
/// down), matching pointer coordinates as delivered by the window. The
/// bottom of the canvas is a grass band with a road stacked on top of it;
/// the road's vertical center is the ground line for launch, landing and
/// the target.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    /// Grass band height at the bottom of the canvas (px).
    pub const GRASS_HEIGHT: f32 = 100.0;
    /// Road band height, stacked on the grass (px).
    pub const ROAD_HEIGHT: f32 = 40.0;

    /// Top edge of the road.
    pub fn road_top_y(&self) -> f32 {
        self.height - Self::GRASS_HEIGHT - Self::ROAD_HEIGHT
    }

    /// The ground line: launch height, landing test and target lock.
    pub fn road_center_y(&self) -> f32 {
        self.road_top_y() + Self::ROAD_HEIGHT / 2.0
    }

    /// Vertical pixels available for trajectories (sky above the ground
    /// band).
    pub fn available_height(&self) -> f32 {
        self.height - Self::GRASS_HEIGHT - Self::ROAD_HEIGHT
    }
}

/// Inputs the world scale was last derived from. A change in any of them
/// invalidates the scale (and with it every pixel-space path).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleInputs {
    pub velocity: f32,
    pub angle: f32,
    pub gravity: f32,
    pub width: f32,
    pub height: f32,
}

/// World-to-pixel scale, recomputed so the predicted trajectory fits the
/// viewport. Always within [2, 50] px/m.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldScale {
    pub pixels_per_meter: f32,
    /// Snapshot of the inputs behind `pixels_per_meter`; `None` until the
    /// first recompute.
    pub inputs: Option<ScaleInputs>,
}

impl Default for WorldScale {
    fn default() -> Self {
        Self {
            pixels_per_meter: 10.0,
            inputs: None,
        }
    }
}

/// The single live projectile, if any.
///
/// Holding it in an `Option` makes the one-flight invariant structural:
/// there is no way to have two shots in the air.
#[derive(Resource, Default, Debug)]
pub struct ActiveFlight(pub Option<Projectile>);

/// Ordered history of completed flights, insertion order = fire order.
/// Unbounded until reset or a scale change clears it.
#[derive(Resource, Default, Debug)]
pub struct TraceHistory {
    pub traces: Vec<Trace>,
}

impl TraceHistory {
    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub fn clear(&mut self) {
        self.traces.clear();
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// Which entity currently owns the pointer drag.
///
/// A single enum rather than per-entity booleans, so target drag, meter
/// drag and cannon angle adjustment are mutually exclusive per press.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Target disc follows the pointer x.
    Target,
    /// Meter follows the pointer plus the offset captured at press time,
    /// so it does not jump to the cursor.
    Meter { grab_offset: Vec2 },
    /// Launch angle follows the pointer direction from the cannon pivot.
    CannonAngle,
}

/// The cannon: a fixed pivot on the road and the barrel angle.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Cannon {
    /// Pivot position (canvas px); locked to the road center line, x at
    /// 15% of the viewport width.
    pub pivot: Vec2,
    /// Barrel angle in degrees above the horizon, mirrors the live launch
    /// angle.
    pub angle: f32,
    /// Barrel length (px), presentation only.
    pub barrel_length: f32,
}

impl Default for Cannon {
    /// Pivot placed for the default viewport; `sync_cannon` re-derives it
    /// from the live viewport every frame.
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            pivot: Vec2::new(
                viewport.width * Self::PIVOT_X_RATIO,
                viewport.road_center_y(),
            ),
            angle: 25.0,
            barrel_length: 80.0,
        }
    }
}

impl Cannon {
    /// Pivot x as a fraction of the viewport width.
    pub const PIVOT_X_RATIO: f32 = 0.15;
    /// Half-extent of the 120×120 px hover square around the pivot.
    pub const HOVER_HALF_EXTENT: f32 = 60.0;

    /// Hover test: pointer within the square centered on the pivot.
    pub fn hover_test(&self, point: Vec2) -> bool {
        (point.x - self.pivot.x).abs() < Self::HOVER_HALF_EXTENT
            && (point.y - self.pivot.y).abs() < Self::HOVER_HALF_EXTENT
    }
}

/// The practice target on the road. Survives reset: its position is part
/// of the operator's setup, not of any one flight.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Target {
    /// Center position (canvas px); y is re-locked to the road center
    /// every frame.
    pub pos: Vec2,
    /// Disc diameter (px).
    pub size: f32,
}

impl Default for Target {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            pos: Vec2::new(viewport.width * 0.75, viewport.road_center_y()),
            size: 100.0,
        }
    }
}

impl Target {
    /// Circular hit test: distance from the center under half the size.
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.size / 2.0
    }

    /// Horizontal drag bounds keeping the full disc on screen.
    pub fn x_bounds(&self, viewport: &Viewport) -> (f32, f32) {
        (self.size / 2.0, viewport.width - self.size / 2.0)
    }
}

/// The free-floating trajectory probe. Survives reset, drags on both axes,
/// and snaps its readout to the nearest recorded path sample each frame.
#[derive(Resource, Clone, Copy, Debug)]
pub struct TrajectoryMeter {
    /// Center position (canvas px), unconstrained.
    pub pos: Vec2,
    /// Crosshair size (px); half of it is the grab radius.
    pub size: f32,
    /// Snapped readout for this frame, `None` when no sample is within
    /// tolerance.
    pub readout: Option<MeterSnap>,
}

impl Default for TrajectoryMeter {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            pos: Vec2::new(viewport.width / 2.0, viewport.height / 2.0),
            size: 20.0,
            readout: None,
        }
    }
}

impl TrajectoryMeter {
    /// Snap tolerance: the readout only shows when a sample is within this
    /// many pixels of the probe.
    pub const SNAP_TOLERANCE: f32 = 30.0;

    /// Circular hit test, same radius rule as the target.
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.size / 2.0
    }
}

/// What a canvas button does when pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    ExportReport,
    Reset,
    Fire,
}

/// A button drawn on the canvas itself (there is no DOM here).
#[derive(Clone, Copy, Debug)]
pub struct CanvasButton {
    pub label: &'static str,
    /// Horizontal center as a fraction of the viewport width.
    pub x_ratio: f32,
    /// Offset of the center above the bottom edge (px).
    pub y_offset: f32,
    /// Width × height (px).
    pub size: Vec2,
    pub action: ButtonAction,
}

impl CanvasButton {
    pub fn center(&self, viewport: &Viewport) -> Vec2 {
        Vec2::new(
            viewport.width * self.x_ratio,
            viewport.height - self.y_offset,
        )
    }

    pub fn contains(&self, point: Vec2, viewport: &Viewport) -> bool {
        let center = self.center(viewport);
        (point.x - center.x).abs() < self.size.x / 2.0
            && (point.y - center.y).abs() < self.size.y / 2.0
    }
}

/// The canvas button row. Declaration order is press-priority order.
#[derive(Resource, Clone, Debug)]
pub struct ButtonBar {
    pub buttons: Vec<CanvasButton>,
}

impl Default for ButtonBar {
    /// Report at 20% width, restart at 50%, fire at 80%; all 140×45 px,
    /// centered 30 px above the bottom edge.
    fn default() -> Self {
        let size = Vec2::new(140.0, 45.0);
        Self {
            buttons: vec![
                CanvasButton {
                    label: "Descargar informe",
                    x_ratio: 0.2,
                    y_offset: 30.0,
                    size,
                    action: ButtonAction::ExportReport,
                },
                CanvasButton {
                    label: "Reiniciar",
                    x_ratio: 0.5,
                    y_offset: 30.0,
                    size,
                    action: ButtonAction::Reset,
                },
                CanvasButton {
                    label: "¡Disparar!",
                    x_ratio: 0.8,
                    y_offset: 30.0,
                    size,
                    action: ButtonAction::Fire,
                },
            ],
        }
    }
}

/// Pointer position in canvas coordinates, mirrored from the window once
/// per frame so drag systems do not each re-query the window.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub position: Option<Vec2>,
}
