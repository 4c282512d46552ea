//! Common types for the projectile laboratory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The kind of object loaded into the cannon.
///
/// A closed set of classroom favourites; selecting a kind overwrites the
/// editable mass, diameter, velocity and angle with its preset values.
///
/// # Variants
/// * `Cannonball` - the default 17.6 kg iron ball
/// * `Piano` - a 400 kg grand, launched straight up
/// * `Car` - a 1000 kg car, also straight up
/// * `Human` - a 70 kg volunteer
///
/// # Example
/// ```
/// use bevy_cannon_lab::types::ProjectileKind;
///
/// let preset = ProjectileKind::Piano.preset();
/// assert_eq!(preset.mass, 400.0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    /// Iron cannonball (default load)
    Cannonball,
    /// Grand piano
    Piano,
    /// Family car
    Car,
    /// Human volunteer
    Human,
}

/// Preset launch values attached to a [`ProjectileKind`].
#[derive(Clone, Copy, Debug)]
pub struct KindPreset {
    /// Mass (kg)
    pub mass: f32,
    /// Diameter (m)
    pub diameter: f32,
    /// Initial velocity (m/s)
    pub velocity: f32,
    /// Launch angle (degrees)
    pub angle: f32,
}

impl ProjectileKind {
    /// All kinds in selector order.
    pub const ALL: [ProjectileKind; 4] = [
        ProjectileKind::Cannonball,
        ProjectileKind::Piano,
        ProjectileKind::Car,
        ProjectileKind::Human,
    ];

    /// Preset mass/diameter/velocity/angle for this kind.
    pub fn preset(self) -> KindPreset {
        match self {
            ProjectileKind::Cannonball => KindPreset {
                mass: 17.60,
                diameter: 0.18,
                velocity: 18.0,
                angle: 25.0,
            },
            ProjectileKind::Piano => KindPreset {
                mass: 400.0,
                diameter: 1.5,
                velocity: 10.0,
                angle: 90.0,
            },
            ProjectileKind::Car => KindPreset {
                mass: 1000.0,
                diameter: 2.5,
                velocity: 50.0,
                angle: 90.0,
            },
            ProjectileKind::Human => KindPreset {
                mass: 70.0,
                diameter: 0.7,
                velocity: 20.0,
                angle: 90.0,
            },
        }
    }

    /// Display name used in the exported report (labels are fixed Spanish).
    pub fn display_name(self) -> &'static str {
        match self {
            ProjectileKind::Cannonball => "Bala de Cañón",
            ProjectileKind::Piano => "Piano",
            ProjectileKind::Car => "Coche",
            ProjectileKind::Human => "Humano",
        }
    }
}

/// Immutable snapshot of all parameters governing one flight.
///
/// Captured from the live [`LaunchParams`](crate::resources::LaunchParams)
/// at fire time and attached to the projectile, so later parameter edits
/// cannot corrupt an in-flight or recorded shot.
///
/// # Fields
/// * `kind` - the selected projectile kind
/// * `mass` - mass in kilograms (> 0)
/// * `diameter` - diameter in meters (> 0), sets the drag cross-section
/// * `velocity` - initial speed in m/s (>= 0)
/// * `angle` - launch angle in degrees, within [0, 90]
/// * `gravity` - gravitational acceleration in m/s² (> 0)
/// * `drag_enabled` - whether quadratic air resistance applies
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub kind: ProjectileKind,
    pub mass: f32,
    pub diameter: f32,
    pub velocity: f32,
    pub angle: f32,
    pub gravity: f32,
    pub drag_enabled: bool,
}

/// One recorded point of a flight.
///
/// Positions are canvas pixels (origin top-left, y grows downward); `t` is
/// seconds since the shot was fired.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    /// Elapsed flight time (s)
    pub t: f32,
    /// Horizontal pixel position
    pub x: f32,
    /// Vertical pixel position (down is positive)
    pub y: f32,
}

impl PathSample {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Time-stamped sequence of positions recorded during one flight.
///
/// Append-only while the shot is in flight, frozen once it lands. Sample
/// times are non-decreasing by construction: they come from one cumulative
/// clock that only moves forward.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlightPath(Vec<PathSample>);

impl FlightPath {
    /// Append a sample. Debug builds assert the time-ordering invariant.
    pub fn push(&mut self, sample: PathSample) {
        debug_assert!(
            self.0.last().map_or(true, |last| sample.t >= last.t),
            "path sample times must be non-decreasing"
        );
        self.0.push(sample);
    }

    pub fn samples(&self) -> &[PathSample] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A completed flight retained for comparison: its path plus the launch
/// configuration that produced it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trace {
    pub path: FlightPath,
    pub config: LaunchConfig,
}

/// A trajectory-probe readout snapped to one recorded path sample.
///
/// Built fresh every frame; `range` and `height` are meters derived from
/// pixel deltas via the current world scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeterSnap {
    /// Elapsed flight time at the sample (s)
    pub time: f32,
    /// Horizontal distance from the cannon pivot (m)
    pub range: f32,
    /// Height above the road center line (m, never negative)
    pub height: f32,
    /// The snapped sample position (canvas px)
    pub point: Vec2,
}

/// Flight state machine. `Landed` is terminal: no further integration, the
/// path is frozen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FlightPhase {
    InFlight,
    Landed,
}

/// The live projectile.
///
/// At most one instance exists at a time, held in
/// [`ActiveFlight`](crate::resources::ActiveFlight). Position is canvas
/// pixels; velocity stays in SI units (m/s) for the whole flight, and the
/// world scale bridges units only when the position is advanced.
#[derive(Clone, Debug)]
pub struct Projectile {
    /// Position (canvas px, y down)
    pub pos: Vec2,
    /// Velocity (m/s, y down)
    pub vel: Vec2,
    /// Launch configuration captured at fire time
    pub config: LaunchConfig,
    /// Recorded path so far
    pub path: FlightPath,
    /// Cumulative flight time (s)
    pub elapsed: f32,
    /// InFlight or Landed
    pub phase: FlightPhase,
}

impl Projectile {
    /// Create a projectile at the muzzle with the given initial velocity.
    pub fn new(pos: Vec2, vel: Vec2, config: LaunchConfig) -> Self {
        Self {
            pos,
            vel,
            config,
            path: FlightPath::default(),
            elapsed: 0.0,
            phase: FlightPhase::InFlight,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.phase == FlightPhase::InFlight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_the_selector_table() {
        let cannonball = ProjectileKind::Cannonball.preset();
        assert_eq!(cannonball.mass, 17.60);
        assert_eq!(cannonball.diameter, 0.18);
        assert_eq!(cannonball.velocity, 18.0);
        assert_eq!(cannonball.angle, 25.0);

        let car = ProjectileKind::Car.preset();
        assert_eq!(car.mass, 1000.0);
        assert_eq!(car.velocity, 50.0);
    }

    #[test]
    fn display_names_are_spanish() {
        assert_eq!(ProjectileKind::Cannonball.display_name(), "Bala de Cañón");
        assert_eq!(ProjectileKind::Human.display_name(), "Humano");
    }

    #[test]
    fn path_accepts_monotonic_samples() {
        let mut path = FlightPath::default();
        path.push(PathSample { t: 0.0, x: 0.0, y: 0.0 });
        path.push(PathSample { t: 0.016, x: 1.0, y: -1.0 });
        path.push(PathSample { t: 0.016, x: 1.5, y: -1.2 });
        assert_eq!(path.len(), 3);
    }
}
