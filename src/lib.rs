//! # Bevy Cannon Lab
//!
//! Interactive projectile-motion laboratory for Bevy 0.18.
//!
//! ## Features
//! - Semi-implicit Euler integration with optional quadratic air drag
//! - Four projectile presets: cannonball, piano, car, human
//! - Draggable target, trajectory probe and cannon barrel angle
//! - Auto-scaling pixels-per-meter fit to the predicted trajectory
//! - Launch trace history and a printable flight report
//!
//! ## Quick Start
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_cannon_lab::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(CannonLabPluginGroup)
//!         .run();
//! }
//! ```

pub mod events;
pub mod report;
pub mod resources;
pub mod systems;
pub mod types;

pub mod prelude {
    pub use crate::events::*;
    pub use crate::resources::*;
    pub use crate::types::*;
    pub use crate::CannonLabPluginGroup;
    pub use crate::LabSet;
    pub use crate::{CannonLabCorePlugin, CannonLabDrawPlugin, CannonLabInputPlugin};
}

use bevy::prelude::*;

/// Frame phases. Input routing settles drags and commands before the
/// simulation consumes them; presentation reads a finished frame.
#[derive(SystemSet, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum LabSet {
    Input,
    Sim,
    Present,
}

/// Main plugin group bundling the whole laboratory:
/// - Core simulation (scale fit, flight integration, fire/reset/report)
/// - Pointer input (press routing, drag lifecycle)
/// - Presentation (scene sprites, gizmo overlays, labels)
#[derive(Default)]
pub struct CannonLabPluginGroup;

impl PluginGroup for CannonLabPluginGroup {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(CannonLabCorePlugin)
            .add(CannonLabInputPlugin)
            .add(CannonLabDrawPlugin)
    }
}

/// Core simulation plugin. Usable headless: it touches no window input
/// beyond reading the primary window's size when one exists.
///
/// # Systems (chained, [`LabSet::Sim`])
/// - `sync_viewport` - mirrors the primary window size
/// - `recompute_scale` - refits pixels-per-meter when launch inputs change
/// - `handle_fire` / `handle_reset` - consume the command messages
/// - `sync_cannon` - pivot placement and barrel-angle write-back
/// - `drag_target` / `drag_meter` - live drag positions
/// - `update_flight` - flight integration and landing
/// - `update_meter_readout` - probe snapping against recorded paths
/// - `export_report` - writes the flight report on demand
pub struct CannonLabCorePlugin;

impl Plugin for CannonLabCorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<resources::LaunchParams>()
            .init_resource::<resources::LaunchParams>()
            .init_resource::<resources::Viewport>()
            .init_resource::<resources::WorldScale>()
            .init_resource::<resources::ActiveFlight>()
            .init_resource::<resources::TraceHistory>()
            .init_resource::<resources::DragState>()
            .init_resource::<resources::Cannon>()
            .init_resource::<resources::Target>()
            .init_resource::<resources::TrajectoryMeter>()
            .init_resource::<resources::ButtonBar>()
            .init_resource::<resources::PointerState>()
            .add_message::<events::FireCommand>()
            .add_message::<events::ResetCommand>()
            .add_message::<events::ExportCommand>()
            .configure_sets(
                Update,
                (LabSet::Input, LabSet::Sim, LabSet::Present).chain(),
            )
            .add_systems(
                Update,
                (
                    systems::scale::sync_viewport,
                    systems::scale::recompute_scale,
                    systems::logic::handle_fire,
                    systems::logic::handle_reset,
                    systems::entities::sync_cannon,
                    systems::entities::drag_target,
                    systems::entities::drag_meter,
                    systems::kinematics::update_flight,
                    systems::entities::update_meter_readout,
                    report::export_report,
                )
                    .chain()
                    .in_set(LabSet::Sim),
            );
    }
}

/// Pointer input plugin. Split out of the core so headless apps don't
/// need `ButtonInput<MouseButton>` or a window.
///
/// # Systems (chained, [`LabSet::Input`])
/// - `track_pointer` - mirrors the cursor position into [`resources::PointerState`]
/// - `route_pointer` - turns presses into button commands or drag grabs
pub struct CannonLabInputPlugin;

impl Plugin for CannonLabInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (systems::input::track_pointer, systems::input::route_pointer)
                .chain()
                .in_set(LabSet::Input),
        );
    }
}

/// Presentation plugin: sky backdrop, ground sprites, toolbar, gizmo
/// overlays for the cannon, target, probe, traces and projectile.
pub struct CannonLabDrawPlugin;

impl Plugin for CannonLabDrawPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(systems::draw::SKY_COLOR))
            .add_systems(Startup, systems::draw::setup_scene)
            .add_systems(
                Update,
                (
                    systems::draw::layout_scene,
                    systems::draw::update_button_visuals,
                    systems::draw::draw_road_markings,
                    systems::draw::draw_cannon,
                    systems::draw::draw_target,
                    systems::draw::draw_meter,
                    systems::draw::draw_traces,
                    systems::draw::draw_projectile,
                    systems::draw::update_readout_text,
                    systems::draw::update_target_label,
                )
                    .in_set(LabSet::Present),
            );
    }
}
