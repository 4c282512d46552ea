//! Input router - a single pointer entry point with explicit priority.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::events::{ExportCommand, FireCommand, ResetCommand};
use crate::resources::{
    ButtonAction, ButtonBar, Cannon, DragState, PointerState, Target, TrajectoryMeter, Viewport,
};

/// What a press resolved to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PressClaim {
    /// A canvas button; carries its action.
    Button(ButtonAction),
    /// The trajectory probe, with the grab offset captured at press time.
    Meter { grab_offset: Vec2 },
    /// The target disc.
    Target,
    /// The cannon hover square (angle adjustment).
    CannonAngle,
}

/// Resolve a press against an explicit, ordered candidate list.
///
/// Priority is a contract, not an accident of code order: buttons in
/// declared order, then the probe, then the target, then the cannon. The
/// first match consumes the press; later candidates are not tested.
pub fn route_press(
    press: Vec2,
    buttons: &ButtonBar,
    viewport: &Viewport,
    meter: &TrajectoryMeter,
    target: &Target,
    cannon: &Cannon,
) -> Option<PressClaim> {
    let claim_button = || {
        buttons
            .buttons
            .iter()
            .find(|button| button.contains(press, viewport))
            .map(|button| PressClaim::Button(button.action))
    };
    let claim_meter = || {
        meter.hit_test(press).then(|| PressClaim::Meter {
            grab_offset: meter.pos - press,
        })
    };
    let claim_target = || target.hit_test(press).then_some(PressClaim::Target);
    let claim_cannon = || cannon.hover_test(press).then_some(PressClaim::CannonAngle);

    let candidates: [&dyn Fn() -> Option<PressClaim>; 4] =
        [&claim_button, &claim_meter, &claim_target, &claim_cannon];
    candidates.iter().find_map(|candidate| candidate())
}

/// Mirror the window cursor into [`PointerState`] once per frame.
///
/// Cursor coordinates already are canvas coordinates (origin top-left, y
/// down); no window means no pointer.
pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
) {
    pointer.position = windows.single().ok().and_then(|window| window.cursor_position());
}

/// Translate presses into commands or drag ownership, and releases into a
/// full drag clear.
pub fn route_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerState>,
    viewport: Res<Viewport>,
    buttons: Res<ButtonBar>,
    meter: Res<TrajectoryMeter>,
    target: Res<Target>,
    cannon: Res<Cannon>,
    mut drag: ResMut<DragState>,
    mut fire: MessageWriter<FireCommand>,
    mut reset: MessageWriter<ResetCommand>,
    mut export: MessageWriter<ExportCommand>,
) {
    if mouse.just_pressed(MouseButton::Left) {
        if let Some(press) = pointer.position {
            match route_press(press, &buttons, &viewport, &meter, &target, &cannon) {
                Some(PressClaim::Button(ButtonAction::Fire)) => {
                    fire.write(FireCommand);
                }
                Some(PressClaim::Button(ButtonAction::Reset)) => {
                    reset.write(ResetCommand);
                }
                Some(PressClaim::Button(ButtonAction::ExportReport)) => {
                    export.write(ExportCommand);
                }
                Some(PressClaim::Meter { grab_offset }) => {
                    *drag = DragState::Meter { grab_offset };
                }
                Some(PressClaim::Target) => {
                    *drag = DragState::Target;
                }
                Some(PressClaim::CannonAngle) => {
                    *drag = DragState::CannonAngle;
                }
                None => {}
            }
        }
    }

    if mouse.just_released(MouseButton::Left) {
        // Unconditional and idempotent: safe even if nothing was dragging.
        *drag = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scene {
        buttons: ButtonBar,
        viewport: Viewport,
        meter: TrajectoryMeter,
        target: Target,
        cannon: Cannon,
    }

    fn scene() -> Scene {
        let viewport = Viewport::default();
        let mut cannon = Cannon::default();
        cannon.pivot = Vec2::new(
            viewport.width * Cannon::PIVOT_X_RATIO,
            viewport.road_center_y(),
        );
        Scene {
            buttons: ButtonBar::default(),
            viewport,
            meter: TrajectoryMeter::default(),
            target: Target::default(),
            cannon,
        }
    }

    fn route(scene: &Scene, press: Vec2) -> Option<PressClaim> {
        route_press(
            press,
            &scene.buttons,
            &scene.viewport,
            &scene.meter,
            &scene.target,
            &scene.cannon,
        )
    }

    #[test]
    fn meter_wins_where_meter_and_target_overlap() {
        let mut scene = scene();
        // Park the probe dead center on the target.
        scene.meter.pos = scene.target.pos;

        match route(&scene, scene.target.pos) {
            Some(PressClaim::Meter { grab_offset }) => assert_eq!(grab_offset, Vec2::ZERO),
            other => panic!("expected the meter to claim the press, got {other:?}"),
        }
    }

    #[test]
    fn buttons_outrank_everything() {
        let mut scene = scene();
        let fire_center = scene.buttons.buttons[2].center(&scene.viewport);
        // Stack the probe on the fire button.
        scene.meter.pos = fire_center;

        assert_eq!(
            route(&scene, fire_center),
            Some(PressClaim::Button(ButtonAction::Fire))
        );
    }

    #[test]
    fn cannon_square_claims_the_leftovers() {
        let scene = scene();
        let press = scene.cannon.pivot + Vec2::new(40.0, -40.0);
        assert_eq!(route(&scene, press), Some(PressClaim::CannonAngle));
    }

    #[test]
    fn a_miss_claims_nothing() {
        let scene = scene();
        assert_eq!(route(&scene, Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn grab_offset_keeps_the_probe_from_jumping() {
        let scene = scene();
        let press = scene.meter.pos + Vec2::new(4.0, -3.0);
        match route(&scene, press) {
            Some(PressClaim::Meter { grab_offset }) => {
                assert_eq!(grab_offset, Vec2::new(-4.0, 3.0));
            }
            other => panic!("expected a meter claim, got {other:?}"),
        }
    }
}
