//! Full interactive laboratory with a keyboard parameter panel.
//!
//! Mouse: drag the target along the road, drag the probe crosshair
//! anywhere, drag near the cannon pivot to aim, click the toolbar.
//!
//! Keyboard:
//! - `1`-`4`    projectile presets (cannonball, piano, car, human)
//! - Up/Down    initial velocity
//! - Left/Right launch angle
//! - `G`/`H`    gravity
//! - `M`/`N`    mass
//! - `C`/`V`    diameter
//! - `A`        toggle air drag
//! - Space      fire, `R` reset, `E` export the report

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_cannon_lab::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Laboratorio de tiro parabólico".into(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CannonLabPluginGroup)
        .add_systems(Startup, setup)
        .add_systems(Update, (keyboard_panel, update_hud))
        .run();
}

#[derive(Component)]
struct Hud;

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
    commands.spawn((
        Hud,
        Text::new(""),
        TextFont::from_font_size(15.0),
        TextColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

fn keyboard_panel(
    keys: Res<ButtonInput<KeyCode>>,
    mut params: ResMut<LaunchParams>,
    mut fire: MessageWriter<FireCommand>,
    mut reset: MessageWriter<ResetCommand>,
    mut export: MessageWriter<ExportCommand>,
) {
    for (key, kind) in [
        (KeyCode::Digit1, ProjectileKind::Cannonball),
        (KeyCode::Digit2, ProjectileKind::Piano),
        (KeyCode::Digit3, ProjectileKind::Car),
        (KeyCode::Digit4, ProjectileKind::Human),
    ] {
        if keys.just_pressed(key) {
            params.apply_preset(kind);
        }
    }

    let held = |key| keys.pressed(key);
    if held(KeyCode::ArrowUp) {
        let v = params.velocity + 0.2;
        params.set_velocity(v);
    }
    if held(KeyCode::ArrowDown) {
        let v = params.velocity - 0.2;
        params.set_velocity(v);
    }
    if held(KeyCode::ArrowRight) {
        let a = params.angle + 0.5;
        params.set_angle(a);
    }
    if held(KeyCode::ArrowLeft) {
        let a = params.angle - 0.5;
        params.set_angle(a);
    }
    if held(KeyCode::KeyH) {
        let g = params.gravity + 0.05;
        params.set_gravity(g);
    }
    if held(KeyCode::KeyG) {
        let g = params.gravity - 0.05;
        params.set_gravity(g);
    }
    if held(KeyCode::KeyM) {
        let m = params.mass + 1.0;
        params.set_mass(m);
    }
    if held(KeyCode::KeyN) {
        let m = params.mass - 1.0;
        params.set_mass(m);
    }
    if held(KeyCode::KeyC) {
        let d = params.diameter + 0.01;
        params.set_diameter(d);
    }
    if held(KeyCode::KeyV) {
        let d = params.diameter - 0.01;
        params.set_diameter(d);
    }

    if keys.just_pressed(KeyCode::KeyA) {
        params.drag_enabled = !params.drag_enabled;
    }
    if keys.just_pressed(KeyCode::Space) {
        fire.write(FireCommand);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        reset.write(ResetCommand);
    }
    if keys.just_pressed(KeyCode::KeyE) {
        export.write(ExportCommand);
    }
}

fn update_hud(
    params: Res<LaunchParams>,
    scale: Res<WorldScale>,
    history: Res<TraceHistory>,
    mut hud: Query<&mut Text, With<Hud>>,
) {
    let Ok(mut text) = hud.single_mut() else {
        return;
    };
    text.0 = format!(
        "{}\n\
         Masa: {:.2} kg   Diámetro: {:.2} m\n\
         Velocidad: {:.1} m/s   Ángulo: {:.1}°\n\
         Gravedad: {:.2} m/s²   Arrastre: {}\n\
         Escala: {:.1} px/m   Lanzamientos: {}",
        params.kind.display_name(),
        params.mass,
        params.diameter,
        params.velocity,
        params.angle,
        params.gravity,
        if params.drag_enabled { "sí" } else { "no" },
        scale.pixels_per_meter,
        history.len(),
    );
}
