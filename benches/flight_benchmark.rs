//! Benchmark for full-flight integration performance.

use bevy_cannon_lab::resources::{ActiveFlight, Cannon, LaunchParams, TraceHistory, Viewport};
use bevy_cannon_lab::systems::kinematics::step_flight;
use bevy_cannon_lab::systems::logic::fire;
use bevy_cannon_lab::systems::scale::{compute_scale, MIN_PIXELS_PER_METER};
use bevy_cannon_lab::types::ProjectileKind;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const DT: f32 = 1.0 / 240.0;
const MAX_STEPS: usize = 240 * 60;

fn full_flight(kind: ProjectileKind, drag_enabled: bool) -> usize {
    let viewport = Viewport::default();
    let cannon = Cannon::default();
    let mut params = LaunchParams::default();
    params.apply_preset(kind);
    params.drag_enabled = drag_enabled;

    let pixels_per_meter = compute_scale(
        params.velocity,
        params.angle,
        params.gravity,
        viewport.width,
        viewport.available_height(),
    );

    let mut flight = ActiveFlight::default();
    let mut history = TraceHistory::default();
    fire(&mut flight, &mut history, &params, cannon.pivot);

    let mut steps = 0;
    if let Some(shot) = flight.0.as_mut() {
        while shot.in_flight() && steps < MAX_STEPS {
            step_flight(shot, DT, pixels_per_meter, viewport.road_center_y());
            steps += 1;
        }
    }
    steps
}

fn benchmark_full_flight(c: &mut Criterion) {
    let mut group = c.benchmark_group("Full Flight");

    for (name, kind, drag) in [
        ("cannonball", ProjectileKind::Cannonball, false),
        ("cannonball_drag", ProjectileKind::Cannonball, true),
        ("piano", ProjectileKind::Piano, false),
        ("car_drag", ProjectileKind::Car, true),
        ("human", ProjectileKind::Human, false),
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(kind, drag),
            |b, &(kind, drag)| {
                b.iter(|| {
                    let steps = full_flight(kind, drag);
                    assert!(steps > 0);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_scale_fit(c: &mut Criterion) {
    let viewport = Viewport::default();
    let mut group = c.benchmark_group("Scale Fit");

    for velocity in [10.0f32, 18.0, 50.0, 100.0] {
        group.bench_with_input(
            BenchmarkId::from_parameter(velocity),
            &velocity,
            |b, &velocity| {
                b.iter(|| {
                    let scale = compute_scale(
                        velocity,
                        45.0,
                        9.81,
                        viewport.width,
                        viewport.available_height(),
                    );
                    assert!(scale >= MIN_PIXELS_PER_METER);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_full_flight, benchmark_scale_fit);
criterion_main!(benches);
