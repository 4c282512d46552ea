//! Fire/reset protocol and trace bookkeeping.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::events::{FireCommand, ResetCommand};
use crate::resources::{ActiveFlight, Cannon, LaunchParams, TraceHistory};
use crate::types::{Projectile, Trace};

/// Fire the cannon.
///
/// A no-op while a shot is still in flight (no overlapping flights). A
/// landed shot is first moved, path and config, into the history, then
/// a fresh projectile is built at the muzzle with a velocity derived from
/// the captured angle and speed. The launch configuration snapshot rides
/// along on the projectile for the report.
pub fn fire(
    flight: &mut ActiveFlight,
    history: &mut TraceHistory,
    params: &LaunchParams,
    muzzle: Vec2,
) {
    if flight.0.as_ref().is_some_and(Projectile::in_flight) {
        return;
    }

    if let Some(done) = flight.0.take() {
        history.push(Trace {
            path: done.path,
            config: done.config,
        });
    }

    let config = params.config();
    let theta = config.angle.to_radians();
    // Canvas y grows downward, so "up" is negative y.
    let vel = Vec2::new(theta.cos(), -theta.sin()) * config.velocity;

    flight.0 = Some(Projectile::new(muzzle, vel, config));
}

/// Reset the simulation: the active flight is discarded (not archived) and
/// the history cleared. Target and probe positions are left alone; they
/// belong to the operator's setup, not to any one flight.
pub fn reset(flight: &mut ActiveFlight, history: &mut TraceHistory) {
    flight.0 = None;
    history.clear();
}

pub fn handle_fire(
    mut messages: MessageReader<FireCommand>,
    cannon: Res<Cannon>,
    params: Res<LaunchParams>,
    mut flight: ResMut<ActiveFlight>,
    mut history: ResMut<TraceHistory>,
) {
    for _ in messages.read() {
        fire(&mut flight, &mut history, &params, cannon.pivot);
    }
}

pub fn handle_reset(
    mut messages: MessageReader<ResetCommand>,
    mut flight: ResMut<ActiveFlight>,
    mut history: ResMut<TraceHistory>,
) {
    for _ in messages.read() {
        reset(&mut flight, &mut history);
        info!("simulation reset, traces cleared");
    }
}
