//! Buffered command messages for the laboratory.
//!
//! Note: In Bevy 0.18, buffered events use the `Message` trait instead of
//! `Event`.

use bevy::ecs::message::Message;

/// Fire the cannon with the current launch parameters.
///
/// A no-op while a shot is still in flight; a landed shot is moved into the
/// trace history before the new one spawns.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct FireCommand;

/// Discard the active flight and clear the trace history. Target and probe
/// positions are deliberately left alone.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ResetCommand;

/// Export the trace history (plus the active flight, landed or not) as a
/// report document.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ExportCommand;
