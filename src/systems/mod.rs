//! Per-frame systems for the projectile laboratory.

pub mod draw;
pub mod entities;
pub mod input;
pub mod kinematics;
pub mod logic;
pub mod scale;
