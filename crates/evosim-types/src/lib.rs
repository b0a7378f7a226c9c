//! Shared type definitions for the evosim creature simulation.
//!
//! This crate holds the plain value types that flow between the simulation
//! core and whatever presents it.
//!
//! # Modules
//!
//! - [`geometry`] -- [`Vec2`] and the edge-collision [`BoundingBox`]
//! - [`snapshot`] -- Per-tick [`FrameSnapshot`] handed to renderers

pub mod geometry;
pub mod snapshot;

pub use geometry::{BoundingBox, Vec2};
pub use snapshot::{CreatureSnapshot, FrameSnapshot};
