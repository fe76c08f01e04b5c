//! The core `furnish-rs` library: geometric primitives and the entities needed
//! to populate rooms of a classified floor plan with furniture.
//!
//! All coordinates live in the pixel space of the source floor-plan image:
//! x grows to the right, y grows downwards. Angles are expressed in degrees.

/// Entities modelling rooms, walls and furniture
pub mod entities;

/// Geometric primitives and base algorithms
pub mod geometry;

/// Helper utilities which do not belong to any specific module
pub mod util;
