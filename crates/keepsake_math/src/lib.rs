//! Math library for the Keepsake card renderer
//!
//! This crate provides the small math toolkit the rest of the workspace
//! builds on.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for transforms and projection
//! - [`Easing`] - Named interpolation curves (bounce-out, elastic-out, ...)
//! - [`PathOutline`] - Flattened 2D cubic-Bezier outlines for extrusion

mod vec3;
pub mod mat4;
mod easing;
mod path;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use easing::Easing;
pub use path::PathOutline;
