//! Core data structures and error types for turngrid
//!
//! This crate provides the shared types used by the framing and compositing
//! crates: world-space bounding boxes, camera pose snapshots, and the
//! workspace-wide error enum.

pub mod bounds;
pub mod camera;
pub mod error;

pub use bounds::*;
pub use camera::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Isometry3, Matrix4, Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Common result type for turngrid operations
pub type Result<T> = std::result::Result<T, Error>;
