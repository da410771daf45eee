//! Camera auto-framing for turngrid
//!
//! Given a camera pose and an object's bounding box, this crate computes the
//! camera distance along the view axis at which the object's projected
//! silhouette occupies a target fraction of the frame. The camera's
//! orientation is never changed; callers apply the returned position.

pub mod framing;

pub use framing::*;
