//! Camera pose snapshots

use crate::{Error, Point3f, Result, Vector3f};
use nalgebra::Isometry3;
use serde::{Deserialize, Serialize};

/// How the camera's field of view maps onto the sensor
///
/// With `Horizontal` fit the stored vertical FOV is widened by the aspect
/// ratio to obtain the horizontal FOV. With `Vertical` fit the vertical angle
/// is used for both axes, mirroring the source renderer's sensor semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SensorFit {
    #[default]
    Horizontal,
    Vertical,
}

/// A read-only snapshot of a camera's pose and projection parameters
///
/// The pose maps camera-local coordinates to world space, with the usual
/// right-handed convention: the camera looks down its local negative Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Camera-to-world transform
    pub pose: Isometry3<f32>,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Frame width divided by frame height
    pub aspect_ratio: f32,
    /// Near clip plane distance
    pub near_clip: f32,
    /// Sensor fit mode
    pub sensor_fit: SensorFit,
}

impl CameraPose {
    /// Create a camera pose from an explicit camera-to-world transform
    pub fn new(
        pose: Isometry3<f32>,
        fov_y: f32,
        aspect_ratio: f32,
        near_clip: f32,
        sensor_fit: SensorFit,
    ) -> Self {
        Self {
            pose,
            fov_y,
            aspect_ratio,
            near_clip,
            sensor_fit,
        }
    }

    /// Create a camera at `eye` looking at `target`
    pub fn looking_at(
        eye: Point3f,
        target: Point3f,
        up: Vector3f,
        fov_y: f32,
        aspect_ratio: f32,
        near_clip: f32,
    ) -> Self {
        // look_at_rh builds the world-to-camera view transform; the pose is
        // its inverse.
        let pose = Isometry3::look_at_rh(&eye, &target, &up).inverse();
        Self::new(pose, fov_y, aspect_ratio, near_clip, SensorFit::default())
    }

    /// World-space camera position
    pub fn position(&self) -> Point3f {
        Point3f::from(self.pose.translation.vector)
    }

    /// World-space unit view direction
    pub fn forward(&self) -> Vector3f {
        self.pose.transform_vector(&-Vector3f::z())
    }

    /// World-to-camera transform
    pub fn world_to_camera(&self) -> Isometry3<f32> {
        self.pose.inverse()
    }

    /// Check projection parameters, rejecting degenerate values
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return Err(Error::InvalidConfiguration(format!(
                "vertical FOV must be in (0, pi), got {}",
                self.fov_y
            )));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if self.near_clip <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "near clip distance must be positive, got {}",
                self.near_clip
            )));
        }
        Ok(())
    }
}
