//! World-space bounding boxes

use crate::Point3f;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box described by its eight corner points
///
/// The corners live in whatever frame the caller built them in (usually world
/// space, i.e. an object's local extents pushed through its world transform).
/// The box is immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    corners: [Point3f; 8],
}

impl BoundingBox {
    /// Create a bounding box from eight explicit corner points
    pub fn from_corners(corners: [Point3f; 8]) -> Self {
        Self { corners }
    }

    /// Create a bounding box from minimum and maximum extents
    ///
    /// Enumerates the eight corners of the axis-aligned box spanned by
    /// `min` and `max`.
    pub fn from_min_max(min: Point3f, max: Point3f) -> Self {
        let mut corners = [Point3f::origin(); 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            corner.x = if i & 1 == 0 { min.x } else { max.x };
            corner.y = if i & 2 == 0 { min.y } else { max.y };
            corner.z = if i & 4 == 0 { min.z } else { max.z };
        }
        Self { corners }
    }

    /// The eight corner points
    pub fn corners(&self) -> &[Point3f; 8] {
        &self.corners
    }

    /// Apply a homogeneous transform to every corner
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let mut corners = self.corners;
        for corner in &mut corners {
            *corner = matrix.transform_point(corner);
        }
        Self { corners }
    }

    /// Centroid of the eight corners
    pub fn center(&self) -> Point3f {
        let sum = self
            .corners
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, c| acc + c.coords);
        Point3f::from(sum / 8.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_from_min_max_spans_extents() {
        let bbox = BoundingBox::from_min_max(
            Point3f::new(-1.0, -2.0, -3.0),
            Point3f::new(1.0, 2.0, 3.0),
        );

        for corner in bbox.corners() {
            assert!(corner.x == -1.0 || corner.x == 1.0);
            assert!(corner.y == -2.0 || corner.y == 2.0);
            assert!(corner.z == -3.0 || corner.z == 3.0);
        }

        // All eight corners are distinct
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(bbox.corners()[i], bbox.corners()[j]);
            }
        }
    }

    #[test]
    fn test_center() {
        let bbox = BoundingBox::from_min_max(
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(2.0, 4.0, 6.0),
        );
        let center = bbox.center();
        assert_relative_eq!(center.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(center.z, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_transformed_translation() {
        let bbox = BoundingBox::from_min_max(
            Point3f::new(-1.0, -1.0, -1.0),
            Point3f::new(1.0, 1.0, 1.0),
        );
        let moved = bbox.transformed(&Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0)));
        let center = moved.center();
        assert_relative_eq!(center.x, 5.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
    }
}
