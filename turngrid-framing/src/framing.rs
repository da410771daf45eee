//! Framing distance computation

use turngrid_core::{BoundingBox, CameraPose, Error, Point3f, Result, SensorFit};

/// 2D extent of the bounding box corners in camera-local space, together with
/// the largest per-corner frustum distance.
struct Silhouette {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
    max_distance: f32,
}

impl Silhouette {
    fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Horizontal FOV derived from the vertical FOV and sensor fit
///
/// The vertical fit mode reuses the vertical angle for the horizontal axis
/// as well, matching the source renderer's sensor semantics.
fn horizontal_fov(camera: &CameraPose) -> f32 {
    match camera.sensor_fit {
        SensorFit::Vertical => camera.fov_y,
        SensorFit::Horizontal => {
            2.0 * ((camera.fov_y / 2.0).tan() * camera.aspect_ratio).atan()
        }
    }
}

/// Project the bounding box corners into camera-local space
///
/// Only corners strictly in front of the camera (negative local Z) contribute.
/// `half_tan_x`/`half_tan_y` are the tangents of the half FOV per axis; the
/// per-corner distance is the distance at which the corner's offset reaches
/// the frustum edge at the near clip plane.
fn project_silhouette(
    camera: &CameraPose,
    bbox: &BoundingBox,
    half_tan_x: f32,
    half_tan_y: f32,
) -> Result<Silhouette> {
    let world_to_camera = camera.world_to_camera();

    let mut found = false;
    let mut silhouette = Silhouette {
        min_x: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        min_y: f32::INFINITY,
        max_y: f32::NEG_INFINITY,
        max_distance: 0.0,
    };

    for corner in bbox.corners() {
        let local = world_to_camera.transform_point(corner);
        if local.z >= 0.0 {
            continue;
        }
        found = true;

        silhouette.min_x = silhouette.min_x.min(local.x);
        silhouette.max_x = silhouette.max_x.max(local.x);
        silhouette.min_y = silhouette.min_y.min(local.y);
        silhouette.max_y = silhouette.max_y.max(local.y);

        let dist_x = if local.x != 0.0 {
            (local.x * camera.near_clip / half_tan_x).abs()
        } else {
            0.0
        };
        let dist_y = if local.y != 0.0 {
            (local.y * camera.near_clip / half_tan_y).abs()
        } else {
            0.0
        };
        silhouette.max_distance = silhouette.max_distance.max(dist_x.max(dist_y));
    }

    if !found {
        return Err(Error::DegenerateGeometry(
            "all bounding box corners are behind the camera".to_string(),
        ));
    }
    Ok(silhouette)
}

/// Compute the framing distance for a target coverage
///
/// Transforms the bounding box corners into camera-local space, bounds their
/// 2D silhouette, and returns the distance along the camera's view axis at
/// which that silhouette occupies `target_coverage` of the visible frame.
///
/// # Arguments
/// * `camera` - Camera pose and projection snapshot
/// * `bbox` - The object's world-space bounding box
/// * `target_coverage` - Desired frame fraction in (0, 1]
///
/// # Returns
/// * `Result<f32>` - Distance along the camera's forward axis
///
/// # Errors
/// `InvalidConfiguration` for non-positive coverage or degenerate camera
/// parameters; `DegenerateGeometry` when no corner lies in front of the
/// camera or the silhouette collapses onto the view axis.
pub fn compute_framing_distance(
    camera: &CameraPose,
    bbox: &BoundingBox,
    target_coverage: f32,
) -> Result<f32> {
    camera.validate()?;
    if target_coverage <= 0.0 {
        return Err(Error::InvalidConfiguration(format!(
            "target coverage must be positive, got {}",
            target_coverage
        )));
    }

    let half_tan_x = (horizontal_fov(camera) / 2.0).tan();
    let half_tan_y = (camera.fov_y / 2.0).tan();

    let silhouette = project_silhouette(camera, bbox, half_tan_x, half_tan_y)?;
    if silhouette.max_distance <= 0.0 {
        return Err(Error::DegenerateGeometry(
            "bounding box collapses onto the view axis".to_string(),
        ));
    }

    let view_width = 2.0 * half_tan_x * silhouette.max_distance;
    let view_height = 2.0 * half_tan_y * silhouette.max_distance;

    let current_coverage =
        (silhouette.width() / view_width).max(silhouette.height() / view_height);
    if current_coverage <= 0.0 {
        return Err(Error::DegenerateGeometry(
            "silhouette has zero extent".to_string(),
        ));
    }

    Ok(silhouette.max_distance * target_coverage / current_coverage)
}

/// Evaluate frame coverage at a given distance along the view axis
///
/// Uses the same silhouette bound as [`compute_framing_distance`]: the
/// returned value is the larger of the silhouette's width and height relative
/// to the view frustum's extent at `distance`.
pub fn coverage_at_distance(
    camera: &CameraPose,
    bbox: &BoundingBox,
    distance: f32,
) -> Result<f32> {
    camera.validate()?;
    if distance <= 0.0 {
        return Err(Error::InvalidConfiguration(format!(
            "distance must be positive, got {}",
            distance
        )));
    }

    let half_tan_x = (horizontal_fov(camera) / 2.0).tan();
    let half_tan_y = (camera.fov_y / 2.0).tan();

    let silhouette = project_silhouette(camera, bbox, half_tan_x, half_tan_y)?;

    let view_width = 2.0 * half_tan_x * distance;
    let view_height = 2.0 * half_tan_y * distance;
    Ok((silhouette.width() / view_width).max(silhouette.height() / view_height))
}

/// Compute the camera position that frames the bounding box
///
/// The camera moves straight along its current view axis; orientation is
/// preserved. The caller applies the returned position to its own camera
/// object, keeping the prior position when an error is returned.
pub fn frame_camera(
    camera: &CameraPose,
    bbox: &BoundingBox,
    target_coverage: f32,
) -> Result<Point3f> {
    let distance = compute_framing_distance(camera, bbox, target_coverage)?;
    log::debug!("framing distance {distance} for coverage {target_coverage}");
    Ok(camera.position() + camera.forward() * distance)
}
