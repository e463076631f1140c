//! Camera rig construction and projection math
//!
//! A [`CameraRig`] is a transient descriptor: built fresh per bake invocation
//! from the current viewer pose, consumed by the baker, and discarded. The
//! camera image plane is always square, so projected pixels stay undistorted
//! regardless of the fitted extent.
//!
//! Convention: camera space is right-handed with +X right, +Y up, and the
//! camera looking down -Z.

use glam::{Mat3, Mat4, Quat, Vec3};
use log::debug;

use crate::error::BakeError;
use crate::mesh::Aabb;

/// Extents below this have no usable silhouette to frame
const MIN_FIT_EXTENT: f32 = 1e-6;

/// Position and orientation of the current viewer (or any camera anchor)
#[derive(Debug, Clone, Copy)]
pub struct ViewerPose {
    pub position: Vec3,
    /// Orthonormal rotation mapping camera-local axes into world space
    pub rotation: Quat,
}

impl ViewerPose {
    /// Create a pose at `position` looking toward `target`
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - position).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(up).normalize_or(Vec3::X);
        let true_up = right.cross(forward);
        Self {
            position,
            rotation: Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward)),
        }
    }

    /// World-space view direction
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

/// Projection volume of a rig; the image plane is square in both cases
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Orthographic frustum with half-extent in camera X and Y
    Orthographic { half_extent: f32, near: f32, far: f32 },
    /// Perspective frustum with a vertical field of view (radians), aspect 1:1
    Perspective { fov_y: f32, near: f32, far: f32 },
}

/// Immutable camera transform plus projection descriptor
///
/// Derived per invocation, never persisted by the core. Callers that want a
/// persistent camera object in the host scene keep this descriptor and
/// marshal it out themselves.
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub position: Vec3,
    pub rotation: Quat,
    pub projection: Projection,
}

impl CameraRig {
    /// Fit a square orthographic rig to `bounds` as seen from `viewer`
    ///
    /// The bounds' corners are taken into viewer-local space; the larger of
    /// the local X/Y extents (scaled by `1 + margin`) sizes the frustum, and
    /// the camera backs off along the viewer's forward axis until the whole
    /// depth range is enclosed. The viewer's position only anchors the view
    /// axis; the fitted camera is re-centered on the bounds.
    pub fn fit(viewer: &ViewerPose, bounds: &Aabb, margin: f32) -> Result<Self, BakeError> {
        let inv_rot = viewer.rotation.inverse();
        let mut local = Aabb::new();
        for corner in bounds.corners() {
            local.union_point(inv_rot * corner);
        }
        let extents = local.extents();

        let silhouette = extents.x.max(extents.y);
        if !bounds.is_valid() || silhouette < MIN_FIT_EXTENT {
            return Err(BakeError::DegenerateBounds {
                extent: if bounds.is_valid() { silhouette } else { 0.0 },
            });
        }

        let half_extent = silhouette * 0.5 * (1.0 + margin);

        // Back off from the near face of the local bounds; pad by the margin
        // at world scale so near geometry never clips.
        let pad = (margin * extents.z).max(0.1);
        let center = local.center();
        let cam_local = Vec3::new(center.x, center.y, local.max.z + pad);
        let near = pad * 0.5;
        let far = (cam_local.z - local.min.z) + pad;

        let rig = Self {
            position: viewer.rotation * cam_local,
            rotation: viewer.rotation,
            projection: Projection::Orthographic { half_extent, near, far },
        };
        debug!(
            "fitted rig: half_extent={half_extent:.4} near={near:.4} far={far:.4} margin={margin}"
        );
        Ok(rig)
    }

    /// Free-view rig with an explicit ortho scale (no bounds fitting)
    ///
    /// `ortho_scale` is the full width of the square view volume, matching
    /// the host viewport's clip range via `near`/`far`.
    pub fn from_view(viewer: &ViewerPose, ortho_scale: f32, near: f32, far: f32) -> Self {
        Self {
            position: viewer.position,
            rotation: viewer.rotation,
            projection: Projection::Orthographic {
                half_extent: ortho_scale * 0.5,
                near,
                far,
            },
        }
    }

    /// World-space view direction
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// Camera-to-clip matrix (square aspect)
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Orthographic { half_extent, near, far } => Mat4::orthographic_rh(
                -half_extent,
                half_extent,
                -half_extent,
                half_extent,
                near,
                far,
            ),
            Projection::Perspective { fov_y, near, far } => {
                Mat4::perspective_rh(fov_y, 1.0, near, far)
            }
        }
    }

    /// Transform a world point into camera space
    pub fn to_camera(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.position)
    }

    /// Project a world point to normalized image coordinates
    ///
    /// Returns `(ndc_x, ndc_y, depth)` with x/y in [-1,1] across the image
    /// plane and depth the positive camera-space distance, or `None` when the
    /// point lies outside the frustum.
    pub fn project(&self, point: Vec3) -> Option<Vec3> {
        let cam = self.to_camera(point);
        let depth = -cam.z;
        let (x, y) = match self.projection {
            Projection::Orthographic { half_extent, near, far } => {
                if depth < near || depth > far {
                    return None;
                }
                (cam.x / half_extent, cam.y / half_extent)
            }
            Projection::Perspective { fov_y, near, far } => {
                if depth < near || depth > far {
                    return None;
                }
                let plane_half = depth * (fov_y * 0.5).tan();
                (cam.x / plane_half, cam.y / plane_half)
            }
        };
        if x.abs() > 1.0 || y.abs() > 1.0 {
            return None;
        }
        Some(Vec3::new(x, y, depth))
    }

    /// Unit direction from a surface point toward the camera
    ///
    /// Constant (the reversed view axis) for orthographic rigs, radial for
    /// perspective rigs. Used for the back-face test and occlusion rays.
    pub fn to_camera_dir(&self, point: Vec3) -> Vec3 {
        match self.projection {
            Projection::Orthographic { .. } => -self.forward(),
            Projection::Perspective { .. } => {
                (self.position - point).normalize_or(-self.forward())
            }
        }
    }

    /// Distance from a surface point back to the camera along
    /// [`CameraRig::to_camera_dir`]; the occlusion ray's reach
    pub fn occlusion_distance(&self, point: Vec3) -> f32 {
        match self.projection {
            // Up to the near plane; geometry in front of it cannot occlude
            Projection::Orthographic { near, .. } => -self.to_camera(point).z - near,
            Projection::Perspective { .. } => (self.position - point).length(),
        }
    }
}
