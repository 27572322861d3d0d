use glam::{Vec2, Vec3};
use nalgebra as na;
use sqpnp_simple::sqpnp_solve_glam;

use crate::camera::CameraModel;
use crate::error::FrameError;

/// Paired 3D model points and 2D image points fed to a pose solver.
/// Scoped to one frame; dropped on every exit path of the processor.
pub struct Correspondences {
    pub model_points: Vec<Vec3>,
    pub image_points: Vec<Vec2>,
}

pub struct PoseEstimate {
    pub rvec: na::Vector3<f64>,
    pub tvec: na::Vector3<f64>,
}

impl PoseEstimate {
    pub fn new(rvec: na::Vector3<f64>, tvec: na::Vector3<f64>) -> PoseEstimate {
        PoseEstimate { rvec, tvec }
    }

    /// Euclidean norm of the translation, in meters for metric model
    /// points.
    pub fn translation_norm(&self) -> f64 {
        self.tvec.norm()
    }
}

pub trait PoseSolver {
    fn solve(
        &self,
        correspondences: &Correspondences,
        camera: &CameraModel,
    ) -> Result<PoseEstimate, FrameError>;
}

/// SQPnP-backed solver. Image points are undistorted to normalized
/// camera coordinates before solving.
pub struct SqPnpSolver;

impl PoseSolver for SqPnpSolver {
    fn solve(
        &self,
        correspondences: &Correspondences,
        camera: &CameraModel,
    ) -> Result<PoseEstimate, FrameError> {
        let p2ds_z: Vec<Vec2> = correspondences
            .image_points
            .iter()
            .map(|p| camera.normalize(*p))
            .collect();
        let solution = sqpnp_solve_glam(&correspondences.model_points, &p2ds_z)
            .into_iter()
            .next();
        let Some(((rx, ry, rz), (tx, ty, tz))) = solution else {
            return Err(FrameError::PoseSolveFailure);
        };
        let rvec = na::Vector3::new(rx, ry, rz);
        let tvec = na::Vector3::new(tx, ty, tz);
        if !rvec.iter().chain(tvec.iter()).all(|v| v.is_finite()) {
            return Err(FrameError::PoseSolveFailure);
        }
        Ok(PoseEstimate::new(rvec, tvec))
    }
}
