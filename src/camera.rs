use glam::Vec2;
use nalgebra as na;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// GL-style focal ratio, `projection[(0, 0)]` for a square image.
    /// Pixel focal lengths are derived as `ratio * width / 2` and
    /// `ratio * height / 2`.
    pub focal_ratio: f64,
    pub near: f64,
    pub far: f64,
    /// OpenCV radial-tangential coefficients `[k1, k2, p1, p2, k3]`.
    pub dist_coeffs: [f64; 5],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            focal_ratio: 2.3203287123876013,
            near: 0.1,
            far: 2000.0,
            dist_coeffs: [0.0; 5],
        }
    }
}

/// Fixed camera calibration. Built once at startup from a
/// [`CameraConfig`] and immutable for the process lifetime.
pub struct CameraModel {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    pub camera_matrix: na::Matrix3<f64>,
    pub dist_coeffs: [f64; 5],
    pub projection: na::Matrix4<f64>,
}

impl CameraModel {
    pub fn from_config(config: &CameraConfig) -> CameraModel {
        let w = config.image_width as f64;
        let h = config.image_height as f64;
        let fx = config.focal_ratio * w / 2.0;
        let fy = config.focal_ratio * h / 2.0;
        let cx = w / 2.0;
        let cy = h / 2.0;
        let camera_matrix = na::Matrix3::new(fx, 0.0, cx, 0.0, fy, cy, 0.0, 0.0, 1.0);
        let (n, f) = (config.near, config.far);
        #[rustfmt::skip]
        let projection = na::Matrix4::new(
            2.0 * fx / w, 0.0,          0.0,                  0.0,
            0.0,          2.0 * fy / h, 0.0,                  0.0,
            0.0,          0.0,          -(f + n) / (f - n),   -2.0 * f * n / (f - n),
            0.0,          0.0,          -1.0,                 0.0,
        );
        CameraModel {
            fx,
            fy,
            cx,
            cy,
            camera_matrix,
            dist_coeffs: config.dist_coeffs,
            projection,
        }
    }

    /// Maps a pixel coordinate to undistorted normalized camera
    /// coordinates (z = 1 plane).
    ///
    /// The inverse distortion has no closed form; a few fixed-point
    /// iterations are enough for moderate coefficients.
    pub fn normalize(&self, p2d: Vec2) -> Vec2 {
        let xd = (p2d.x as f64 - self.cx) / self.fx;
        let yd = (p2d.y as f64 - self.cy) / self.fy;
        let [k1, k2, p1, p2, k3] = self.dist_coeffs;
        let (mut x, mut y) = (xd, yd);
        for _ in 0..8 {
            let r2 = x * x + y * y;
            let radial = 1.0 + k1 * r2 + k2 * r2 * r2 + k3 * r2 * r2 * r2;
            let dx = 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x);
            let dy = p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * x * y;
            x = (xd - dx) / radial;
            y = (yd - dy) / radial;
        }
        Vec2::new(x as f32, y as f32)
    }

    /// Forward model: normalized camera coordinates back to pixels.
    pub fn denormalize(&self, p2d: Vec2) -> Vec2 {
        let x = p2d.x as f64;
        let y = p2d.y as f64;
        let [k1, k2, p1, p2, k3] = self.dist_coeffs;
        let r2 = x * x + y * y;
        let radial = 1.0 + k1 * r2 + k2 * r2 * r2 + k3 * r2 * r2 * r2;
        let xd = x * radial + 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x);
        let yd = y * radial + p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * x * y;
        Vec2::new(
            (self.fx * xd + self.cx) as f32,
            (self.fy * yd + self.cy) as f32,
        )
    }
}
