use approx::assert_relative_eq;
use glam::Vec2;
use marker_distance::camera::{CameraConfig, CameraModel};

#[test]
fn default_config_reproduces_calibration_constants() {
    let camera = CameraModel::from_config(&CameraConfig::default());
    let p = camera.projection;

    assert_relative_eq!(p[(0, 0)], 2.3203287123876013, epsilon = 1e-12);
    assert_relative_eq!(p[(1, 1)], 2.3203287123876013, epsilon = 1e-12);
    assert_relative_eq!(p[(2, 2)], -1.0001000050003333, epsilon = 1e-9);
    assert_relative_eq!(p[(2, 3)], -0.20001000050003333, epsilon = 1e-9);
    assert_eq!(p[(3, 2)], -1.0);
    assert_eq!(p[(3, 3)], 0.0);
}

#[test]
fn intrinsics_derive_from_focal_ratio() {
    let config = CameraConfig::default();
    let camera = CameraModel::from_config(&config);

    // fx = ratio * w / 2, fy = ratio * h / 2, principal point centered.
    assert_relative_eq!(camera.fx, 2.3203287123876013 * 320.0, epsilon = 1e-9);
    assert_relative_eq!(camera.fy, 2.3203287123876013 * 240.0, epsilon = 1e-9);
    assert_eq!(camera.cx, 320.0);
    assert_eq!(camera.cy, 240.0);
    assert_eq!(camera.camera_matrix[(0, 0)], camera.fx);
    assert_eq!(camera.camera_matrix[(1, 2)], camera.cy);
    assert_eq!(camera.camera_matrix[(2, 2)], 1.0);
}

#[test]
fn normalize_without_distortion_is_pinhole_inverse() {
    let camera = CameraModel::from_config(&CameraConfig::default());

    let center = camera.normalize(Vec2::new(320.0, 240.0));
    assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);

    let p = camera.normalize(Vec2::new(320.0 + camera.fx as f32, 240.0));
    assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
    assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
}

#[test]
fn normalize_inverts_distortion() {
    let config = CameraConfig {
        dist_coeffs: [0.01, -0.002, 0.0005, -0.0003, 0.0001],
        ..Default::default()
    };
    let camera = CameraModel::from_config(&config);

    for p in [
        Vec2::new(0.2, -0.1),
        Vec2::new(-0.35, 0.3),
        Vec2::new(0.0, 0.0),
    ] {
        let pixel = camera.denormalize(p);
        let back = camera.normalize(pixel);
        assert_relative_eq!(back.x, p.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-4);
    }
}
