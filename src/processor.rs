use glam::{Vec2, Vec3};
use image::DynamicImage;

use crate::camera::CameraModel;
use crate::error::FrameError;
use crate::marker::MarkerDetector;
use crate::pose::{Correspondences, PoseSolver};

pub const MARKER_CORNERS: usize = 4;

/// A single distance estimate, produced fresh each frame and not
/// retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceReading {
    pub meters: f64,
}

/// Per-frame pipeline: detect the marker, build the point
/// correspondences, solve for pose, take the translation norm.
///
/// Stateless across invocations; one call per display tick.
pub struct FrameProcessor<D, S> {
    detector: D,
    solver: S,
    marker_size_meter: f32,
}

impl<D: MarkerDetector, S: PoseSolver> FrameProcessor<D, S> {
    pub fn new(detector: D, solver: S, marker_size_meter: f32) -> FrameProcessor<D, S> {
        FrameProcessor {
            detector,
            solver,
            marker_size_meter,
        }
    }

    /// Produces zero or one [`DistanceReading`] for the frame.
    ///
    /// `Ok(None)` means no marker was visible. A malformed match or a
    /// non-converging solve is an `Err`, and the caller is expected to
    /// skip the frame and keep looping.
    pub fn process_frame(
        &self,
        frame: &DynamicImage,
        camera: &CameraModel,
    ) -> Result<Option<DistanceReading>, FrameError> {
        let Some(marker) = self.detector.detect(frame) else {
            return Ok(None);
        };
        if marker.corner_count() != MARKER_CORNERS {
            return Err(FrameError::MalformedMatch {
                corners: marker.corner_count(),
            });
        }
        let corners = marker.corners();

        // First solve pairs the raw corners with the marker's nominal
        // square. Its result is not consumed; only the solve below
        // feeds the reading.
        let _ = self.solver.solve(&self.nominal_square(corners), camera);

        // Degenerate model set: every corner maps to the 3D origin.
        let correspondences = Correspondences {
            model_points: vec![Vec3::ZERO; MARKER_CORNERS],
            image_points: corners.to_vec(),
        };
        let pose = self.solver.solve(&correspondences, camera)?;

        let meters = pose.translation_norm();
        log::info!("Distance: {} meters", meters);
        Ok(Some(DistanceReading { meters }))
    }

    fn nominal_square(&self, corners: &[Vec2]) -> Correspondences {
        let s = self.marker_size_meter;
        Correspondences {
            model_points: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(s, 0.0, 0.0),
                Vec3::new(s, s, 0.0),
                Vec3::new(0.0, s, 0.0),
            ],
            image_points: corners.to_vec(),
        }
    }
}
