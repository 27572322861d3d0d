use aprilgrid::TagFamily;
use aprilgrid::detector::TagDetector;
use glam::Vec2;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Tag id of the single marker being tracked.
    pub tag_id: u32,
    /// Nominal side length of the printed marker in meters.
    pub marker_size_meter: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            tag_id: 0,
            marker_size_meter: 1.0,
        }
    }
}

/// Corners of a marker found in one frame, in detection order (not
/// necessarily geometric order). Valid for the current frame only.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerMatch {
    corners: Vec<Vec2>,
}

impl MarkerMatch {
    pub fn new(corners: Vec<Vec2>) -> MarkerMatch {
        MarkerMatch { corners }
    }

    pub fn corners(&self) -> &[Vec2] {
        &self.corners
    }

    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }
}

pub trait MarkerDetector {
    /// Looks for the configured marker in the frame. `None` means no
    /// marker this frame, which is an expected outcome.
    fn detect(&self, img: &DynamicImage) -> Option<MarkerMatch>;
}

/// Detector backed by `aprilgrid`, tracking a single tag id.
pub struct ApriltagDetector {
    detector: TagDetector,
    tag_id: u32,
}

impl ApriltagDetector {
    pub fn new(tag_family: &TagFamily, tag_id: u32) -> ApriltagDetector {
        ApriltagDetector {
            detector: TagDetector::new(tag_family, None),
            tag_id,
        }
    }
}

impl MarkerDetector for ApriltagDetector {
    fn detect(&self, img: &DynamicImage) -> Option<MarkerMatch> {
        let detected_tags = self.detector.detect(img);
        for (id, corners) in detected_tags.iter() {
            if *id == self.tag_id {
                let corners = corners.iter().map(|p| Vec2::new(p.0, p.1)).collect();
                return Some(MarkerMatch::new(corners));
            }
        }
        None
    }
}
