use std::path::PathBuf;

use glob::glob;
use image::{DynamicImage, ImageReader};

use crate::error::StartupError;

pub trait VideoSource {
    /// Returns the next frame, or `None` once the stream has ended.
    fn current_frame(&mut self) -> Option<DynamicImage>;
}

/// Serves decoded frames from a folder of images, in path order.
///
/// Opened once at startup; an empty folder is startup-fatal. A frame
/// that fails to decode is logged and skipped.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageSequenceSource {
    pub fn open(root_folder: &str) -> Result<ImageSequenceSource, StartupError> {
        let entries = glob(format!("{}/*", root_folder).as_str())
            .map_err(|e| StartupError::VideoStream(e.to_string()))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|p| {
                matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some("png") | Some("jpg")
                )
            })
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(StartupError::VideoStream(format!(
                "no frames found in {}",
                root_folder
            )));
        }
        Ok(ImageSequenceSource { paths, next: 0 })
    }

    pub fn frame_count(&self) -> usize {
        self.paths.len()
    }
}

impl VideoSource for ImageSequenceSource {
    fn current_frame(&mut self) -> Option<DynamicImage> {
        while self.next < self.paths.len() {
            let path = &self.paths[self.next];
            self.next += 1;
            let decoded = ImageReader::open(path)
                .map_err(|e| e.to_string())
                .and_then(|r| r.decode().map_err(|e| e.to_string()));
            match decoded {
                Ok(img) => return Some(img),
                Err(e) => log::warn!("skipping unreadable frame {}: {}", path.display(), e),
            }
        }
        None
    }
}
