use aprilgrid::TagFamily;
use clap::Parser;
use marker_distance::camera::{CameraConfig, CameraModel};
use marker_distance::io::object_from_json;
use marker_distance::marker::{ApriltagDetector, MarkerConfig};
use marker_distance::pose::SqPnpSolver;
use marker_distance::processor::FrameProcessor;
use marker_distance::video::{ImageSequenceSource, VideoSource};
use std::time::Instant;

#[derive(Parser)]
#[command(version, about, author)]
struct MdrsCli {
    /// path to image folder
    path: String,

    /// tag_family: ["t16h5", "t25h7", "t25h9", "t36h11", "t36h11b1"]
    #[arg(value_enum, default_value = "t36h11")]
    tag_family: TagFamily,

    /// id of the marker tag to track
    #[arg(long, default_value_t = 0)]
    tag_id: u32,

    /// nominal marker side length in meters
    #[arg(long, default_value_t = 1.0)]
    marker_size_meter: f32,

    /// camera config json, defaults to the built-in calibration
    #[arg(long)]
    camera_json: Option<String>,

    /// marker config json; overrides --tag-id and --marker-size-meter
    #[arg(long)]
    marker_json: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = MdrsCli::parse();

    let camera_config = match &cli.camera_json {
        Some(path) => match object_from_json::<CameraConfig>(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => CameraConfig::default(),
    };
    let camera = CameraModel::from_config(&camera_config);

    let mut source = match ImageSequenceSource::open(&cli.path) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let marker_config = match &cli.marker_json {
        Some(path) => match object_from_json::<MarkerConfig>(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => MarkerConfig {
            tag_id: cli.tag_id,
            marker_size_meter: cli.marker_size_meter,
        },
    };
    let detector = ApriltagDetector::new(&cli.tag_family, marker_config.tag_id);
    let processor = FrameProcessor::new(detector, SqPnpSolver, marker_config.marker_size_meter);

    let total = source.frame_count();
    let now = Instant::now();
    let mut frame_idx = 0usize;
    let mut reading_count = 0usize;
    while let Some(frame) = source.current_frame() {
        frame_idx += 1;
        match processor.process_frame(&frame, &camera) {
            Ok(Some(_reading)) => reading_count += 1,
            Ok(None) => {}
            Err(e) => log::warn!("frame {}: {}", frame_idx, e),
        }
    }
    let duration_sec = now.elapsed().as_secs_f64();
    println!(
        "processed {} of {} frames in {:.6} sec, {} distance readings",
        frame_idx, total, duration_sec, reading_count
    );
}
