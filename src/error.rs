use thiserror::Error;

/// Failures that prevent the frame loop from ever starting.
///
/// Reported once at startup; the loop is never entered.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not access video stream: {0}")]
    VideoStream(String),
    #[error("could not read config file {path}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },
    #[error("could not parse config file {path}")]
    ConfigParse {
        path: String,
        source: serde_json::Error,
    },
}

/// Per-frame failures. Always recoverable: the loop skips the frame's
/// reading and continues, the next tick is the retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("marker match has {corners} corners, expected 4")]
    MalformedMatch { corners: usize },
    #[error("pose solver did not converge")]
    PoseSolveFailure,
}
