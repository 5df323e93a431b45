//! Error types shared across the pipeline

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Malformed or invalid command
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0:?}")]
    Unknown(String),
    #[error("malformed move payload {0:?}, expected <dx>,<dy>")]
    MalformedMove(String),
    #[error("move delta is not finite: ({dx}, {dy})")]
    NonFiniteDelta { dx: f32, dy: f32 },
}

/// An OS actuation backend failed to carry out a command
#[derive(Debug, thiserror::Error)]
pub enum ActuationError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed {
        program: &'static str,
        status: ExitStatus,
    },
}

/// Camera or frame source failure
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("could not open camera {index}")]
    Open { index: i32 },
    #[error("frame read failed: {0}")]
    Read(String),
}

/// Foreground window lookup failure
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("failed to launch window query: {0}")]
    Launch(#[source] io::Error),
    #[error("window query exited with {0}")]
    Failed(ExitStatus),
}

/// Landmark message could not be turned into hand observations
#[derive(Debug, thiserror::Error)]
pub enum LandmarkError {
    #[error("invalid landmark JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("hand has {found} landmarks, expected {expected}")]
    PointCount { expected: usize, found: usize },
    #[error("failed to read landmark replay: {0}")]
    Io(#[from] io::Error),
}

/// Configuration file problems
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
