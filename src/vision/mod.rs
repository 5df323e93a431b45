//! Vision pathway: frame sources and hand-landmark detectors
//!
//! The detector itself is an external model; this module only defines the
//! seams the pipeline drives and a few ways to feed landmarks in (replay
//! files, a UDP feed from an out-of-process tracker).

#[cfg(feature = "vision")]
mod camera;
mod replay;
mod synthetic;
mod udp_landmarks;

#[cfg(feature = "vision")]
pub use camera::CameraFrameSource;
pub use replay::{parse_hands_message, ReplayDetector};
pub use synthetic::SyntheticFrameSource;
pub use udp_landmarks::{
    landmark_udp_addr_from_env, spawn_udp_landmark_task, HandsSnapshot, UdpLandmarkDetector,
};

use crate::error::{CaptureError, LandmarkError};
use crate::types::{Frame, HandObservation};

/// Produces frames at the capture rate
pub trait FrameSource {
    /// Next frame; `Ok(None)` once the source is exhausted
    fn read(&mut self) -> Result<Option<Frame>, CaptureError>;

    /// Try to reopen the device after a failed read
    fn reconnect(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn read(&mut self) -> Result<Option<Frame>, CaptureError> {
        (**self).read()
    }

    fn reconnect(&mut self) -> Result<(), CaptureError> {
        (**self).reconnect()
    }
}

/// Image to hands. Zero hands is a normal answer, not an error.
pub trait LandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandObservation>, LandmarkError>;
}

impl<T: LandmarkDetector + ?Sized> LandmarkDetector for Box<T> {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandObservation>, LandmarkError> {
        (**self).detect(frame)
    }
}
