//! Core data types for the gesture pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of landmark points the detector reports per hand
pub const LANDMARK_COUNT: usize = 21;

/// A single hand landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    /// X coordinate (0.0-1.0, left to right)
    pub x: f32,
    /// Y coordinate (0.0-1.0, top to bottom)
    pub y: f32,
    /// Depth relative to the wrist
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar distance to another landmark (depth ignored)
    pub fn distance_2d(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Which hand the detector believes it saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand: 21 landmarks plus its handedness label
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    pub handedness: Handedness,
}

impl HandObservation {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT], handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    /// Landmark by MediaPipe index (see [`crate::hand::landmarks`])
    pub fn point(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }
}

/// Pixel dimensions of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// A captured camera frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: image::RgbImage,
    /// Capture time in milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl Frame {
    pub fn new(image: image::RgbImage, timestamp: u64) -> Self {
        Self { image, timestamp }
    }

    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.image.width(), self.image.height())
    }
}

/// Foreground application profile used to pick gesture bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppContext {
    #[default]
    General,
    PowerPoint,
    Zoom,
    Browser,
    Media,
}

impl AppContext {
    pub fn label(&self) -> &'static str {
        match self {
            AppContext::General => "GENERAL",
            AppContext::PowerPoint => "POWERPOINT",
            AppContext::Zoom => "ZOOM",
            AppContext::Browser => "BROWSER",
            AppContext::Media => "MEDIA",
        }
    }
}

impl fmt::Display for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gesture with no downstream consumer yet; surfaced so callers can hook it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialGesture {
    /// Both hands showing the scissors pose
    Scissors,
}

/// Processed frame handed back to the capture/render loop
#[derive(Debug, Clone)]
pub struct DisplayResult {
    pub frame: Frame,
    pub hands: Vec<HandObservation>,
    pub status: String,
}
