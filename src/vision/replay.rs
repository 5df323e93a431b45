use super::LandmarkDetector;
use crate::error::LandmarkError;
use crate::types::{Frame, HandObservation, Handedness, Landmark, LANDMARK_COUNT};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
struct JsonHand {
    handedness: Handedness,
    landmarks: Vec<[f32; 3]>,
}

impl TryFrom<JsonHand> for HandObservation {
    type Error = LandmarkError;

    fn try_from(hand: JsonHand) -> Result<Self, Self::Error> {
        if hand.landmarks.len() != LANDMARK_COUNT {
            return Err(LandmarkError::PointCount {
                expected: LANDMARK_COUNT,
                found: hand.landmarks.len(),
            });
        }
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (slot, [x, y, z]) in points.iter_mut().zip(hand.landmarks) {
            *slot = Landmark::new(x, y, z);
        }
        Ok(HandObservation::new(points, hand.handedness))
    }
}

/// Parse one frame's worth of hands.
///
/// Format: `[{"handedness":"Right","landmarks":[[x,y,z], ...21 points]}, ...]`.
/// A blank message means no hands.
pub fn parse_hands_message(msg: &str) -> Result<Vec<HandObservation>, LandmarkError> {
    let msg = msg.trim();
    if msg.is_empty() {
        return Ok(Vec::new());
    }

    let hands: Vec<JsonHand> = serde_json::from_str(msg)?;
    hands.into_iter().map(HandObservation::try_from).collect()
}

/// Plays back recorded landmarks, one line per frame
#[derive(Debug, Clone)]
pub struct ReplayDetector {
    frames: Vec<Vec<HandObservation>>,
    cursor: usize,
    looping: bool,
}

impl ReplayDetector {
    pub fn new(frames: Vec<Vec<HandObservation>>, looping: bool) -> Self {
        Self {
            frames,
            cursor: 0,
            looping,
        }
    }

    pub fn from_reader<R: BufRead>(reader: R, looping: bool) -> Result<Self, LandmarkError> {
        let mut frames = Vec::new();
        for line in reader.lines() {
            frames.push(parse_hands_message(&line?)?);
        }
        log::info!("Loaded {} replay frames", frames.len());
        Ok(Self::new(frames, looping))
    }

    pub fn from_path(path: impl AsRef<Path>, looping: bool) -> Result<Self, LandmarkError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), looping)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// No recorded frames left (never true when looping over a non-empty file)
    pub fn is_exhausted(&self) -> bool {
        if self.looping && !self.frames.is_empty() {
            return false;
        }
        self.cursor >= self.frames.len()
    }
}

impl LandmarkDetector for ReplayDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<HandObservation>, LandmarkError> {
        if self.looping && self.cursor >= self.frames.len() {
            self.cursor = 0;
        }
        let hands = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor = self.cursor.saturating_add(1);
        Ok(hands)
    }
}
