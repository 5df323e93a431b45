//! Per-hand geometry: landmark indices, finger states and pose predicates

mod fingers;
pub mod predicates;
pub mod synth;

pub use fingers::FingerVector;

use crate::types::HandObservation;

/// Hand landmark indices (MediaPipe hand model convention)
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;

    /// Knuckles of the four non-thumb fingers
    pub const KNUCKLES: [usize; 4] = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];
}

/// Distance between the thumb tip and the index tip
pub fn pinch_distance(hand: &HandObservation) -> f32 {
    hand.point(landmarks::THUMB_TIP)
        .distance_2d(hand.point(landmarks::INDEX_TIP))
}

/// Mean position of the four non-thumb knuckles, used as the swipe anchor
pub fn knuckle_center(hand: &HandObservation) -> (f32, f32) {
    let (sum_x, sum_y) = landmarks::KNUCKLES
        .iter()
        .map(|&i| hand.point(i))
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = landmarks::KNUCKLES.len() as f32;
    (sum_x / n, sum_y / n)
}
