//! Synthetic hand poses for replays, benchmarks and tests
//!
//! Fixture code: the live pipeline never calls it. It is public so the
//! integration tests and criterion benches can build poses without a
//! detector.

use super::landmarks::*;
use crate::types::{HandObservation, Handedness, Landmark, LANDMARK_COUNT};

// Horizontal knuckle spread around the center, index to pinky.
const KNUCKLE_OFFSETS: [f32; 4] = [-0.03, -0.01, 0.01, 0.03];

/// Build a hand whose landmarks read back as `fingers`, with the knuckle
/// center at `center`.
pub fn posed_hand(handedness: Handedness, fingers: [bool; 5], center: (f32, f32)) -> HandObservation {
    let (cx, cy) = center;
    // +1 places the thumb on the hand's outer side for the right hand.
    let side = match handedness {
        Handedness::Right => 1.0,
        Handedness::Left => -1.0,
    };

    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[WRIST] = Landmark::new(cx, cy + 0.15, 0.0);

    let thumb_base_x = cx - side * 0.15;
    let thumb_tip_x = if fingers[0] {
        cx - side * 0.10
    } else {
        cx - side * 0.18
    };
    points[THUMB_CMC] = Landmark::new(cx - side * 0.08, cy + 0.10, 0.0);
    points[THUMB_MCP] = Landmark::new(thumb_base_x, cy + 0.06, 0.0);
    points[THUMB_IP] = Landmark::new((thumb_base_x + thumb_tip_x) / 2.0, cy + 0.05, 0.0);
    points[THUMB_TIP] = Landmark::new(thumb_tip_x, cy + 0.04, 0.0);

    let chains = [
        [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
        [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
        [RING_MCP, RING_PIP, RING_DIP, RING_TIP],
        [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
    ];
    for ((chain, offset), &up) in chains.iter().zip(KNUCKLE_OFFSETS).zip(&fingers[1..]) {
        let x = cx + offset;
        let (dip_y, tip_y) = if up {
            (cy - 0.07, cy - 0.10)
        } else {
            (cy - 0.02, cy - 0.01)
        };
        points[chain[0]] = Landmark::new(x, cy, 0.0);
        points[chain[1]] = Landmark::new(x, cy - 0.04, 0.0);
        points[chain[2]] = Landmark::new(x, dip_y, 0.0);
        points[chain[3]] = Landmark::new(x, tip_y, 0.0);
    }

    HandObservation::new(points, handedness)
}

impl HandObservation {
    /// Replace one landmark's planar position
    pub fn with_point(mut self, index: usize, x: f32, y: f32) -> Self {
        self.landmarks[index].x = x;
        self.landmarks[index].y = y;
        self
    }
}
