use super::landmarks::*;
use crate::types::{HandObservation, Handedness};
use std::fmt;

const FINGER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];
const FINGER_PIPS: [usize; 4] = [INDEX_PIP, MIDDLE_PIP, RING_PIP, PINKY_PIP];

/// Raised/lowered state of thumb, index, middle, ring and pinky, in that order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerVector([bool; 5]);

impl FingerVector {
    pub const fn new(fingers: [bool; 5]) -> Self {
        Self(fingers)
    }

    /// Read finger states off a single frame's landmarks.
    ///
    /// The thumb is judged horizontally (tip beyond its base joint, mirrored
    /// per hand); the other fingers are up when the tip sits above the middle
    /// joint in image coordinates.
    pub fn from_hand(hand: &HandObservation) -> Self {
        let tip_x = hand.point(THUMB_TIP).x;
        let base_x = hand.point(THUMB_MCP).x;
        let thumb = match hand.handedness {
            Handedness::Right => tip_x > base_x,
            Handedness::Left => tip_x < base_x,
        };

        let mut fingers = [thumb, false, false, false, false];
        for (slot, (&tip, &pip)) in fingers[1..]
            .iter_mut()
            .zip(FINGER_TIPS.iter().zip(FINGER_PIPS.iter()))
        {
            *slot = hand.point(tip).y < hand.point(pip).y;
        }

        Self(fingers)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }

    pub fn raised(&self) -> usize {
        self.0.iter().filter(|&&up| up).count()
    }
}

impl From<[bool; 5]> for FingerVector {
    fn from(fingers: [bool; 5]) -> Self {
        Self(fingers)
    }
}

impl PartialEq<[bool; 5]> for FingerVector {
    fn eq(&self, other: &[bool; 5]) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for FingerVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for up in self.0 {
            f.write_str(if up { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::synth::posed_hand;

    #[test]
    fn reads_back_posed_fingers() {
        let patterns = [
            [false, true, false, false, false],
            [true, true, false, false, true],
            [false, true, true, true, false],
            [true, false, false, false, false],
            [false; 5],
            [true; 5],
        ];
        for handedness in [Handedness::Left, Handedness::Right] {
            for pattern in patterns {
                let hand = posed_hand(handedness, pattern, (0.5, 0.5));
                assert_eq!(FingerVector::from_hand(&hand), pattern, "{handedness:?} {pattern:?}");
            }
        }
    }

    #[test]
    fn thumb_direction_is_mirrored_per_hand() {
        // Tip to the right of the base joint.
        let right = posed_hand(Handedness::Right, [false; 5], (0.5, 0.5))
            .with_point(THUMB_MCP, 0.40, 0.55)
            .with_point(THUMB_TIP, 0.45, 0.55);
        let mut left = right.clone();
        left.handedness = Handedness::Left;

        assert!(FingerVector::from_hand(&right).as_slice()[0]);
        assert!(!FingerVector::from_hand(&left).as_slice()[0]);
    }

    #[test]
    fn display_as_bits() {
        assert_eq!(FingerVector::new([false, true, true, true, false]).to_string(), "01110");
    }
}
