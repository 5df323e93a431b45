//! Static pose predicates over finger states.
//!
//! All predicates take a plain slice so they stay total: a short or empty
//! slice simply never matches.

use super::landmarks::{INDEX_TIP, THUMB_IP, THUMB_TIP};
use crate::types::HandObservation;

/// Index finger only
pub const POINTING: [bool; 5] = [false, true, false, false, false];
/// Thumb, index and pinky raised
pub const RIGHT_CLICK: [bool; 5] = [true, true, false, false, true];
pub const THREE_FINGERS: [bool; 5] = [false, true, true, true, false];
pub const PINKY_UP: [bool; 5] = [false, false, false, false, true];

/// OK sign tolerates a looser touch than a click pinch
const OK_PINCH_FACTOR: f32 = 1.5;

pub fn is_scissors_gesture(fingers: &[bool]) -> bool {
    matches!(fingers, [_, true, true, false, false, ..])
}

/// Same shape as scissors; the caller decides which meaning applies.
pub fn is_v_sign(fingers: &[bool]) -> bool {
    is_scissors_gesture(fingers)
}

pub fn is_flat_palm_gesture(fingers: &[bool]) -> bool {
    fingers.iter().filter(|&&up| up).count() >= 4
}

pub fn is_fist(fingers: &[bool]) -> bool {
    fingers.len() >= 5 && fingers.iter().all(|&up| !up)
}

pub fn is_thumbs_up(fingers: &[bool]) -> bool {
    matches!(fingers, [true, false, false, ..])
}

/// Four fingers curled and the thumb tip hanging below its middle joint
pub fn is_thumbs_down(hand: &HandObservation, fingers: &[bool]) -> bool {
    matches!(fingers, [_, false, false, false, false, ..])
        && hand.point(THUMB_TIP).y > hand.point(THUMB_IP).y
}

pub fn is_three_fingers(fingers: &[bool]) -> bool {
    fingers == THREE_FINGERS
}

pub fn is_pinky_up(fingers: &[bool]) -> bool {
    fingers == PINKY_UP
}

pub fn is_ok_gesture(hand: &HandObservation, fingers: &[bool], pinch_threshold: f32) -> bool {
    let touching = hand.point(THUMB_TIP).distance_2d(hand.point(INDEX_TIP))
        < pinch_threshold * OK_PINCH_FACTOR;
    touching && matches!(fingers, [_, _, true, true, true, ..])
}
