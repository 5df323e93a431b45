//! Pointing-finger cursor control

use super::Claim;
use crate::command::Command;
use crate::config::GestureConfig;
use crate::hand::landmarks::INDEX_TIP;
use crate::types::{FrameSize, HandObservation};

/// Offset in pixels from the frame center to the index fingertip.
///
/// The fingertip is snapped to a whole pixel before the offset is taken.
pub fn pointer_offset(hand: &HandObservation, size: FrameSize) -> (f32, f32) {
    let tip = hand.point(INDEX_TIP);
    let (cx, cy) = size.center();
    let px = (tip.x * size.width as f32) as i32;
    let py = (tip.y * size.height as f32) as i32;
    (px as f32 - cx, py as f32 - cy)
}

/// Always claims the frame; a move is only emitted outside the dead zone.
pub(crate) fn steer(hand: &HandObservation, size: FrameSize, cfg: &GestureConfig) -> Claim {
    let (dx, dy) = pointer_offset(hand, size);
    if dx.hypot(dy) > cfg.dead_zone_radius {
        let command = Command::Move {
            dx: dx * cfg.cursor_sensitivity,
            dy: dy * cfg.cursor_sensitivity,
        };
        Claim::fire(command, "Cursor Mode")
    } else {
        Claim::status("Cursor Mode")
    }
}
