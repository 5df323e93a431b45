//! Volume / scroll / brightness: ratchet steps from vertical hand travel

use super::state::{ActiveMode, GestureState};
use super::Claim;
use crate::clock::elapsed_beyond;
use crate::command::Command;
use crate::config::GestureConfig;
use crate::hand::landmarks::{MIDDLE_MCP, PINKY_TIP};
use crate::hand::predicates::{is_pinky_up, is_thumbs_up, is_v_sign};
use crate::hand::FingerVector;
use crate::types::HandObservation;

struct ModeSpec {
    /// Landmark whose height is tracked
    reference: usize,
    increase: (Command, &'static str),
    decrease: (Command, &'static str),
    holding: &'static str,
    engaged: &'static str,
}

impl ActiveMode {
    fn spec(self) -> Option<ModeSpec> {
        match self {
            ActiveMode::None => None,
            ActiveMode::Volume => Some(ModeSpec {
                reference: MIDDLE_MCP,
                increase: (Command::VolumeUp, "Volume Up"),
                decrease: (Command::VolumeDown, "Volume Down"),
                holding: "VOLUME MODE",
                engaged: "Volume Mode ENGAGED",
            }),
            ActiveMode::Scroll => Some(ModeSpec {
                reference: MIDDLE_MCP,
                increase: (Command::ScrollUp, "Scroll Up"),
                decrease: (Command::ScrollDown, "Scroll Down"),
                holding: "SCROLL MODE",
                engaged: "Scroll Mode ENGAGED",
            }),
            ActiveMode::Brightness => Some(ModeSpec {
                reference: PINKY_TIP,
                increase: (Command::BrightnessUp, "Brightness ++"),
                decrease: (Command::BrightnessDown, "Brightness --"),
                holding: "BRIGHTNESS MODE",
                engaged: "Brightness Mode ENGAGED",
            }),
        }
    }

    /// Whether the pose that entered this mode is still being held
    fn pose_holds(self, fingers: &[bool]) -> bool {
        match self {
            ActiveMode::None => false,
            ActiveMode::Volume => is_v_sign(fingers),
            ActiveMode::Scroll => is_thumbs_up(fingers),
            ActiveMode::Brightness => is_pinky_up(fingers),
        }
    }
}

/// Drive the active mode for one frame. `None` when no mode is active.
pub(crate) fn step(
    state: &mut GestureState,
    hand: &HandObservation,
    fingers: FingerVector,
    now_ms: u64,
    cfg: &GestureConfig,
) -> Option<Claim> {
    let mode = state.mode;
    let spec = mode.spec()?;

    if !mode.pose_holds(fingers.as_slice()) {
        log::debug!("{mode:?} mode released");
        state.mode = ActiveMode::None;
        return Some(Claim::silent());
    }

    let current_y = hand.point(spec.reference).y;
    let delta = current_y - state.mode_anchor_y;
    let can_act = elapsed_beyond(now_ms, state.last_action_ms, cfg.action_cooldown_ms);

    let fired = if delta < -cfg.mode_step && can_act {
        Some(spec.increase)
    } else if delta > cfg.mode_step && can_act {
        Some(spec.decrease)
    } else {
        None
    };

    Some(match fired {
        Some((command, label)) => {
            state.mode_anchor_y = current_y;
            state.last_action_ms = now_ms;
            Claim::fire(command, label)
        }
        None => Claim::status(spec.holding),
    })
}

/// Enter a mode from its entry pose. V-sign wins over thumbs-up, which wins
/// over pinky-up.
pub(crate) fn engage(
    state: &mut GestureState,
    hand: &HandObservation,
    fingers: FingerVector,
    now_ms: u64,
) -> Option<Claim> {
    let f = fingers.as_slice();
    let mode = if is_v_sign(f) {
        ActiveMode::Volume
    } else if is_thumbs_up(f) {
        ActiveMode::Scroll
    } else if is_pinky_up(f) {
        ActiveMode::Brightness
    } else {
        return None;
    };
    let spec = mode.spec()?;

    state.mode = mode;
    state.mode_anchor_y = hand.point(spec.reference).y;
    state.last_action_ms = now_ms;
    log::debug!("{mode:?} mode engaged at y={:.3}", state.mode_anchor_y);
    Some(Claim::status(spec.engaged))
}
