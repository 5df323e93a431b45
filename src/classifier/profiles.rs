//! Per-application gesture bindings.
//!
//! Each context lists its own bindings first; the universal left/right click
//! bindings are tried after them.

use crate::command::{BrowserAction, Command, MediaAction, PresentationAction, ZoomAction};
use crate::hand::predicates::{
    is_fist, is_three_fingers, is_thumbs_down, is_v_sign, RIGHT_CLICK,
};
use crate::hand::{pinch_distance, FingerVector};
use crate::types::{AppContext, HandObservation};

/// Pose that triggers a discrete binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Pinch,
    RightClickPose,
    ThreeFingers,
    Fist,
    VSign,
    ThumbsDown,
}

impl Trigger {
    pub fn matches(self, hand: &HandObservation, fingers: FingerVector, pinch_threshold: f32) -> bool {
        let f = fingers.as_slice();
        match self {
            Trigger::Pinch => pinch_distance(hand) < pinch_threshold,
            Trigger::RightClickPose => fingers == RIGHT_CLICK,
            Trigger::ThreeFingers => is_three_fingers(f),
            Trigger::Fist => is_fist(f),
            Trigger::VSign => is_v_sign(f),
            Trigger::ThumbsDown => is_thumbs_down(hand, f),
        }
    }
}

/// One row of a profile table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub trigger: Trigger,
    pub command: Command,
    pub label: &'static str,
}

const fn bind(trigger: Trigger, command: Command, label: &'static str) -> Binding {
    Binding {
        trigger,
        command,
        label,
    }
}

const POWERPOINT: [Binding; 2] = [
    bind(Trigger::ThreeFingers, Command::Presentation(PresentationAction::NextSlide), "Next Slide"),
    bind(Trigger::Fist, Command::Presentation(PresentationAction::PrevSlide), "Previous Slide"),
];

const ZOOM: [Binding; 2] = [
    bind(Trigger::VSign, Command::Zoom(ZoomAction::Mute), "Mute/Unmute"),
    bind(Trigger::ThreeFingers, Command::Zoom(ZoomAction::Video), "Start/Stop Video"),
];

const BROWSER: [Binding; 2] = [
    bind(Trigger::ThumbsDown, Command::Browser(BrowserAction::PrevTab), "Previous Tab"),
    bind(Trigger::ThreeFingers, Command::Browser(BrowserAction::NextTab), "Next Tab"),
];

const MEDIA: [Binding; 2] = [
    bind(Trigger::ThreeFingers, Command::Media(MediaAction::NextTrack), "Next Track"),
    bind(Trigger::Fist, Command::Media(MediaAction::PrevTrack), "Prev Track"),
];

const UNIVERSAL: [Binding; 2] = [
    bind(Trigger::Pinch, Command::Click, "Left Click"),
    bind(Trigger::RightClickPose, Command::RightClick, "Right Click"),
];

/// Context-specific bindings, highest priority first
pub fn bindings(context: AppContext) -> &'static [Binding] {
    match context {
        AppContext::General => &[],
        AppContext::PowerPoint => &POWERPOINT,
        AppContext::Zoom => &ZOOM,
        AppContext::Browser => &BROWSER,
        AppContext::Media => &MEDIA,
    }
}

/// First binding whose trigger matches, context bindings before clicks
pub fn resolve(
    context: AppContext,
    hand: &HandObservation,
    fingers: FingerVector,
    pinch_threshold: f32,
) -> Option<&'static Binding> {
    bindings(context)
        .iter()
        .chain(UNIVERSAL.iter())
        .find(|b| b.trigger.matches(hand, fingers, pinch_threshold))
}
