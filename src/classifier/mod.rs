//! # Gesture Classifier
//!
//! Turns per-frame hand observations into at most one [`Command`] and a
//! status line. The classifier owns a single [`GestureState`] and reads time
//! only through its [`Clock`], so a [`crate::clock::ManualClock`] makes every
//! cooldown and grace period deterministic.
//!
//! Per-frame priority, highest first:
//!
//! 1. Two hands: activation / deactivation gating, never an action
//! 2. One hand while active:
//!    PowerPoint palm override, swipe detector, cursor, continuous mode,
//!    context bindings and clicks, mode entry
//! 3. Anything else: idle, swipe disarmed

mod context;
mod cursor;
mod modes;
mod profiles;
mod state;
mod swipe;

pub use context::{
    infer_context, resolve_context, FixedWindowTitle, WindowTitleSource, XdotoolWindowTitle,
};
pub use cursor::pointer_offset;
pub use profiles::{bindings, Binding, Trigger};
pub use state::{ActiveMode, GestureState};
pub use swipe::{SwipePhase, SwipeTracker};

use crate::clock::{elapsed_beyond, Clock};
use crate::command::{Command, PresentationAction};
use crate::config::GestureConfig;
use crate::hand::predicates::{is_flat_palm_gesture, is_ok_gesture, is_scissors_gesture, POINTING};
use crate::hand::{knuckle_center, FingerVector};
use crate::types::{AppContext, FrameSize, HandObservation, SpecialGesture};
use std::sync::Arc;

/// What one behaviour decided for the current frame
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Claim {
    pub command: Option<Command>,
    /// Overrides the baseline status line when set
    pub text: Option<&'static str>,
}

impl Claim {
    pub fn status(text: &'static str) -> Self {
        Self {
            command: None,
            text: Some(text),
        }
    }

    pub fn fire(command: Command, text: &'static str) -> Self {
        Self {
            command: Some(command),
            text: Some(text),
        }
    }

    /// Frame consumed, nothing to say
    pub fn silent() -> Self {
        Self {
            command: None,
            text: None,
        }
    }
}

/// Result of classifying one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub command: Option<Command>,
    pub status: String,
    /// Set when both hands show scissors; nothing consumes it yet
    pub special: Option<SpecialGesture>,
}

/// Stateful per-frame gesture classifier
pub struct GestureClassifier {
    config: GestureConfig,
    clock: Arc<dyn Clock>,
    titles: Box<dyn WindowTitleSource + Send>,
    state: GestureState,
}

impl GestureClassifier {
    pub fn new(
        config: GestureConfig,
        clock: Arc<dyn Clock>,
        titles: Box<dyn WindowTitleSource + Send>,
    ) -> Self {
        Self {
            config,
            clock,
            titles,
            state: GestureState::new(),
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify one frame's hands. `size` converts normalized coordinates to
    /// pixels for cursor control.
    pub fn classify(&mut self, size: FrameSize, hands: &[HandObservation]) -> Classification {
        let now = self.clock.now_ms();

        let (claim, special) = match hands {
            [first, second] => self.two_hands(first, second, now),
            [hand] if self.state.active => (self.single_hand(size, hand, now), None),
            _ => {
                if self.state.swipe.disarm() {
                    log::debug!("Swipe disarmed (hand lost)");
                }
                (Claim::silent(), None)
            }
        };

        let status = match claim.text {
            Some(text) => text.to_string(),
            None => self.state.status_line(),
        };

        Classification {
            command: claim.command,
            status,
            special,
        }
    }

    fn two_hands(
        &mut self,
        first: &HandObservation,
        second: &HandObservation,
        now: u64,
    ) -> (Claim, Option<SpecialGesture>) {
        let f1 = FingerVector::from_hand(first);
        let f2 = FingerVector::from_hand(second);
        let can_change = elapsed_beyond(now, self.state.last_mode_change_ms, self.config.mode_cooldown_ms);

        let both_palms = is_flat_palm_gesture(f1.as_slice()) && is_flat_palm_gesture(f2.as_slice());
        let pinch = self.config.pinch_threshold;
        let both_ok = is_ok_gesture(first, f1.as_slice(), pinch)
            && is_ok_gesture(second, f2.as_slice(), pinch);

        if both_palms && can_change {
            if !self.state.active {
                log::info!("Gestures activated");
            }
            self.set_active(true, now);
            (Claim::status("Gestures ACTIVATED"), None)
        } else if both_ok && self.state.active && can_change {
            log::info!("Gestures deactivated");
            self.set_active(false, now);
            (Claim::status("Gestures DEACTIVATED"), None)
        } else if is_scissors_gesture(f1.as_slice()) && is_scissors_gesture(f2.as_slice()) {
            (Claim::silent(), Some(SpecialGesture::Scissors))
        } else {
            (Claim::silent(), None)
        }
    }

    fn set_active(&mut self, active: bool, now: u64) {
        self.state.active = active;
        self.state.last_mode_change_ms = now;
        // Hold off so the same two-hand pose is not read again right away.
        self.clock.sleep(self.config.activation_pause());
    }

    fn single_hand(&mut self, size: FrameSize, hand: &HandObservation, now: u64) -> Claim {
        let cfg = &self.config;
        let fingers = FingerVector::from_hand(hand);
        let palm = is_flat_palm_gesture(fingers.as_slice());

        if elapsed_beyond(now, self.state.last_context_check_ms, cfg.context_check_cooldown_ms) {
            self.state.last_context_check_ms = now;
            let context = resolve_context(&mut self.titles);
            if context != self.state.app_context {
                log::debug!("Application context {} -> {}", self.state.app_context, context);
            }
            self.state.app_context = context;
        }

        if self.state.app_context == AppContext::PowerPoint && palm {
            return Claim::fire(
                Command::Presentation(PresentationAction::StartShow),
                "Start Slideshow",
            );
        }

        if let Some(claim) = self.state.swipe.observe(palm, knuckle_center(hand), now, cfg) {
            if claim.command.is_some() {
                self.state.last_click_ms = now;
            }
            return claim;
        }

        if fingers == POINTING {
            return cursor::steer(hand, size, cfg);
        }

        if let Some(claim) = modes::step(&mut self.state, hand, fingers, now, cfg) {
            return claim;
        }

        if !elapsed_beyond(now, self.state.last_click_ms, cfg.click_cooldown_ms) {
            return Claim::silent();
        }

        let bound = profiles::resolve(self.state.app_context, hand, fingers, cfg.pinch_threshold)
            .map(|b| Claim::fire(b.command, b.label));
        match bound.or_else(|| modes::engage(&mut self.state, hand, fingers, now)) {
            Some(claim) => {
                self.state.last_click_ms = now;
                claim
            }
            None => Claim::silent(),
        }
    }
}
