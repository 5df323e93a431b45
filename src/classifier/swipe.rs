//! Palm swipe detector: Disarmed -> Armed -> (GracePeriod) -> Armed/Disarmed

use super::Claim;
use crate::clock::elapsed_beyond;
use crate::command::{Command, SwipeAction};
use crate::config::GestureConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipePhase {
    #[default]
    Disarmed,
    Armed,
    /// Palm lost at `lost_at_ms`; the anchor survives until the grace runs out
    GracePeriod { lost_at_ms: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    phase: SwipePhase,
    anchor: (f32, f32),
    last_swipe_ms: u64,
}

impl SwipeTracker {
    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    pub fn anchor(&self) -> (f32, f32) {
        self.anchor
    }

    /// Armed or riding out a grace period
    pub fn is_ready(&self) -> bool {
        self.phase != SwipePhase::Disarmed
    }

    /// Drop any arming immediately; returns whether anything was armed
    pub fn disarm(&mut self) -> bool {
        let was_ready = self.is_ready();
        self.phase = SwipePhase::Disarmed;
        was_ready
    }

    /// Feed one single-hand frame. `Some` means the swipe logic claimed it.
    pub(crate) fn observe(
        &mut self,
        palm: bool,
        knuckles: (f32, f32),
        now_ms: u64,
        cfg: &GestureConfig,
    ) -> Option<Claim> {
        if palm {
            return Some(self.track_palm(knuckles, now_ms, cfg));
        }

        match self.phase {
            SwipePhase::Disarmed => None,
            SwipePhase::Armed => {
                self.phase = SwipePhase::GracePeriod { lost_at_ms: now_ms };
                Some(Claim::status("Swipe Ready..."))
            }
            SwipePhase::GracePeriod { lost_at_ms } => {
                if elapsed_beyond(now_ms, lost_at_ms, cfg.swipe_grace_ms) {
                    log::debug!("Swipe disarmed (grace period ended)");
                    self.phase = SwipePhase::Disarmed;
                    None
                } else {
                    Some(Claim::status("Swipe Ready..."))
                }
            }
        }
    }

    fn track_palm(&mut self, knuckles: (f32, f32), now_ms: u64, cfg: &GestureConfig) -> Claim {
        if self.phase == SwipePhase::Disarmed {
            self.phase = SwipePhase::Armed;
            self.anchor = knuckles;
            self.last_swipe_ms = now_ms;
            log::debug!("Swipe armed at ({:.3}, {:.3})", knuckles.0, knuckles.1);
            return Claim::status("Swipe Armed (Palm)");
        }

        // Palm back during a grace period keeps the original anchor.
        self.phase = SwipePhase::Armed;

        let dx = knuckles.0 - self.anchor.0;
        let dy = knuckles.1 - self.anchor.1;
        let strong = dx.abs() > cfg.swipe_threshold_x || dy.abs() > cfg.swipe_threshold_y;

        if !strong || !elapsed_beyond(now_ms, self.last_swipe_ms, cfg.swipe_cooldown_ms) {
            return Claim::status("Swipe Ready...");
        }

        let (action, label) = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                (SwipeAction::NextWindow, "Swipe Right")
            } else {
                (SwipeAction::PrevWindow, "Swipe Left")
            }
        } else if dy > 0.0 {
            (SwipeAction::Desktop, "Show Desktop")
        } else {
            (SwipeAction::TaskView, "Task View")
        };

        log::debug!("{label} (dx={dx:.3}, dy={dy:.3})");
        self.anchor = knuckles;
        self.last_swipe_ms = now_ms;
        Claim::fire(Command::Swipe(action), label)
    }
}
