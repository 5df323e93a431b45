use super::swipe::SwipeTracker;
use crate::types::AppContext;

/// Continuous value mode currently steered by vertical hand motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveMode {
    #[default]
    None,
    Volume,
    Scroll,
    Brightness,
}

/// Everything the classifier remembers between frames.
///
/// Owned by exactly one classifier; never shared across workers.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    pub(crate) active: bool,
    pub(crate) last_mode_change_ms: u64,
    pub(crate) swipe: SwipeTracker,
    pub(crate) mode: ActiveMode,
    pub(crate) mode_anchor_y: f32,
    pub(crate) last_action_ms: u64,
    pub(crate) app_context: AppContext,
    pub(crate) last_context_check_ms: u64,
    pub(crate) last_click_ms: u64,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn app_context(&self) -> AppContext {
        self.app_context
    }

    pub fn active_mode(&self) -> ActiveMode {
        self.mode
    }

    pub fn swipe(&self) -> &SwipeTracker {
        &self.swipe
    }

    /// Baseline status line when no behaviour claims the frame
    pub fn status_line(&self) -> String {
        if self.active {
            format!("MODE: {}", self.app_context.label())
        } else {
            "MODE: INACTIVE".to_string()
        }
    }
}
