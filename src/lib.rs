//! # Gesture Cortex
//!
//! Real-time hand gesture control for the desktop. Camera frames go through
//! an external hand-landmark detector; the gesture classifier turns each
//! frame's hands into at most one host command (pointer motion, clicks,
//! scrolling, volume/brightness steps, window and tab switching,
//! application shortcuts) plus a status line.
//!
//! The pipeline is five workers joined by bounded queues (see [`pipeline`]).
//! Everything outside the classifier sits behind a narrow trait:
//! [`FrameSource`], [`LandmarkDetector`], [`Actuator`], [`WindowTitleSource`]
//! and [`StatusSink`].

pub mod actuation;
pub mod app;
pub mod classifier;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod hand;
pub mod overlay;
pub mod pipeline;
pub mod types;
pub mod vision;

pub use types::*;
pub use actuation::{Actuator, DispatchStats, Dispatcher, DryRunActuator, XdotoolActuator};
pub use classifier::{
    ActiveMode, Classification, FixedWindowTitle, GestureClassifier, GestureState, SwipePhase,
    WindowTitleSource,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use command::Command;
pub use config::Config;
pub use hand::FingerVector;
pub use overlay::{LogStatusSink, StatusSink};
pub use pipeline::{Collaborators, Pipeline, PipelineReport};
pub use vision::{FrameSource, LandmarkDetector, ReplayDetector, SyntheticFrameSource};
