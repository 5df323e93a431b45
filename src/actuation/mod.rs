//! # Action Dispatch
//!
//! Executes classifier commands against the host. Each command maps to
//! exactly one backend call; invalid commands and backend failures are
//! logged and dropped so dispatch never stops.

mod xdotool;

pub use xdotool::{invocation, Invocation, XdotoolActuator};

use crate::command::Command;
use crate::config::{ActuationConfig, ActuatorBackend};
use crate::error::{ActuationError, CommandError};

/// OS actuation backend
pub trait Actuator {
    fn execute(&mut self, command: &Command) -> Result<(), ActuationError>;
}

impl<T: Actuator + ?Sized> Actuator for Box<T> {
    fn execute(&mut self, command: &Command) -> Result<(), ActuationError> {
        (**self).execute(command)
    }
}

/// Build the backend named in the config
pub fn actuator_from_config(config: &ActuationConfig) -> Box<dyn Actuator + Send> {
    match config.backend {
        ActuatorBackend::DryRun => Box::new(DryRunActuator::default()),
        ActuatorBackend::Xdotool => Box::new(XdotoolActuator::new(config.clone())),
    }
}

/// Logs commands instead of executing them
#[derive(Debug, Default)]
pub struct DryRunActuator {
    executed: u64,
}

impl DryRunActuator {
    pub fn executed(&self) -> u64 {
        self.executed
    }
}

impl Actuator for DryRunActuator {
    fn execute(&mut self, command: &Command) -> Result<(), ActuationError> {
        self.executed += 1;
        log::info!("[dry-run] {command}");
        Ok(())
    }
}

/// Dispatch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub executed: u64,
    pub rejected: u64,
    pub failed: u64,
}

/// Outcome of dispatching one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Executed,
    Rejected,
    Failed,
}

/// Validates, executes and isolates failures per command
pub struct Dispatcher<A> {
    actuator: A,
    stats: DispatchStats,
}

impl<A: Actuator> Dispatcher<A> {
    pub fn new(actuator: A) -> Self {
        Self {
            actuator,
            stats: DispatchStats::default(),
        }
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn into_inner(self) -> A {
        self.actuator
    }

    pub fn dispatch(&mut self, command: &Command) -> Dispatch {
        if let Err(e) = command.validate() {
            log::warn!("Dropping command {command}: {e}");
            self.stats.rejected += 1;
            return Dispatch::Rejected;
        }

        match self.actuator.execute(command) {
            Ok(()) => {
                log::debug!("Executed {command}");
                self.stats.executed += 1;
                Dispatch::Executed
            }
            Err(e) => {
                log::warn!("Command {command} failed: {e}");
                self.stats.failed += 1;
                Dispatch::Failed
            }
        }
    }

    /// Parse a command in wire form and dispatch it
    pub fn dispatch_text(&mut self, text: &str) -> Result<Dispatch, CommandError> {
        let command: Command = text.parse().map_err(|e: CommandError| {
            log::warn!("Dropping command {text:?}: {e}");
            self.stats.rejected += 1;
            e
        })?;
        Ok(self.dispatch(&command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::SwipeAction;
    use std::io;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<Command>,
        fail_brightness: bool,
    }

    impl Actuator for Recorder {
        fn execute(&mut self, command: &Command) -> Result<(), ActuationError> {
            if self.fail_brightness && matches!(command, Command::BrightnessUp | Command::BrightnessDown) {
                return Err(ActuationError::Launch {
                    program: "brightnessctl",
                    source: io::Error::new(io::ErrorKind::NotFound, "missing"),
                });
            }
            self.seen.push(*command);
            Ok(())
        }
    }

    #[test]
    fn invalid_move_is_dropped_and_dispatch_continues() {
        let mut d = Dispatcher::new(Recorder::default());
        assert_eq!(
            d.dispatch(&Command::Move { dx: f32::NAN, dy: 0.0 }),
            Dispatch::Rejected
        );
        assert!(d.dispatch_text("move:abc").is_err());
        assert_eq!(d.dispatch(&Command::Click), Dispatch::Executed);

        assert_eq!(d.stats().rejected, 2);
        assert_eq!(d.into_inner().seen, vec![Command::Click]);
    }

    #[test]
    fn backend_failure_is_isolated() {
        let mut d = Dispatcher::new(Recorder {
            fail_brightness: true,
            ..Default::default()
        });
        assert_eq!(d.dispatch(&Command::BrightnessUp), Dispatch::Failed);
        assert_eq!(
            d.dispatch_text("swipe:task_view").expect("parse"),
            Dispatch::Executed
        );
        assert_eq!(
            d.stats(),
            DispatchStats {
                executed: 1,
                rejected: 0,
                failed: 1
            }
        );
        assert_eq!(
            d.into_inner().seen,
            vec![Command::Swipe(SwipeAction::TaskView)]
        );
    }

    #[test]
    fn boxed_dry_run_counts() {
        let mut d = Dispatcher::new(DryRunActuator::default());
        d.dispatch(&Command::ScrollUp);
        d.dispatch(&Command::VolumeDown);
        assert_eq!(d.into_inner().executed(), 2);

        let mut boxed = actuator_from_config(&ActuationConfig::default());
        assert!(boxed.execute(&Command::Click).is_ok());
    }
}
