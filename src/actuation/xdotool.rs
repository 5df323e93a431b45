//! X11 actuation through `xdotool`, brightness through `brightnessctl`

use super::Actuator;
use crate::command::{
    BrowserAction, Command, MediaAction, PresentationAction, SwipeAction, ZoomAction,
};
use crate::config::ActuationConfig;
use crate::error::ActuationError;

/// A single external program call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl Invocation {
    fn xdotool<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: "xdotool",
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn key(combo: &str) -> Self {
        Self::xdotool(["key", combo])
    }
}

/// Program call that carries out `command`
pub fn invocation(command: &Command, config: &ActuationConfig) -> Invocation {
    let scroll = |button: &str| {
        Invocation::xdotool([
            "click".to_string(),
            "--repeat".to_string(),
            config.scroll_clicks.max(1).to_string(),
            button.to_string(),
        ])
    };
    let brightness = |sign: char| Invocation {
        program: "brightnessctl",
        args: vec!["set".to_string(), format!("{}%{sign}", config.brightness_step)],
    };

    match *command {
        Command::Move { dx, dy } => Invocation::xdotool([
            "mousemove_relative".to_string(),
            "--".to_string(),
            (dx.round() as i32).to_string(),
            (dy.round() as i32).to_string(),
        ]),
        Command::Click => Invocation::xdotool(["click", "1"]),
        Command::RightClick => Invocation::xdotool(["click", "3"]),
        Command::ScrollUp => scroll("4"),
        Command::ScrollDown => scroll("5"),
        Command::VolumeUp => Invocation::key("XF86AudioRaiseVolume"),
        Command::VolumeDown => Invocation::key("XF86AudioLowerVolume"),
        Command::BrightnessUp => brightness('+'),
        Command::BrightnessDown => brightness('-'),
        Command::Swipe(action) => Invocation::key(match action {
            SwipeAction::NextWindow => "alt+Tab",
            SwipeAction::PrevWindow => "alt+shift+Tab",
            SwipeAction::Desktop => "super+d",
            SwipeAction::TaskView => "super+Tab",
        }),
        Command::Presentation(action) => Invocation::key(match action {
            PresentationAction::StartShow => "F5",
            PresentationAction::NextSlide => "Right",
            PresentationAction::PrevSlide => "Left",
        }),
        Command::Zoom(action) => Invocation::key(match action {
            ZoomAction::Mute => "alt+a",
            ZoomAction::Video => "alt+v",
            ZoomAction::RaiseHand => "alt+y",
        }),
        Command::Browser(action) => Invocation::key(match action {
            BrowserAction::NextTab => "ctrl+Tab",
            BrowserAction::PrevTab => "ctrl+shift+Tab",
        }),
        Command::Media(action) => Invocation::key(match action {
            MediaAction::PlayPause => "space",
            MediaAction::NextTrack => "XF86AudioNext",
            MediaAction::PrevTrack => "XF86AudioPrev",
        }),
    }
}

/// Runs each command as one `xdotool` / `brightnessctl` call
pub struct XdotoolActuator {
    config: ActuationConfig,
}

impl XdotoolActuator {
    pub fn new(config: ActuationConfig) -> Self {
        Self { config }
    }
}

impl Actuator for XdotoolActuator {
    fn execute(&mut self, command: &Command) -> Result<(), ActuationError> {
        let call = invocation(command, &self.config);
        let status = std::process::Command::new(call.program)
            .args(&call.args)
            .status()
            .map_err(|source| ActuationError::Launch {
                program: call.program,
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ActuationError::Failed {
                program: call.program,
                status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(command: Command) -> (&'static str, Vec<String>) {
        let call = invocation(&command, &ActuationConfig::default());
        (call.program, call.args)
    }

    #[test]
    fn pointer_commands() {
        assert_eq!(
            args(Command::Move { dx: 12.4, dy: -7.6 }),
            (
                "xdotool",
                ["mousemove_relative", "--", "12", "-8"]
                    .map(String::from)
                    .to_vec()
            )
        );
        assert_eq!(args(Command::Click).1, vec!["click", "1"]);
        assert_eq!(args(Command::RightClick).1, vec!["click", "3"]);
        assert_eq!(args(Command::ScrollDown).1, vec!["click", "--repeat", "1", "5"]);
    }

    #[test]
    fn brightness_goes_through_brightnessctl() {
        let config = ActuationConfig {
            brightness_step: 10,
            ..Default::default()
        };
        let call = invocation(&Command::BrightnessDown, &config);
        assert_eq!(call.program, "brightnessctl");
        assert_eq!(call.args, vec!["set", "10%-"]);
    }

    #[test]
    fn shortcuts() {
        let key = |c| args(c).1[1].clone();
        assert_eq!(key(Command::Swipe(SwipeAction::PrevWindow)), "alt+shift+Tab");
        assert_eq!(key(Command::Presentation(PresentationAction::StartShow)), "F5");
        assert_eq!(key(Command::Zoom(ZoomAction::RaiseHand)), "alt+y");
        assert_eq!(key(Command::Browser(BrowserAction::PrevTab)), "ctrl+shift+Tab");
        assert_eq!(key(Command::Media(MediaAction::NextTrack)), "XF86AudioNext");
        assert_eq!(key(Command::VolumeUp), "XF86AudioRaiseVolume");
    }
}
