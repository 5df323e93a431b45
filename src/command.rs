//! Host commands emitted by the classifier and executed by the dispatcher
//!
//! Every command has a canonical text form (`move:12,-4`, `swipe:next_window`,
//! `click`, ...) used in logs and by the `exec` CLI mode.

use crate::error::CommandError;
use std::fmt;
use std::str::FromStr;

/// Window management swipes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    NextWindow,
    PrevWindow,
    Desktop,
    TaskView,
}

/// Slideshow control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationAction {
    StartShow,
    NextSlide,
    PrevSlide,
}

/// Video-call shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomAction {
    Mute,
    Video,
    RaiseHand,
}

/// Browser tab navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserAction {
    NextTab,
    PrevTab,
}

/// Media player transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    NextTrack,
    PrevTrack,
    PlayPause,
}

/// A single UI command for the host machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Relative pointer motion in pixels
    Move { dx: f32, dy: f32 },
    Click,
    RightClick,
    ScrollUp,
    ScrollDown,
    VolumeUp,
    VolumeDown,
    BrightnessUp,
    BrightnessDown,
    Swipe(SwipeAction),
    Presentation(PresentationAction),
    Zoom(ZoomAction),
    Browser(BrowserAction),
    Media(MediaAction),
}

impl Command {
    /// Reject payloads the actuator cannot act on
    pub fn validate(&self) -> Result<(), CommandError> {
        match *self {
            Command::Move { dx, dy } if !(dx.is_finite() && dy.is_finite()) => {
                Err(CommandError::NonFiniteDelta { dx, dy })
            }
            _ => Ok(()),
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Command::Move { .. } => "move",
            Command::Click => "click",
            Command::RightClick => "right_click",
            Command::ScrollUp => "scroll_up",
            Command::ScrollDown => "scroll_down",
            Command::VolumeUp => "vol_up",
            Command::VolumeDown => "vol_down",
            Command::BrightnessUp => "brightness_up",
            Command::BrightnessDown => "brightness_down",
            Command::Swipe(SwipeAction::NextWindow) => "swipe:next_window",
            Command::Swipe(SwipeAction::PrevWindow) => "swipe:prev_window",
            Command::Swipe(SwipeAction::Desktop) => "swipe:desktop",
            Command::Swipe(SwipeAction::TaskView) => "swipe:task_view",
            Command::Presentation(PresentationAction::StartShow) => "ppt:start_show",
            Command::Presentation(PresentationAction::NextSlide) => "ppt:next_slide",
            Command::Presentation(PresentationAction::PrevSlide) => "ppt:prev_slide",
            Command::Zoom(ZoomAction::Mute) => "zoom:mute",
            Command::Zoom(ZoomAction::Video) => "zoom:video",
            Command::Zoom(ZoomAction::RaiseHand) => "zoom:raise_hand",
            Command::Browser(BrowserAction::NextTab) => "browser:next_tab",
            Command::Browser(BrowserAction::PrevTab) => "browser:prev_tab",
            Command::Media(MediaAction::NextTrack) => "media:next_track",
            Command::Media(MediaAction::PrevTrack) => "media:prev_track",
            Command::Media(MediaAction::PlayPause) => "media:play_pause",
        }
    }
}

const PARAMETERLESS: [Command; 23] = [
    Command::Click,
    Command::RightClick,
    Command::ScrollUp,
    Command::ScrollDown,
    Command::VolumeUp,
    Command::VolumeDown,
    Command::BrightnessUp,
    Command::BrightnessDown,
    Command::Swipe(SwipeAction::NextWindow),
    Command::Swipe(SwipeAction::PrevWindow),
    Command::Swipe(SwipeAction::Desktop),
    Command::Swipe(SwipeAction::TaskView),
    Command::Presentation(PresentationAction::StartShow),
    Command::Presentation(PresentationAction::NextSlide),
    Command::Presentation(PresentationAction::PrevSlide),
    Command::Zoom(ZoomAction::Mute),
    Command::Zoom(ZoomAction::Video),
    Command::Zoom(ZoomAction::RaiseHand),
    Command::Browser(BrowserAction::NextTab),
    Command::Browser(BrowserAction::PrevTab),
    Command::Media(MediaAction::NextTrack),
    Command::Media(MediaAction::PrevTrack),
    Command::Media(MediaAction::PlayPause),
];

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move { dx, dy } => write!(f, "move:{},{}", dx, dy),
            other => f.write_str(other.tag()),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(payload) = s.strip_prefix("move:") {
            let (dx, dy) = payload
                .split_once(',')
                .ok_or_else(|| CommandError::MalformedMove(payload.to_string()))?;
            let dx: f32 = dx
                .trim()
                .parse()
                .map_err(|_| CommandError::MalformedMove(payload.to_string()))?;
            let dy: f32 = dy
                .trim()
                .parse()
                .map_err(|_| CommandError::MalformedMove(payload.to_string()))?;
            let command = Command::Move { dx, dy };
            command.validate()?;
            return Ok(command);
        }

        PARAMETERLESS
            .iter()
            .find(|c| c.tag() == s)
            .copied()
            .ok_or_else(|| CommandError::Unknown(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_move_payload() {
        let cmd: Command = "move:12.5,-3".parse().expect("parse");
        assert_eq!(cmd, Command::Move { dx: 12.5, dy: -3.0 });
        assert_eq!(cmd.to_string(), "move:12.5,-3");
    }

    #[test]
    fn parse_tagged_commands() {
        assert_eq!("click".parse::<Command>().unwrap(), Command::Click);
        assert_eq!(
            "swipe:task_view".parse::<Command>().unwrap(),
            Command::Swipe(SwipeAction::TaskView)
        );
        assert_eq!(
            " media:play_pause ".parse::<Command>().unwrap(),
            Command::Media(MediaAction::PlayPause)
        );
    }

    #[test]
    fn every_tag_parses_back() {
        for cmd in PARAMETERLESS {
            assert_eq!(cmd.to_string().parse::<Command>().unwrap(), cmd);
        }
    }

    #[test]
    fn malformed_move_is_rejected() {
        assert!(matches!(
            "move:12".parse::<Command>(),
            Err(CommandError::MalformedMove(_))
        ));
        assert!(matches!(
            "move:abc,1".parse::<Command>(),
            Err(CommandError::MalformedMove(_))
        ));
        assert!(matches!(
            "move:NaN,1".parse::<Command>(),
            Err(CommandError::NonFiniteDelta { .. })
        ));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(matches!(
            "swipe:sideways".parse::<Command>(),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn validate_flags_infinite_delta() {
        assert!(Command::Move { dx: f32::INFINITY, dy: 0.0 }.validate().is_err());
        assert!(Command::Move { dx: 1.0, dy: 0.0 }.validate().is_ok());
        assert!(Command::VolumeUp.validate().is_ok());
    }
}
