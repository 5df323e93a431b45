//! Foreground application inference

use crate::error::ContextError;
use crate::types::AppContext;
use std::process::Command;

/// Source of the title of the window currently holding focus
pub trait WindowTitleSource {
    /// `Ok(None)` when no window has focus
    fn current_foreground_title(&mut self) -> Result<Option<String>, ContextError>;
}

impl<T: WindowTitleSource + ?Sized> WindowTitleSource for Box<T> {
    fn current_foreground_title(&mut self) -> Result<Option<String>, ContextError> {
        (**self).current_foreground_title()
    }
}

const BROWSERS: [&str; 7] = [
    "chrome",
    "firefox",
    "edge",
    "brave",
    "нова вкладка",
    "new tab",
    "opera",
];
const MEDIA_PLAYERS: [&str; 2] = ["spotify", "vlc"];

/// Map a window title onto an application profile. Case-insensitive; the
/// first matching family wins.
pub fn infer_context(title: &str) -> AppContext {
    let title = title.to_lowercase();
    let has_any = |needles: &[&str]| needles.iter().any(|n| title.contains(n));

    if title.contains("powerpoint") {
        AppContext::PowerPoint
    } else if title.contains("zoom") {
        AppContext::Zoom
    } else if has_any(&BROWSERS) {
        AppContext::Browser
    } else if has_any(&MEDIA_PLAYERS) {
        AppContext::Media
    } else {
        AppContext::General
    }
}

/// Query the title source and fall back to `General` on any failure
pub fn resolve_context<S: WindowTitleSource + ?Sized>(source: &mut S) -> AppContext {
    match source.current_foreground_title() {
        Ok(Some(title)) => {
            let context = infer_context(&title);
            log::debug!("Title='{title}' | Profile='{context}'");
            context
        }
        Ok(None) => AppContext::General,
        Err(e) => {
            log::warn!("Window title query failed: {e}");
            AppContext::General
        }
    }
}

/// Active window title through `xdotool`
#[derive(Debug, Default)]
pub struct XdotoolWindowTitle;

impl XdotoolWindowTitle {
    pub fn new() -> Self {
        Self
    }
}

impl WindowTitleSource for XdotoolWindowTitle {
    fn current_foreground_title(&mut self) -> Result<Option<String>, ContextError> {
        let output = Command::new("xdotool")
            .args(["getactivewindow", "getwindowname"])
            .output()
            .map_err(ContextError::Launch)?;

        if !output.status.success() {
            return Err(ContextError::Failed(output.status));
        }

        let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if title.is_empty() { None } else { Some(title) })
    }
}

/// Always reports the same title
#[derive(Debug, Clone, Default)]
pub struct FixedWindowTitle {
    title: Option<String>,
}

impl FixedWindowTitle {
    pub fn new(title: Option<String>) -> Self {
        Self { title }
    }

    pub fn set(&mut self, title: Option<String>) {
        self.title = title;
    }
}

impl WindowTitleSource for FixedWindowTitle {
    fn current_foreground_title(&mut self) -> Result<Option<String>, ContextError> {
        Ok(self.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Broken;

    impl WindowTitleSource for Broken {
        fn current_foreground_title(&mut self) -> Result<Option<String>, ContextError> {
            Err(ContextError::Launch(io::Error::new(io::ErrorKind::NotFound, "no xdotool")))
        }
    }

    #[test]
    fn keyword_families() {
        assert_eq!(infer_context("Deck.pptx - PowerPoint"), AppContext::PowerPoint);
        assert_eq!(infer_context("Zoom Meeting"), AppContext::Zoom);
        assert_eq!(infer_context("GitHub - Mozilla Firefox"), AppContext::Browser);
        assert_eq!(infer_context("Нова вкладка - Google Chrome"), AppContext::Browser);
        assert_eq!(infer_context("Spotify Premium"), AppContext::Media);
        assert_eq!(infer_context("VLC media player"), AppContext::Media);
        assert_eq!(infer_context("Terminal"), AppContext::General);
        assert_eq!(infer_context(""), AppContext::General);
    }

    #[test]
    fn priority_order_is_fixed() {
        // Both "powerpoint" and "chrome" appear: PowerPoint is checked first.
        assert_eq!(
            infer_context("PowerPoint Online - Google Chrome"),
            AppContext::PowerPoint
        );
        assert_eq!(infer_context("Zoom - Spotify"), AppContext::Zoom);
    }

    #[test]
    fn failures_fall_back_to_general() {
        assert_eq!(resolve_context(&mut Broken), AppContext::General);
        assert_eq!(resolve_context(&mut FixedWindowTitle::new(None)), AppContext::General);
        assert_eq!(
            resolve_context(&mut FixedWindowTitle::new(Some("vlc".into()))),
            AppContext::Media
        );
    }
}
