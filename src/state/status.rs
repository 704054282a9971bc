//! Status Messages
//!
//! Transient, auto-dismissing status boxes and one-shot notices.

/// Visual kind of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

impl StatusKind {
    pub fn css(&self) -> &'static str {
        match self {
            StatusKind::Loading => "loading",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// A status box.
///
/// Each `show` bumps the generation. Auto-hide timers carry the generation
/// they were armed for, so a timer from an older message never hides a
/// newer one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBox {
    message: Option<(StatusKind, String)>,
    visible: bool,
    generation: u64,
}

impl StatusBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message and return its generation
    pub fn show(&mut self, kind: StatusKind, text: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some((kind, text.into()));
        self.visible = true;
        self.generation
    }

    /// Hide the message if it is still the one shown at `generation`
    pub fn hide(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.visible {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn kind(&self) -> Option<StatusKind> {
        self.message.as_ref().map(|(kind, _)| *kind)
    }

    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().map(|(_, text)| text.as_str())
    }

    /// Text of the message if it is currently shown
    pub fn visible_text(&self) -> Option<&str> {
        if self.visible {
            self.text()
        } else {
            None
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Class list for the box element, e.g. "status-box success"
    pub fn class(&self, base: &str) -> String {
        match self.kind() {
            Some(kind) => format!("{} {}", base, kind.css()),
            None => base.to_string(),
        }
    }
}

/// Alert-style feedback, taken once by whoever presents it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: StatusKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_hide() {
        let mut status = StatusBox::new();
        assert!(!status.is_visible());

        let generation = status.show(StatusKind::Success, "Saved");
        assert!(status.is_visible());
        assert_eq!(status.visible_text(), Some("Saved"));
        assert_eq!(status.class("message"), "message success");

        assert!(status.hide(generation));
        assert!(!status.is_visible());
        assert_eq!(status.visible_text(), None);
        assert_eq!(status.text(), Some("Saved"));
    }

    #[test]
    fn test_stale_hide_ignored() {
        let mut status = StatusBox::new();
        let first = status.show(StatusKind::Error, "Login failed");
        let second = status.show(StatusKind::Success, "Login successful! Redirecting...");

        assert!(!status.hide(first));
        assert_eq!(status.visible_text(), Some("Login successful! Redirecting..."));
        assert!(status.hide(second));
    }

    #[test]
    fn test_message_after_hide_is_visible() {
        let mut status = StatusBox::new();
        let first = status.show(StatusKind::Error, "Passwords do not match!");
        status.hide(first);

        status.show(StatusKind::Error, "Registration failed");
        assert_eq!(status.visible_text(), Some("Registration failed"));
    }

    #[test]
    fn test_class_without_message() {
        let status = StatusBox::new();
        assert_eq!(status.class("status-box"), "status-box");
    }
}
