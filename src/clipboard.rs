//! Copying citations to the clipboard.
//!
//! A copy never fails from the caller's point of view: the outcome comes back
//! as a [`Notification`] meant for the user, and a successful copy marks the
//! style as "just copied" for [`COPY_MARKER_DURATION`].

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::style::CitationStyle;

/// How long a style stays marked after a successful copy.
pub const COPY_MARKER_DURATION: Duration = Duration::from_millis(2000);

/// Errors raised by a clipboard sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write to clipboard: {0}")]
    WriteFailed(String),
}

/// Somewhere text can be copied to.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard.
///
/// The connection is opened on first use, so constructing one never fails.
/// On X11 the copied text is served by this process and may vanish when it
/// exits unless a clipboard manager picks it up.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let opened = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };
        let clipboard = self.inner.insert(opened);

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// An in-process clipboard, for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    reject_writes: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard on which every write fails.
    pub fn failing() -> Self {
        Self {
            contents: None,
            reject_writes: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.reject_writes {
            return Err(ClipboardError::WriteFailed("writes are rejected".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A short-lived message for the user about a copy attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn success(style: CitationStyle) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: format!("Sitasi {} berhasil disalin", style),
        }
    }

    fn error() -> Self {
        Self {
            kind: NotificationKind::Error,
            message: "Gagal menyalin sitasi".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Remembers which style was copied last, and when.
///
/// Only one style is marked at a time; copying another replaces it.
#[derive(Debug, Clone)]
pub struct CopyTracker {
    last: Option<(CitationStyle, Instant)>,
    duration: Duration,
}

impl Default for CopyTracker {
    fn default() -> Self {
        Self::new(COPY_MARKER_DURATION)
    }
}

impl CopyTracker {
    pub fn new(duration: Duration) -> Self {
        Self {
            last: None,
            duration,
        }
    }

    pub fn mark(&mut self, style: CitationStyle, now: Instant) {
        self.last = Some((style, now));
    }

    /// The style copied within the marker window ending at `now`, if any.
    pub fn copied_style(&self, now: Instant) -> Option<CitationStyle> {
        self.last
            .filter(|(_, at)| now.saturating_duration_since(*at) < self.duration)
            .map(|(style, _)| style)
    }

    pub fn is_copied(&self, style: CitationStyle, now: Instant) -> bool {
        self.copied_style(now) == Some(style)
    }
}

/// Copies formatted citations to a sink and tracks the "just copied" marker.
pub struct CitationCopier<S> {
    sink: S,
    tracker: CopyTracker,
}

impl<S: ClipboardSink> CitationCopier<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            tracker: CopyTracker::default(),
        }
    }

    /// Copies `text` as the citation for `style`.
    pub fn copy(&mut self, style: CitationStyle, text: &str) -> Notification {
        self.copy_at(style, text, Instant::now())
    }

    /// Same as [`copy`](Self::copy), with the clock supplied by the caller.
    pub fn copy_at(&mut self, style: CitationStyle, text: &str, now: Instant) -> Notification {
        match self.sink.set_text(text) {
            Ok(()) => {
                info!(%style, "citation copied to clipboard");
                self.tracker.mark(style, now);
                Notification::success(style)
            }
            Err(e) => {
                warn!(%style, error = %e, "failed to copy citation");
                Notification::error()
            }
        }
    }

    pub fn copied_style(&self, now: Instant) -> Option<CitationStyle> {
        self.tracker.copied_style(now)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
