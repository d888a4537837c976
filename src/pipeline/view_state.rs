//! Display-only view state.
//!
//! None of these values feed back into content or filtering; they only
//! decide how already-selected data is presented.

use std::fmt;

/// Home page sections, in navigation order.
pub const SECTIONS: [&str; 5] = ["intro", "work", "projects", "thoughts", "connect"];

/// Visible fraction at which a section becomes active.
pub const ACTIVE_THRESHOLD: f32 = 0.3;

/// One visibility notification for a section.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEvent {
    pub section: String,
    pub intersecting: bool,
    pub ratio: f32,
}

impl IntersectionEvent {
    pub fn entered(section: &str, ratio: f32) -> Self {
        Self {
            section: section.to_string(),
            intersecting: true,
            ratio,
        }
    }

    pub fn left(section: &str) -> Self {
        Self {
            section: section.to_string(),
            intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Tracks which navigation section is highlighted.
///
/// The most recent qualifying event wins. Events for unknown sections or
/// below the threshold are ignored, so late or reordered delivery can only
/// change the highlight, never the page content.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    sections: Vec<String>,
    active: Option<String>,
}

impl SectionTracker {
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    pub fn observe(&mut self, event: &IntersectionEvent) {
        if !event.intersecting || event.ratio < ACTIVE_THRESHOLD {
            return;
        }
        if self.sections.iter().any(|s| *s == event.section) {
            self.active = Some(event.section.clone());
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, section: &str) -> bool {
        self.active.as_deref() == Some(section)
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new(SECTIONS)
    }
}

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A list collapsed to its first `limit` entries until expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMore {
    limit: usize,
    expanded: bool,
}

impl ShowMore {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            expanded: false,
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.expanded {
            items
        } else {
            &items[..items.len().min(self.limit)]
        }
    }

    /// Entries hidden while collapsed.
    pub fn hidden_count(&self, total: usize) -> usize {
        if self.expanded {
            0
        } else {
            total.saturating_sub(self.limit)
        }
    }
}
