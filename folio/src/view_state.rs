//! Page-session view state outside the sidebar
//!
//! Small state units for the scroll-snap toggle, the collapsible teaching
//! blurb, expandable publication cards and reveal-once entrance animations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Fraction of a section that must be visible before it is revealed
pub const DEFAULT_REVEAL_THRESHOLD: f32 = 0.2;

/// Scroll snapping applied to the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    /// Free scrolling
    #[default]
    None,
    /// Snap to section starts
    Normal,
    /// Snap to every section start, never skipping one
    Always,
}

impl SnapMode {
    /// Mode selected by the next press of the toggle button
    pub fn next(self) -> Self {
        match self {
            SnapMode::None => SnapMode::Normal,
            SnapMode::Normal => SnapMode::Always,
            SnapMode::Always => SnapMode::None,
        }
    }

    /// Lowercase name used in configuration and tooltips
    pub fn as_str(self) -> &'static str {
        match self {
            SnapMode::None => "none",
            SnapMode::Normal => "normal",
            SnapMode::Always => "always",
        }
    }

    /// Classes applied to the scroll container
    pub fn css_classes(self) -> &'static str {
        match self {
            SnapMode::None => "",
            SnapMode::Normal => "snap-y snap-normal",
            SnapMode::Always => "snap-y snap-always",
        }
    }

    /// Tooltip of the toggle button
    pub fn title(self) -> String {
        format!("Scroll snapping: {}", self.as_str())
    }
}

impl fmt::Display for SnapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blurb that can be collapsed on narrow viewports
#[derive(Debug, Clone)]
pub struct CollapsibleBlurb {
    expanded: bool,
    wide_breakpoint_px: u32,
}

impl CollapsibleBlurb {
    /// Create an expanded blurb
    pub fn new(wide_breakpoint_px: u32) -> Self {
        Self {
            expanded: true,
            wide_breakpoint_px,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip the blurb; returns the new expanded state
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Wide viewports hide the toggle, so the blurb is always shown there
    pub fn on_viewport_resize(&mut self, width_px: u32) {
        if width_px >= self.wide_breakpoint_px {
            self.expanded = true;
        }
    }
}

/// Position of a card inside a two-level list (entry, then item)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardKey {
    /// Index of the outer entry
    pub entry: usize,
    /// Index of the card inside the entry
    pub item: usize,
}

impl CardKey {
    pub fn new(entry: usize, item: usize) -> Self {
        Self { entry, item }
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.entry, self.item)
    }
}

impl std::str::FromStr for CardKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (entry, item) = s
            .split_once('-')
            .ok_or_else(|| format!("expected '<entry>-<item>', got '{}'", s))?;
        let entry = entry
            .parse()
            .map_err(|_| format!("invalid entry index '{}'", entry))?;
        let item = item
            .parse()
            .map_err(|_| format!("invalid item index '{}'", item))?;
        Ok(Self { entry, item })
    }
}

/// Expanded/collapsed state of cards; every card starts collapsed
#[derive(Debug, Clone, Default)]
pub struct CardExpansion {
    expanded: BTreeSet<CardKey>,
}

impl CardExpansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: CardKey) -> bool {
        self.expanded.contains(&key)
    }

    /// Flip one card; returns its new expanded state
    pub fn toggle(&mut self, key: CardKey) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    /// Expanded cards in (entry, item) order
    pub fn expanded(&self) -> impl Iterator<Item = CardKey> + '_ {
        self.expanded.iter().copied()
    }
}

/// Latches sections as revealed the first time enough of them is visible
#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f32,
    revealed: BTreeSet<String>,
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_THRESHOLD)
    }
}

impl RevealTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            revealed: BTreeSet::new(),
        }
    }

    /// Record a visibility report; returns true only when `id` is newly revealed
    ///
    /// Ratios outside `0.0..=1.0` (NaN included) are ignored.
    pub fn observe(&mut self, id: &str, visible_ratio: f32) -> bool {
        if !(0.0..=1.0).contains(&visible_ratio)
            || visible_ratio < self.threshold
            || self.revealed.contains(id)
        {
            return false;
        }
        self.revealed.insert(id.to_string());
        true
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    /// Revealed section ids in sorted order
    pub fn revealed(&self) -> impl Iterator<Item = &str> + '_ {
        self.revealed.iter().map(String::as_str)
    }
}
