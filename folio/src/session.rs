//! Page session: dispatches host events to the page state
//!
//! A [`PageSession`] bundles the navigation controller with the rest of the
//! view state. Events arrive one at a time as [`PageEvent`] values; each is
//! fully applied before the next one is dispatched.
//!
//! Events can also be written as a small text script, one per line:
//!
//! ```text
//! resize 800
//! toggle-drawer
//! pointer outside
//! spy teaching
//! click publications
//! toggle-snap
//! toggle-blurb
//! toggle-card 0-1
//! visible about 0.35
//! ```

use crate::navigation::{NavigationController, NavigationError, NavigationState};
use crate::site_config::SiteConfig;
use crate::view_state::{CardExpansion, CardKey, CollapsibleBlurb, RevealTracker, SnapMode};
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A host event delivered to the page
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Viewport width report (on load and on every resize)
    Resize { width_px: u32 },
    /// The drawer menu button was pressed
    ToggleDrawer,
    /// Pointer pressed somewhere on the page
    PointerDown { inside_nav: bool },
    /// Scroll-spy picked the most visible section
    SectionVisible { id: String },
    /// A navigation link was activated
    LinkActivated { id: String },
    /// The scroll-snap button was pressed
    ToggleSnap,
    /// The teaching blurb arrow was pressed
    ToggleBlurb,
    /// A publication card header was pressed
    ToggleCard(CardKey),
    /// Intersection report for a section
    Visibility { id: String, ratio: f32 },
}

/// Errors in a textual event script
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionScriptError {
    #[error("line {line}: unknown event '{text}'")]
    UnknownEvent { line: usize, text: String },

    #[error("line {line}: {message}")]
    InvalidArgument { line: usize, message: String },
}

/// Why a single event line could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventParseError {
    #[error("unknown event")]
    Unknown,

    #[error("{0}")]
    Invalid(String),
}

impl FromStr for PageEvent {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let arg = |index: usize| {
            args.get(index)
                .copied()
                .ok_or_else(|| {
                    EventParseError::Invalid(format!("'{}' is missing an argument", command))
                })
        };

        let event = match command {
            "resize" => {
                let width = arg(0)?;
                PageEvent::Resize {
                    width_px: width
                        .parse()
                        .map_err(|_| EventParseError::Invalid(format!("invalid width '{}'", width)))?,
                }
            }
            "toggle-drawer" => PageEvent::ToggleDrawer,
            "pointer" => match arg(0)? {
                "inside" => PageEvent::PointerDown { inside_nav: true },
                "outside" => PageEvent::PointerDown { inside_nav: false },
                other => {
                    return Err(EventParseError::Invalid(format!(
                        "expected 'inside' or 'outside', got '{}'",
                        other
                    )))
                }
            },
            "spy" => PageEvent::SectionVisible {
                id: arg(0)?.to_string(),
            },
            "click" => PageEvent::LinkActivated {
                id: arg(0)?.to_string(),
            },
            "toggle-snap" => PageEvent::ToggleSnap,
            "toggle-blurb" => PageEvent::ToggleBlurb,
            "toggle-card" => {
                PageEvent::ToggleCard(arg(0)?.parse().map_err(EventParseError::Invalid)?)
            }
            "visible" => {
                let text = arg(1)?;
                let ratio: f32 = text
                    .parse()
                    .map_err(|_| EventParseError::Invalid(format!("invalid ratio '{}'", text)))?;
                if !(0.0..=1.0).contains(&ratio) {
                    return Err(EventParseError::Invalid(format!(
                        "ratio '{}' is outside 0..=1",
                        text
                    )));
                }
                PageEvent::Visibility {
                    id: arg(0)?.to_string(),
                    ratio,
                }
            }
            _ => return Err(EventParseError::Unknown),
        };
        Ok(event)
    }
}

/// Parse an event script; blank lines and `#` comments are skipped
pub fn parse_script(script: &str) -> Result<Vec<PageEvent>, SessionScriptError> {
    let mut events = Vec::new();
    for (index, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = line.parse::<PageEvent>().map_err(|e| match e {
            EventParseError::Unknown => SessionScriptError::UnknownEvent {
                line: index + 1,
                text: line.to_string(),
            },
            EventParseError::Invalid(message) => SessionScriptError::InvalidArgument {
                line: index + 1,
                message,
            },
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Everything a page tracks during one visit
#[derive(Debug, Clone)]
pub struct PageSession {
    navigation: NavigationController,
    snap_mode: SnapMode,
    blurb: CollapsibleBlurb,
    cards: CardExpansion,
    reveals: RevealTracker,
}

impl PageSession {
    /// Create a session from the site configuration
    pub fn new(config: &SiteConfig) -> Result<Self, NavigationError> {
        Ok(Self {
            navigation: config.navigation_controller()?,
            snap_mode: config.scroll_snap,
            blurb: CollapsibleBlurb::new(config.wide_breakpoint_px),
            cards: CardExpansion::new(),
            reveals: RevealTracker::default(),
        })
    }

    /// Report the initial viewport width, before any real resize event
    pub fn start(&mut self, width_px: u32) {
        self.resize(width_px);
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn snap_mode(&self) -> SnapMode {
        self.snap_mode
    }

    pub fn blurb_expanded(&self) -> bool {
        self.blurb.is_expanded()
    }

    pub fn card_expanded(&self, key: CardKey) -> bool {
        self.cards.is_expanded(key)
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.reveals.is_revealed(id)
    }

    /// Apply one event
    ///
    /// Events naming an unconfigured section fail with
    /// [`NavigationError::InvalidSection`] and leave the session unchanged.
    pub fn dispatch(&mut self, event: &PageEvent) -> Result<(), NavigationError> {
        log::debug!("Dispatching {:?}", event);
        match event {
            PageEvent::Resize { width_px } => self.resize(*width_px),
            PageEvent::ToggleDrawer => {
                self.navigation.on_toggle_drawer_requested();
            }
            PageEvent::PointerDown { inside_nav } => {
                self.navigation.on_outside_interaction(*inside_nav);
            }
            PageEvent::SectionVisible { id } => self.navigation.on_section_became_active(id)?,
            PageEvent::LinkActivated { id } => self.navigation.on_navigation_link_activated(id)?,
            PageEvent::ToggleSnap => self.snap_mode = self.snap_mode.next(),
            PageEvent::ToggleBlurb => {
                self.blurb.toggle();
            }
            PageEvent::ToggleCard(key) => {
                self.cards.toggle(*key);
            }
            PageEvent::Visibility { id, ratio } => {
                if self.navigation.section(id).is_none() {
                    return Err(NavigationError::InvalidSection { id: id.clone() });
                }
                if self.reveals.observe(id, *ratio) {
                    log::debug!("Section '{}' revealed", id);
                }
            }
        }
        Ok(())
    }

    /// Current state in a form suitable for printing or comparison
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            navigation: self.navigation.state().clone(),
            snap_mode: self.snap_mode,
            blurb_expanded: self.blurb.is_expanded(),
            expanded_cards: self.cards.expanded().collect(),
            revealed: self.reveals.revealed().map(str::to_string).collect(),
            wide: self.navigation.is_wide(),
        }
    }

    fn resize(&mut self, width_px: u32) {
        self.navigation.on_viewport_resize(width_px);
        self.blurb.on_viewport_resize(width_px);
    }
}

/// Point-in-time copy of a [`PageSession`]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub navigation: NavigationState,
    pub snap_mode: SnapMode,
    pub blurb_expanded: bool,
    pub expanded_cards: Vec<CardKey>,
    pub revealed: Vec<String>,
    /// Last reported viewport was at or above the breakpoint
    pub wide: bool,
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "active={} drawer={} snap={} blurb={} cards=[{}] revealed=[{}] layout={}",
            self.navigation.active_section_id,
            if self.navigation.drawer_open { "open" } else { "closed" },
            self.snap_mode,
            if self.blurb_expanded { "expanded" } else { "collapsed" },
            self.expanded_cards.iter().join(","),
            self.revealed.iter().join(","),
            if self.wide { "wide" } else { "narrow" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PageSession {
        let mut session = PageSession::new(&SiteConfig::new("Test")).unwrap();
        session.start(800);
        session
    }

    #[test]
    fn test_parse_script() {
        let script = "\
# narrow phone
resize 375

toggle-drawer
pointer outside
spy teaching
click publications
toggle-card 1-0
visible about 0.5
toggle-snap
toggle-blurb
";
        let events = parse_script(script).unwrap();
        assert_eq!(events.len(), 9);
        assert_eq!(events[0], PageEvent::Resize { width_px: 375 });
        assert_eq!(events[2], PageEvent::PointerDown { inside_nav: false });
        assert_eq!(events[5], PageEvent::ToggleCard(CardKey::new(1, 0)));
        assert_eq!(
            events[6],
            PageEvent::Visibility {
                id: "about".to_string(),
                ratio: 0.5
            }
        );
    }

    #[test]
    fn test_script_errors_carry_line_numbers() {
        assert_eq!(
            parse_script("resize 10\njump about"),
            Err(SessionScriptError::UnknownEvent {
                line: 2,
                text: "jump about".to_string()
            })
        );
        assert!(matches!(
            parse_script("\nresize wide"),
            Err(SessionScriptError::InvalidArgument { line: 2, .. })
        ));
        assert!(matches!(
            parse_script("spy"),
            Err(SessionScriptError::InvalidArgument { line: 1, .. })
        ));
    }

    #[test]
    fn test_visibility_ratio_must_be_a_fraction() {
        for line in [
            "visible about NaN",
            "visible teaching inf",
            "visible about 1.5",
            "visible about -0.1",
        ] {
            assert!(
                matches!(line.parse::<PageEvent>(), Err(EventParseError::Invalid(_))),
                "{} should be rejected",
                line
            );
        }

        let mut session = session();
        session
            .dispatch(&PageEvent::Visibility {
                id: "about".to_string(),
                ratio: f32::NAN,
            })
            .unwrap();
        assert!(!session.is_revealed("about"));
        assert_eq!(
            "visible about 1".parse::<PageEvent>(),
            Ok(PageEvent::Visibility {
                id: "about".to_string(),
                ratio: 1.0
            })
        );
    }

    #[test]
    fn test_drawer_flow() {
        let mut session = session();
        session.dispatch(&PageEvent::ToggleDrawer).unwrap();
        assert!(session.navigation().state().drawer_open);

        session
            .dispatch(&PageEvent::PointerDown { inside_nav: true })
            .unwrap();
        assert!(session.navigation().state().drawer_open);

        session
            .dispatch(&PageEvent::LinkActivated {
                id: "service".to_string(),
            })
            .unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.navigation.active_section_id, "service");
        assert!(!snapshot.navigation.drawer_open);
    }

    #[test]
    fn test_resize_updates_drawer_and_blurb() {
        let mut session = session();
        session.dispatch(&PageEvent::ToggleDrawer).unwrap();
        session.dispatch(&PageEvent::ToggleBlurb).unwrap();
        assert!(!session.blurb_expanded());

        session
            .dispatch(&PageEvent::Resize { width_px: 1440 })
            .unwrap();
        assert!(!session.navigation().state().drawer_open);
        assert!(session.blurb_expanded());
    }

    #[test]
    fn test_invalid_section_leaves_session_unchanged() {
        let mut session = session();
        session.dispatch(&PageEvent::ToggleDrawer).unwrap();
        let before = session.snapshot();

        for event in [
            PageEvent::SectionVisible {
                id: "blog".to_string(),
            },
            PageEvent::LinkActivated {
                id: "blog".to_string(),
            },
            PageEvent::Visibility {
                id: "blog".to_string(),
                ratio: 1.0,
            },
        ] {
            assert!(matches!(
                session.dispatch(&event),
                Err(NavigationError::InvalidSection { .. })
            ));
            assert_eq!(session.snapshot(), before);
        }
    }

    #[test]
    fn test_snapshot_display() {
        let mut session = session();
        for line in ["toggle-snap", "toggle-card 0-1", "visible teaching 0.4", "spy teaching"] {
            session.dispatch(&line.parse().unwrap()).unwrap();
        }
        assert_eq!(
            session.snapshot().to_string(),
            "active=teaching drawer=closed snap=normal blurb=expanded cards=[0-1] revealed=[teaching] \
             layout=narrow"
        );
    }
}
