//! Sidebar navigation state
//!
//! The controller owns the configured sections, the currently highlighted
//! section and the open/closed state of the compact drawer. Host events
//! (viewport resizes, pointer presses, scroll-spy reports and link clicks) are
//! delivered as plain method calls, so the controller has no subscription
//! mechanism of its own.

use thiserror::Error;

/// Viewport width (in CSS pixels) at which the full sidebar is always shown
pub const DEFAULT_WIDE_BREAKPOINT_PX: u32 = 1024;

/// Errors raised by navigation operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// An operation referenced a section that is not configured
    #[error("Unknown navigation section '{id}'")]
    InvalidSection {
        /// The rejected section id
        id: String,
    },

    /// The controller was constructed without any sections
    #[error("Navigation requires at least one section")]
    NoSections,

    /// The same id was configured twice
    #[error("Navigation section '{id}' is configured more than once")]
    DuplicateSection {
        /// The duplicated section id
        id: String,
    },
}

/// One entry of the navigation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSection {
    /// Stable identifier, also used as the anchor of the content section
    pub id: String,

    /// Position in the navigation list
    pub order: usize,

    /// Text shown next to the icon
    pub label: String,
}

/// Observable navigation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Section currently highlighted in the sidebar
    pub active_section_id: String,

    /// Whether the compact drawer is expanded
    pub drawer_open: bool,
}

/// Owns the navigation sections and reacts to host events
#[derive(Debug, Clone)]
pub struct NavigationController {
    sections: Vec<NavigationSection>,
    state: NavigationState,
    wide_breakpoint_px: u32,
    viewport_width_px: Option<u32>,
}

impl NavigationController {
    /// Create a controller whose labels are the section ids themselves
    pub fn new<I, S>(ids: I, wide_breakpoint_px: u32) -> Result<Self, NavigationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections = ids
            .into_iter()
            .map(|id| {
                let id = id.into();
                NavigationSection {
                    label: id.clone(),
                    id,
                    order: 0,
                }
            })
            .collect();
        Self::from_sections(sections, wide_breakpoint_px)
    }

    /// Create a controller from labelled sections
    ///
    /// `order` is reassigned from the position in `sections`. The first
    /// section starts active and the drawer starts closed.
    pub fn from_sections(
        mut sections: Vec<NavigationSection>,
        wide_breakpoint_px: u32,
    ) -> Result<Self, NavigationError> {
        let first = sections.first().ok_or(NavigationError::NoSections)?.id.clone();

        for (index, section) in sections.iter().enumerate() {
            if sections[..index].iter().any(|s| s.id == section.id) {
                return Err(NavigationError::DuplicateSection {
                    id: section.id.clone(),
                });
            }
        }
        for (order, section) in sections.iter_mut().enumerate() {
            section.order = order;
        }

        Ok(Self {
            sections,
            state: NavigationState {
                active_section_id: first,
                drawer_open: false,
            },
            wide_breakpoint_px,
            viewport_width_px: None,
        })
    }

    /// Current state snapshot
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Configured sections in navigation order
    pub fn sections(&self) -> &[NavigationSection] {
        &self.sections
    }

    /// Look up a configured section
    pub fn section(&self, id: &str) -> Option<&NavigationSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Breakpoint this controller was configured with
    pub fn wide_breakpoint_px(&self) -> u32 {
        self.wide_breakpoint_px
    }

    /// Whether the last reported viewport was at or above the breakpoint
    pub fn is_wide(&self) -> bool {
        self.viewport_width_px
            .is_some_and(|width| width >= self.wide_breakpoint_px)
    }

    /// Handle a viewport size report
    ///
    /// Call once at startup with the current width, then on every resize.
    pub fn on_viewport_resize(&mut self, width_px: u32) {
        self.viewport_width_px = Some(width_px);
        if width_px >= self.wide_breakpoint_px && self.state.drawer_open {
            log::debug!("Viewport {}px is wide, closing drawer", width_px);
            self.state.drawer_open = false;
        }
    }

    /// Flip the drawer; returns the new open state
    pub fn on_toggle_drawer_requested(&mut self) -> bool {
        self.state.drawer_open = !self.state.drawer_open;
        self.state.drawer_open
    }

    /// Handle a pointer press, already classified by the caller
    pub fn on_outside_interaction(&mut self, pointer_target_is_inside_nav: bool) {
        if !pointer_target_is_inside_nav {
            self.state.drawer_open = false;
        }
    }

    /// Scroll-spy reported `section_id` as the most visible section
    pub fn on_section_became_active(&mut self, section_id: &str) -> Result<(), NavigationError> {
        self.require_section(section_id)?;
        self.state.active_section_id = section_id.to_string();
        Ok(())
    }

    /// The user activated the link to `section_id`
    ///
    /// The section becomes active and the drawer closes before any scroll
    /// animation runs.
    pub fn on_navigation_link_activated(
        &mut self,
        section_id: &str,
    ) -> Result<(), NavigationError> {
        self.require_section(section_id)?;
        self.state.active_section_id = section_id.to_string();
        self.state.drawer_open = false;
        Ok(())
    }

    fn require_section(&self, section_id: &str) -> Result<&NavigationSection, NavigationError> {
        self.section(section_id).ok_or_else(|| {
            log::warn!("Rejected unknown navigation section '{}'", section_id);
            NavigationError::InvalidSection {
                id: section_id.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONS: [&str; 4] = ["about", "teaching", "service", "publications"];

    fn controller() -> NavigationController {
        NavigationController::new(SECTIONS, DEFAULT_WIDE_BREAKPOINT_PX).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let lists: [&[&str]; 3] = [&SECTIONS, &["solo"], &["b", "a"]];
        for list in lists {
            let nav = NavigationController::new(list.iter().copied(), 1024).unwrap();
            assert_eq!(nav.state().active_section_id, list[0]);
            assert!(!nav.state().drawer_open);
        }
    }

    #[test]
    fn test_sections_keep_insertion_order() {
        let nav = controller();
        let orders: Vec<_> = nav.sections().iter().map(|s| (s.order, s.id.as_str())).collect();
        assert_eq!(
            orders,
            vec![(0, "about"), (1, "teaching"), (2, "service"), (3, "publications")]
        );
    }

    #[test]
    fn test_empty_and_duplicate_sections_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(
            NavigationController::new(empty, 1024).unwrap_err(),
            NavigationError::NoSections
        );
        assert_eq!(
            NavigationController::new(["about", "about"], 1024).unwrap_err(),
            NavigationError::DuplicateSection {
                id: "about".to_string()
            }
        );
    }

    #[test]
    fn test_wide_resize_closes_drawer() {
        for width in [1024, 1025, 1280, 1920, u32::MAX] {
            for start_open in [false, true] {
                let mut nav = controller();
                if start_open {
                    nav.on_toggle_drawer_requested();
                }
                nav.on_viewport_resize(width);
                assert!(!nav.state().drawer_open, "width {} left drawer open", width);
                assert!(nav.is_wide());
            }
        }
    }

    #[test]
    fn test_narrow_resize_keeps_drawer() {
        let mut nav = controller();
        nav.on_toggle_drawer_requested();
        nav.on_viewport_resize(1023);
        assert!(nav.state().drawer_open);
        assert!(!nav.is_wide());
    }

    #[test]
    fn test_resize_does_not_touch_active_section() {
        let mut nav = controller();
        nav.on_section_became_active("service").unwrap();
        nav.on_viewport_resize(2000);
        nav.on_viewport_resize(300);
        assert_eq!(nav.state().active_section_id, "service");
    }

    #[test]
    fn test_toggle_pairs_restore_state() {
        for width in [320, 768, 1023] {
            let mut nav = controller();
            nav.on_viewport_resize(width);
            let before = nav.state().drawer_open;
            assert_eq!(nav.on_toggle_drawer_requested(), !before);
            assert_eq!(nav.state().drawer_open, !before);
            nav.on_toggle_drawer_requested();
            assert_eq!(nav.state().drawer_open, before);
        }
    }

    #[test]
    fn test_outside_interaction() {
        let mut nav = controller();
        nav.on_toggle_drawer_requested();
        nav.on_outside_interaction(true);
        assert!(nav.state().drawer_open);
        nav.on_outside_interaction(false);
        assert!(!nav.state().drawer_open);
        nav.on_outside_interaction(false);
        assert!(!nav.state().drawer_open);
    }

    #[test]
    fn test_link_activation_is_synchronous() {
        for id in SECTIONS {
            let mut nav = controller();
            nav.on_toggle_drawer_requested();
            nav.on_navigation_link_activated(id).unwrap();
            assert_eq!(
                nav.state(),
                &NavigationState {
                    active_section_id: id.to_string(),
                    drawer_open: false,
                }
            );
        }
    }

    #[test]
    fn test_invalid_ids_leave_state_unchanged() {
        for bad in ["", "About", "contact", "teaching "] {
            let mut nav = controller();
            nav.on_section_became_active("teaching").unwrap();
            nav.on_toggle_drawer_requested();
            let before = nav.state().clone();

            assert_eq!(
                nav.on_section_became_active(bad),
                Err(NavigationError::InvalidSection {
                    id: bad.to_string()
                })
            );
            assert_eq!(nav.state(), &before);

            assert_eq!(
                nav.on_navigation_link_activated(bad),
                Err(NavigationError::InvalidSection {
                    id: bad.to_string()
                })
            );
            assert_eq!(nav.state(), &before);
        }
    }

    #[test]
    fn test_scroll_spy_then_wide_resize_scenario() {
        let mut nav = controller();
        nav.on_viewport_resize(800);
        nav.on_section_became_active("teaching").unwrap();
        assert_eq!(nav.state().active_section_id, "teaching");

        nav.on_viewport_resize(1280);
        assert!(!nav.state().drawer_open);
        assert_eq!(nav.state().active_section_id, "teaching");
    }
}
