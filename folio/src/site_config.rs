//! Site configuration from folio.toml

use crate::inline_links::DEFAULT_FALLBACK_URL;
use crate::navigation::{
    NavigationController, NavigationError, NavigationSection, DEFAULT_WIDE_BREAKPOINT_PX,
};
use crate::view_state::SnapMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the configuration file at the site root
pub const CONFIG_FILE_NAME: &str = "folio.toml";

/// Main site configuration from folio.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Name shown as the page heading
    pub owner_name: String,

    /// Browser title; defaults to `owner_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,

    /// Directory holding the JSON content files, relative to the site root
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Optional headshot image, relative to the site root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headshot: Option<String>,

    /// Width at which the full sidebar replaces the drawer
    #[serde(default = "default_wide_breakpoint")]
    pub wide_breakpoint_px: u32,

    /// Viewport width assumed when rendering the initial page state
    #[serde(default = "default_initial_width")]
    pub initial_viewport_width_px: u32,

    /// Target for `[[label]]` placeholders without a matching link
    #[serde(default = "default_fallback_url")]
    pub link_fallback_url: String,

    /// Initial scroll snapping mode
    #[serde(default)]
    pub scroll_snap: SnapMode,

    /// Navigation sections in display order
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,
}

/// One navigation section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Section id; must name one of the known section kinds
    pub id: String,

    /// Label shown in the sidebar
    pub label: String,
}

/// The content renderers a section id can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    About,
    Teaching,
    Service,
    Publications,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::About,
        SectionKind::Teaching,
        SectionKind::Service,
        SectionKind::Publications,
    ];

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn id(self) -> &'static str {
        match self {
            SectionKind::About => "about",
            SectionKind::Teaching => "teaching",
            SectionKind::Service => "service",
            SectionKind::Publications => "publications",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            SectionKind::About => "About",
            SectionKind::Teaching => "Teaching",
            SectionKind::Service => "Academic Service",
            SectionKind::Publications => "Publications",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_wide_breakpoint() -> u32 {
    DEFAULT_WIDE_BREAKPOINT_PX
}

fn default_initial_width() -> u32 {
    1280
}

fn default_fallback_url() -> String {
    DEFAULT_FALLBACK_URL.to_string()
}

fn default_sections() -> Vec<SectionConfig> {
    SectionKind::ALL
        .into_iter()
        .map(|kind| SectionConfig {
            id: kind.id().to_string(),
            label: kind.default_label().to_string(),
        })
        .collect()
}

impl SiteConfig {
    /// Configuration with defaults for everything but the owner name
    pub fn new(owner_name: impl Into<String>) -> Self {
        Self {
            owner_name: owner_name.into(),
            site_title: None,
            data_dir: default_data_dir(),
            headshot: None,
            wide_breakpoint_px: default_wide_breakpoint(),
            initial_viewport_width_px: default_initial_width(),
            link_fallback_url: default_fallback_url(),
            scroll_snap: SnapMode::default(),
            sections: default_sections(),
        }
    }

    /// Load and validate configuration from a folio.toml file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SiteConfigError> {
        let content = fs::read_to_string(&path)?;
        let config: SiteConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a folio.toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SiteConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Browser title of the page
    pub fn title(&self) -> &str {
        self.site_title.as_deref().unwrap_or(&self.owner_name)
    }

    /// Check section ids and numeric settings
    pub fn validate(&self) -> Result<(), SiteConfigError> {
        if self.wide_breakpoint_px == 0 {
            return Err(SiteConfigError::Invalid(
                "wide_breakpoint_px must be greater than zero".to_string(),
            ));
        }
        for section in &self.sections {
            if SectionKind::from_id(&section.id).is_none() {
                return Err(SiteConfigError::UnknownSection(section.id.clone()));
            }
        }
        // Empty and duplicate lists are rejected by the controller itself
        self.navigation_controller()?;
        Ok(())
    }

    /// Section kinds in navigation order
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections
            .iter()
            .filter_map(|s| SectionKind::from_id(&s.id))
            .collect()
    }

    /// Build a fresh navigation controller for these sections
    pub fn navigation_controller(&self) -> Result<NavigationController, NavigationError> {
        let sections = self
            .sections
            .iter()
            .map(|s| NavigationSection {
                id: s.id.clone(),
                order: 0,
                label: s.label.clone(),
            })
            .collect();
        NavigationController::from_sections(sections, self.wide_breakpoint_px)
    }
}

/// Errors that can occur when loading or saving site configuration
#[derive(Error, Debug)]
pub enum SiteConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Unknown section '{0}' (expected one of: about, teaching, service, publications)")]
    UnknownSection(String),

    #[error("Invalid navigation: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: SiteConfig = toml::from_str("owner_name = \"Alex Chao\"").unwrap();

        assert_eq!(config.title(), "Alex Chao");
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.wide_breakpoint_px, 1024);
        assert_eq!(config.link_fallback_url, "#");
        assert_eq!(config.scroll_snap, SnapMode::None);
        assert_eq!(
            config.section_kinds(),
            vec![
                SectionKind::About,
                SectionKind::Teaching,
                SectionKind::Service,
                SectionKind::Publications
            ]
        );
        assert_eq!(config.sections[2].label, "Academic Service");
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
owner_name = "Alex Chao"
site_title = "Alex Chao | Portfolio"
data_dir = "content"
headshot = "img/me.png"
wide_breakpoint_px = 900
initial_viewport_width_px = 375
link_fallback_url = "about:blank"
scroll_snap = "normal"

[[sections]]
id = "publications"
label = "Papers"

[[sections]]
id = "about"
label = "Me"
"#;

        let config: SiteConfig = toml::from_str(toml_content).unwrap();
        config.validate().unwrap();

        assert_eq!(config.title(), "Alex Chao | Portfolio");
        assert_eq!(config.headshot.as_deref(), Some("img/me.png"));
        assert_eq!(config.scroll_snap, SnapMode::Normal);

        let nav = config.navigation_controller().unwrap();
        assert_eq!(nav.state().active_section_id, "publications");
        assert_eq!(nav.wide_breakpoint_px(), 900);
        assert_eq!(nav.sections()[1].label, "Me");
    }

    #[test]
    fn test_unknown_section_rejected() {
        let mut config = SiteConfig::new("A");
        config.sections.push(SectionConfig {
            id: "contact".to_string(),
            label: "Contact".to_string(),
        });
        assert!(matches!(
            config.validate(),
            Err(SiteConfigError::UnknownSection(id)) if id == "contact"
        ));
    }

    #[test]
    fn test_empty_or_duplicate_sections_rejected() {
        let mut config = SiteConfig::new("A");
        config.sections.clear();
        assert!(matches!(
            config.validate(),
            Err(SiteConfigError::Navigation(NavigationError::NoSections))
        ));

        let mut config = SiteConfig::new("A");
        config.sections.push(config.sections[0].clone());
        assert!(matches!(
            config.validate(),
            Err(SiteConfigError::Navigation(NavigationError::DuplicateSection { .. }))
        ));
    }

    #[test]
    fn test_zero_breakpoint_rejected() {
        let mut config = SiteConfig::new("A");
        config.wide_breakpoint_px = 0;
        assert!(matches!(config.validate(), Err(SiteConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = SiteConfig::new("Alex Chao");
        config.headshot = Some("me.jpg".to_string());
        config.save(&path).unwrap();

        let loaded = SiteConfig::load(&path).unwrap();
        assert_eq!(loaded.owner_name, "Alex Chao");
        assert_eq!(loaded.headshot.as_deref(), Some("me.jpg"));
        assert_eq!(loaded.sections, config.sections);
    }
}
