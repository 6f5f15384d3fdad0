//! Three-stage site build pipeline
//!
//! This module orchestrates the three stages of building the portfolio:
//! 1. **Loading**: Read folio.toml and the JSON content files
//! 2. **Transformation**: Convert records into the page model
//! 3. **Export**: Write the HTML page (see [`crate::html_exporter`])

use crate::content_model::{ContentError, ContentModel};
use crate::inline_links::placeholder_count;
use crate::navigation::NavigationError;
use crate::page_model::{
    about_view, course_view, service_card, ta_line, timeline_entry, NavEntry, Page, PageSection,
    SectionBody, TeachingView,
};
use crate::session::PageSession;
use crate::site_config::{SectionKind, SiteConfig, SiteConfigError, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything read from a site directory
#[derive(Debug)]
pub struct SiteSource {
    /// Root directory of the site
    pub root: PathBuf,

    /// Site configuration from folio.toml
    pub config: SiteConfig,

    /// Records for the configured sections
    pub content: ContentModel,
}

/// Stage 1: Load configuration and content
///
/// # Parameters
/// * `root` - Site directory containing folio.toml and the data directory
///
/// # Returns
/// * `Ok(SiteSource)` - Configuration and records for every configured section
/// * `Err(ParseError)` - Error reading or validating configuration or content
pub fn load_site(root: &Path) -> Result<SiteSource, ParseError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    let config = SiteConfig::load(&config_path)
        .map_err(|e| ParseError::ConfigError(config_path.clone(), Box::new(e)))?;

    let data_dir = root.join(&config.data_dir);
    log::info!("Loading content from {}", data_dir.display());
    let content = ContentModel::load(&data_dir, &config.section_kinds())?;

    Ok(SiteSource {
        root: root.to_path_buf(),
        config,
        content,
    })
}

/// Stage 2: Transform loaded records into the page model
///
/// The initial view state comes from a fresh [`PageSession`] started at the
/// configured viewport width.
pub fn transform(source: SiteSource) -> Result<Page, TransformError> {
    let SiteSource {
        root,
        config,
        content,
    } = source;

    let mut session = PageSession::new(&config)?;
    session.start(config.initial_viewport_width_px);
    let state = session.navigation().state();

    let mut warnings = Vec::new();
    let mut nav = Vec::new();
    let mut sections = Vec::new();

    for section in session.navigation().sections() {
        let kind = SectionKind::from_id(&section.id)
            .ok_or_else(|| TransformError::UnknownSection(section.id.clone()))?;

        nav.push(NavEntry {
            id: section.id.clone(),
            label: section.label.clone(),
            kind,
            active: section.id == state.active_section_id,
        });

        let body = match kind {
            SectionKind::About => {
                let about = content
                    .about
                    .as_ref()
                    .ok_or(TransformError::MissingContent(kind))?;
                check_about_links(about.about.as_str(), about.links.len(), &mut warnings);
                SectionBody::About(about_view(
                    about,
                    &content.education,
                    &config.link_fallback_url,
                ))
            }
            SectionKind::Teaching => SectionBody::Teaching(TeachingView {
                blurb: content.teaching_blurb.as_ref().map(|b| b.blurb.clone()),
                blurb_expanded: session.blurb_expanded(),
                courses: content.teaching.iter().map(course_view).collect(),
                ta_lines: content.ta.iter().map(ta_line).collect(),
            }),
            SectionKind::Service => {
                SectionBody::Service(content.service.iter().map(service_card).collect())
            }
            SectionKind::Publications => SectionBody::Publications(
                content
                    .publications
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| {
                        timeline_entry(index, entry, |key| session.card_expanded(key))
                    })
                    .collect(),
            ),
        };

        sections.push(PageSection {
            id: section.id.clone(),
            revealed: session.is_revealed(&section.id),
            body,
        });
    }

    let headshot = config
        .headshot
        .as_ref()
        .map(|path| root.join(path))
        .filter(|path| {
            let exists = path.exists();
            if !exists {
                warnings.push(format!("Headshot image not found: {}", path.display()));
            }
            exists
        });

    for warning in &warnings {
        log::warn!("{}", warning);
    }

    Ok(Page {
        title: config.title().to_string(),
        owner_name: config.owner_name.clone(),
        headshot,
        wide_breakpoint_px: config.wide_breakpoint_px,
        snap_mode: session.snap_mode(),
        drawer_open: state.drawer_open,
        link_fallback_url: config.link_fallback_url.clone(),
        nav,
        sections,
        warnings,
    })
}

/// Record a warning when placeholders and links are out of step
fn check_about_links(text: &str, link_count: usize, warnings: &mut Vec<String>) {
    let placeholders = placeholder_count(text);
    if placeholders > link_count {
        warnings.push(format!(
            "about.json has {} link placeholders but only {} links; extra placeholders link to the fallback URL",
            placeholders, link_count
        ));
    } else if placeholders < link_count {
        warnings.push(format!(
            "about.json has {} links but only {} link placeholders; extra links are unused",
            link_count, placeholders
        ));
    }
}

/// Loading errors
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Config error loading {path}: {source}", path = .0.display(), source = .1)]
    ConfigError(PathBuf, #[source] Box<SiteConfigError>),

    #[error("Content error: {0}")]
    ContentError(#[from] ContentError),
}

/// Transformation errors
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Invalid navigation: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("No content loaded for section '{0}'")]
    MissingContent(SectionKind),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_model::AboutRecord;
    use crate::inline_links::TextSegment;
    use crate::view_state::SnapMode;

    fn source(config: SiteConfig, content: ContentModel) -> SiteSource {
        SiteSource {
            root: PathBuf::from("."),
            config,
            content,
        }
    }

    fn about_only(text: &str, links: &[&str]) -> (SiteConfig, ContentModel) {
        let mut config = SiteConfig::new("Alex Chao");
        config.sections.retain(|s| s.id == "about");
        let content = ContentModel {
            about: Some(AboutRecord {
                about: text.to_string(),
                links: links.iter().map(|l| l.to_string()).collect(),
                ..Default::default()
            }),
            ..Default::default()
        };
        (config, content)
    }

    #[test]
    fn test_transform_default_sections() {
        let mut content = ContentModel::default();
        content.about = Some(AboutRecord {
            about: "Hi".to_string(),
            ..Default::default()
        });
        let page = transform(source(SiteConfig::new("Alex Chao"), content)).unwrap();

        let ids: Vec<_> = page.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["about", "teaching", "service", "publications"]);
        assert_eq!(page.active_section_id(), Some("about"));
        assert!(!page.drawer_open);
        assert_eq!(page.snap_mode, SnapMode::None);
        assert!(page.warnings.is_empty());
        match &page.sections[1].body {
            SectionBody::Teaching(view) => assert!(view.blurb_expanded),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_transform_uses_configured_fallback() {
        let (mut config, content) = about_only("See [[Lab]]", &[]);
        config.link_fallback_url = "about:blank".to_string();
        let page = transform(source(config, content)).unwrap();

        match &page.sections[0].body {
            SectionBody::About(view) => {
                assert_eq!(view.biography[1], TextSegment::link("Lab", "about:blank"))
            }
            other => panic!("unexpected body {:?}", other),
        }
        assert_eq!(page.warnings.len(), 1);
        assert!(page.warnings[0].contains("1 link placeholders but only 0 links"));
    }

    #[test]
    fn test_unused_links_warn() {
        let (config, content) = about_only("No links here", &["u1"]);
        let page = transform(source(config, content)).unwrap();
        assert!(page.warnings[0].contains("extra links are unused"));
    }

    #[test]
    fn test_missing_about_content() {
        let (config, _) = about_only("", &[]);
        let err = transform(source(config, ContentModel::default())).unwrap_err();
        assert!(matches!(err, TransformError::MissingContent(SectionKind::About)));
    }

    #[test]
    fn test_missing_headshot_is_a_warning() {
        let (mut config, content) = about_only("Hi", &[]);
        config.headshot = Some("does/not/exist.png".to_string());
        let page = transform(source(config, content)).unwrap();
        assert!(page.headshot.is_none());
        assert!(page.warnings[0].starts_with("Headshot image not found"));
    }

    #[test]
    fn test_load_site_requires_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_site(dir.path()).unwrap_err();
        assert!(matches!(err, ParseError::ConfigError(..)));
    }
}
