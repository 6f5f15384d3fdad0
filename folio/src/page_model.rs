//! Page model for the transformation stage (Stage 2)
//!
//! This module defines the presentation-ready structures built from the
//! content records. Exporters only format these; all joining, link parsing
//! and initial view state are decided here.

use crate::content_model::{
    AboutRecord, ConferenceEntry, CourseRecord, EducationRecord, ServiceRecord, TaRecord, Term,
};
use crate::inline_links::{parse_inline_links_with_fallback, TextSegment};
use crate::site_config::SectionKind;
use crate::view_state::{CardKey, SnapMode};
use itertools::Itertools;
use std::path::PathBuf;

/// The page model ready for export
#[derive(Debug)]
pub struct Page {
    /// Browser title
    pub title: String,
    /// Name shown as the About heading
    pub owner_name: String,
    /// Absolute path of the headshot image, if configured
    pub headshot: Option<PathBuf>,
    /// Width at which the full sidebar is shown
    pub wide_breakpoint_px: u32,
    /// Initial scroll snapping
    pub snap_mode: SnapMode,
    /// Whether the drawer starts open
    pub drawer_open: bool,
    /// Link target used in place of unusable URLs
    pub link_fallback_url: String,
    /// Sidebar entries in order
    pub nav: Vec<NavEntry>,
    /// Content sections in the same order as `nav`
    pub sections: Vec<PageSection>,
    /// Authoring problems that did not stop the build
    pub warnings: Vec<String>,
}

impl Page {
    /// Id of the highlighted sidebar entry
    pub fn active_section_id(&self) -> Option<&str> {
        self.nav.iter().find(|e| e.active).map(|e| e.id.as_str())
    }
}

/// One sidebar link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub id: String,
    pub label: String,
    pub kind: SectionKind,
    pub active: bool,
}

/// One content section
#[derive(Debug)]
pub struct PageSection {
    /// Anchor id, equal to the navigation id
    pub id: String,
    /// Entrance reveal already latched in the initial session
    pub revealed: bool,
    pub body: SectionBody,
}

/// Section-specific content
#[derive(Debug)]
pub enum SectionBody {
    About(AboutView),
    Teaching(TeachingView),
    Service(Vec<ServiceCard>),
    Publications(Vec<TimelineEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutView {
    /// Title, place and email joined by ", "
    pub header_line: String,
    pub biography: Vec<TextSegment>,
    pub education: Vec<EducationView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationView {
    /// "School | Place | Year"
    pub heading: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeachingView {
    pub blurb: Option<String>,
    pub blurb_expanded: bool,
    pub courses: Vec<CourseView>,
    pub ta_lines: Vec<TaLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseView {
    /// Course name, linked when the course has a page
    pub title: TextSegment,
    /// Offerings, e.g. "Fall 2023 co-taught with A, B | Spring 2024"
    pub terms: Vec<TextSegment>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaLine {
    /// "Fall 2022, Spring 2023"
    pub terms: String,
    pub class: String,
}

impl TaLine {
    /// "[Fall 2022, Spring 2023] Class"
    pub fn text(&self) -> String {
        format!("[{}] {}", self.terms, self.class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCard {
    pub conference: String,
    /// "[2022, 2023] Reviewer"
    pub roles: Vec<String>,
}

/// Side of the timeline axis an entry is drawn on, on wide viewports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub year: String,
    pub conference: String,
    pub side: TimelineSide,
    pub publications: Vec<PublicationCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationCard {
    pub key: CardKey,
    pub name: String,
    pub link: Option<String>,
    pub description: String,
    pub expanded: bool,
}

/// Build the About section
pub fn about_view(
    about: &AboutRecord,
    education: &[EducationRecord],
    fallback_url: &str,
) -> AboutView {
    let header_line = [&about.title, &about.place, &about.email]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .join(", ");

    AboutView {
        header_line,
        biography: parse_inline_links_with_fallback(&about.about, &about.links, fallback_url),
        education: education
            .iter()
            .map(|edu| EducationView {
                heading: format!("{} | {} | {}", edu.school, edu.place, edu.year),
                notes: edu.notes.clone().filter(|n| !n.is_empty()),
            })
            .collect(),
    }
}

/// Build one instructor course entry
pub fn course_view(course: &CourseRecord) -> CourseView {
    let title = match &course.link {
        Some(link) => TextSegment::link(course.class.as_str(), link.as_str()),
        None => TextSegment::plain(course.class.as_str()),
    };

    let mut terms = SegmentBuilder::default();
    for (index, term) in course.terms.iter().enumerate() {
        if index > 0 {
            terms.plain(" | ");
        }
        terms.plain(&term_label(term));
        if !term.coteachers.is_empty() {
            terms.plain(" co-taught with ");
        }
        for (t_index, teacher) in term.coteachers.iter().enumerate() {
            if t_index > 0 {
                terms.plain(", ");
            }
            match &teacher.link {
                Some(link) => terms.link(&teacher.name, link),
                None => terms.plain(&teacher.name),
            }
        }
    }

    CourseView {
        title,
        terms: terms.finish(),
        description: course.description.clone(),
    }
}

pub fn ta_line(record: &TaRecord) -> TaLine {
    TaLine {
        terms: record.terms.iter().map(term_label).join(", "),
        class: record.class.clone(),
    }
}

pub fn service_card(record: &ServiceRecord) -> ServiceCard {
    ServiceCard {
        conference: record.conference.clone(),
        roles: record
            .roles
            .iter()
            .map(|role| format!("[{}] {}", role.years.iter().join(", "), role.role))
            .collect(),
    }
}

/// Build a timeline entry; `is_expanded` reports the initial card state
pub fn timeline_entry(
    index: usize,
    entry: &ConferenceEntry,
    is_expanded: impl Fn(CardKey) -> bool,
) -> TimelineEntry {
    TimelineEntry {
        year: entry.year.to_string(),
        conference: entry.conference.clone(),
        side: if index % 2 == 0 {
            TimelineSide::Left
        } else {
            TimelineSide::Right
        },
        publications: entry
            .publications
            .iter()
            .enumerate()
            .map(|(pub_index, publication)| {
                let key = CardKey::new(index, pub_index);
                PublicationCard {
                    key,
                    name: publication.name.clone(),
                    link: publication.link.clone(),
                    description: publication.description.clone(),
                    expanded: is_expanded(key),
                }
            })
            .collect(),
    }
}

fn term_label(term: &Term) -> String {
    format!("{} {}", term.semester, term.year)
}

/// Collects segments, merging adjacent plain text
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<TextSegment>,
}

impl SegmentBuilder {
    fn plain(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(TextSegment::PlainText { content }) = self.segments.last_mut() {
            content.push_str(text);
        } else {
            self.segments.push(TextSegment::plain(text));
        }
    }

    fn link(&mut self, label: &str, url: &str) {
        self.segments.push(TextSegment::link(label, url));
    }

    fn finish(self) -> Vec<TextSegment> {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_model::{Coteacher, Publication, ServiceRole, YearLabel};
    use crate::inline_links::visible_text;

    fn term(semester: &str, year: i64, coteachers: Vec<Coteacher>) -> Term {
        Term {
            semester: semester.to_string(),
            year: YearLabel::from(year),
            coteachers,
        }
    }

    #[test]
    fn test_header_line_skips_missing_values() {
        let about = AboutRecord {
            title: Some("PhD Student".to_string()),
            place: Some("".to_string()),
            email: Some("a@b.edu".to_string()),
            about: "Bio at [[Lab]]".to_string(),
            links: vec!["https://lab.example".to_string()],
        };
        let view = about_view(&about, &[], "#");
        assert_eq!(view.header_line, "PhD Student, a@b.edu");
        assert_eq!(view.biography[1], TextSegment::link("Lab", "https://lab.example"));
    }

    #[test]
    fn test_education_heading() {
        let education = vec![EducationRecord {
            school: "Brown University".to_string(),
            place: "Providence, RI".to_string(),
            year: YearLabel::from("2020-2025"),
            notes: Some(String::new()),
        }];
        let view = about_view(&AboutRecord::default(), &education, "#");
        assert_eq!(view.education[0].heading, "Brown University | Providence, RI | 2020-2025");
        assert!(view.education[0].notes.is_none());
    }

    #[test]
    fn test_course_terms_with_coteachers() {
        let course = CourseRecord {
            class: "CS 101".to_string(),
            terms: vec![
                term(
                    "Fall",
                    2023,
                    vec![
                        Coteacher {
                            name: "A".to_string(),
                            link: Some("https://a.example".to_string()),
                        },
                        Coteacher {
                            name: "B".to_string(),
                            link: None,
                        },
                    ],
                ),
                term("Spring", 2024, Vec::new()),
            ],
            link: None,
            description: "Intro".to_string(),
        };

        let view = course_view(&course);
        assert_eq!(view.title, TextSegment::plain("CS 101"));
        assert_eq!(
            visible_text(&view.terms),
            "Fall 2023 co-taught with A, B | Spring 2024"
        );
        assert_eq!(
            view.terms,
            vec![
                TextSegment::plain("Fall 2023 co-taught with "),
                TextSegment::link("A", "https://a.example"),
                TextSegment::plain(", B | Spring 2024"),
            ]
        );
    }

    #[test]
    fn test_ta_and_service_lines() {
        let ta = TaRecord {
            class: "Algorithms".to_string(),
            terms: vec![term("Fall", 2022, Vec::new()), term("Spring", 2023, Vec::new())],
        };
        assert_eq!(ta_line(&ta).text(), "[Fall 2022, Spring 2023] Algorithms");

        let service = ServiceRecord {
            conference: "SIGCSE".to_string(),
            roles: vec![ServiceRole {
                role: "Reviewer".to_string(),
                years: vec![YearLabel::from(2022), YearLabel::from(2023)],
            }],
        };
        assert_eq!(service_card(&service).roles, vec!["[2022, 2023] Reviewer"]);
    }

    #[test]
    fn test_timeline_sides_and_card_state() {
        let entry = ConferenceEntry {
            year: YearLabel::from(2024),
            conference: "ICER".to_string(),
            publications: vec![
                Publication {
                    name: "P1".to_string(),
                    link: None,
                    description: "D1".to_string(),
                },
                Publication {
                    name: "P2".to_string(),
                    link: Some("https://p2.example".to_string()),
                    description: "D2".to_string(),
                },
            ],
        };

        let first = timeline_entry(0, &entry, |_| false);
        assert_eq!(first.side, TimelineSide::Left);
        assert!(first.publications.iter().all(|p| !p.expanded));

        let second = timeline_entry(1, &entry, |key| key == CardKey::new(1, 1));
        assert_eq!(second.side, TimelineSide::Right);
        assert!(!second.publications[0].expanded);
        assert!(second.publications[1].expanded);
        assert_eq!(second.publications[1].key.to_string(), "1-1");
    }
}
