//! HTML exporter for the portfolio page
//!
//! This module exports a Page to a single HTML file with:
//! - A fixed sidebar that collapses to a drawer below the wide breakpoint
//! - One anchored `<section>` per navigation entry, in navigation order
//! - The headshot embedded as a data URL (base64 encoded)
//! - Publication cards as `<details>` elements
//! - A scroll-snap toggle button and a small script for the interactive parts
//!   (scroll-spy, drawer dismissal, snap cycling, entrance reveals)

use crate::inline_links::TextSegment;
use crate::page_model::{
    AboutView, CourseView, Page, PageSection, SectionBody, ServiceCard, TeachingView,
    TimelineEntry, TimelineSide,
};
use crate::site_config::SectionKind;
use crate::view_state::{SnapMode, DEFAULT_REVEAL_THRESHOLD};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during HTML export
#[derive(Error, Debug)]
pub enum HtmlExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Export a page to HTML format
///
/// # Parameters
/// * `page` - The page model to export
/// * `output_path` - Path where the HTML file will be written
///
/// # Returns
/// * `Ok(())` - Successfully exported to HTML
/// * `Err(HtmlExportError)` - Error writing the output file
pub fn to_html(page: &Page, output_path: &Path) -> Result<(), HtmlExportError> {
    let output = render_page(page);

    // Create parent directories if they don't exist
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(output_path)?;
    file.write_all(output.as_bytes())?;

    Ok(())
}

/// Render the complete HTML document
pub fn render_page(page: &Page) -> String {
    let mut output = String::new();

    write_html_header(&mut output, &page.title, page.wide_breakpoint_px);

    output.push_str(&format!(
        "<body data-breakpoint=\"{}\">\n",
        page.wide_breakpoint_px
    ));
    output.push_str("<div class=\"layout\">\n");

    write_nav(&mut output, page);

    let snap_classes = page.snap_mode.css_classes();
    let class = if snap_classes.is_empty() {
        "content".to_string()
    } else {
        format!("content {}", snap_classes)
    };
    output.push_str(&format!(
        "<main id=\"scroll-container\" class=\"{}\" data-snap-mode=\"{}\" data-reveal-threshold=\"{}\">\n",
        class, page.snap_mode, DEFAULT_REVEAL_THRESHOLD
    ));
    for section in &page.sections {
        write_section(&mut output, page, section);
    }
    output.push_str("</main>\n");

    output.push_str("</div>\n");
    write_snap_toggle(&mut output, page.snap_mode);
    output.push_str("<script>\n");
    output.push_str(PAGE_SCRIPT);
    output.push_str("</script>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");

    output
}

/// Write HTML header with CSS styling
fn write_html_header(output: &mut String, title: &str, wide_breakpoint_px: u32) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str(&format!("@media (min-width: {}px) {{\n", wide_breakpoint_px));
    output.push_str(WIDE_CSS_STYLES);
    output.push_str("}\n");
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Write the fixed scroll-snap button; the script cycles it
fn write_snap_toggle(output: &mut String, mode: SnapMode) {
    output.push_str(&format!(
        "<button type=\"button\" id=\"snap-toggle\" class=\"snap-toggle\" title=\"{}\" data-snap-mode=\"{}\">&#8597;</button>\n",
        escape_html(&mode.title()),
        mode
    ));
}

/// Write the sidebar
///
/// The drawer is a CSS checkbox toggle; it starts checked only when the page
/// model says the drawer is open.
fn write_nav(output: &mut String, page: &Page) {
    output.push_str(&format!(
        "<input type=\"checkbox\" id=\"nav-toggle\" class=\"nav-toggle\"{}>\n",
        if page.drawer_open { " checked" } else { "" }
    ));
    output.push_str("<nav class=\"sidebar\" aria-label=\"Sections\">\n");
    output.push_str(
        "<label for=\"nav-toggle\" class=\"menu-button\" aria-label=\"Toggle navigation\">&#9776;</label>\n",
    );

    write_headshot(output, page);

    for entry in &page.nav {
        let (class, current) = if entry.active {
            ("nav-link active", " aria-current=\"true\"")
        } else {
            ("nav-link", "")
        };
        output.push_str(&format!(
            "<a href=\"#{id}\" class=\"{class}\" data-section=\"{id}\"{current}><span class=\"nav-icon\" aria-hidden=\"true\">{icon}</span> <span class=\"nav-label\">{label}</span></a>\n",
            id = escape_html(&entry.id),
            class = class,
            current = current,
            icon = nav_icon(entry.kind),
            label = escape_html(&entry.label),
        ));
    }

    output.push_str("</nav>\n");
}

/// Write the headshot as an embedded image, or an empty placeholder circle
fn write_headshot(output: &mut String, page: &Page) {
    let Some(path) = &page.headshot else {
        output.push_str("<div class=\"headshot\"></div>\n");
        return;
    };

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to read headshot {}: {}", path.display(), e);
            output.push_str("<div class=\"headshot\"></div>\n");
            return;
        }
    };

    let data_url = format!("data:{};base64,{}", image_mime_type(path), STANDARD.encode(&data));
    output.push_str(&format!(
        "<div class=\"headshot\"><img src=\"{}\" alt=\"{}\"></div>\n",
        data_url,
        escape_html(&page.owner_name)
    ));
}

fn image_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn nav_icon(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::About => "&#128100;",
        SectionKind::Teaching => "&#128214;",
        SectionKind::Service => "&#128188;",
        SectionKind::Publications => "&#128196;",
    }
}

/// Write a single section to the output
fn write_section(output: &mut String, page: &Page, section: &PageSection) {
    output.push_str(&format!(
        "<section id=\"{}\" class=\"page-section snap-start reveal{}\">\n",
        escape_html(&section.id),
        if section.revealed { " revealed" } else { "" }
    ));

    let fallback = page.link_fallback_url.as_str();
    match &section.body {
        SectionBody::About(view) => write_about(output, &page.owner_name, view, fallback),
        SectionBody::Teaching(view) => write_teaching(output, view, fallback),
        SectionBody::Service(cards) => write_service(output, cards),
        SectionBody::Publications(entries) => write_publications(output, entries, fallback),
    }

    output.push_str("</section>\n");
}

fn write_about(output: &mut String, owner_name: &str, view: &AboutView, fallback: &str) {
    output.push_str(&format!("<h1>{}</h1>\n", escape_html(owner_name)));
    if !view.header_line.is_empty() {
        output.push_str(&format!(
            "<p class=\"header-line\">{}</p>\n",
            escape_html(&view.header_line)
        ));
    }
    output.push_str(&format!(
        "<p class=\"biography\">{}</p>\n",
        segments_to_html(&view.biography, fallback)
    ));

    if !view.education.is_empty() {
        output.push_str("<div class=\"education\">\n<h2>Education</h2>\n");
        for edu in &view.education {
            output.push_str(&format!("<h3>{}</h3>\n", escape_html(&edu.heading)));
            if let Some(ref notes) = edu.notes {
                output.push_str(&format!("<p>{}</p>\n", escape_html(notes)));
            }
        }
        output.push_str("</div>\n");
    }
}

fn write_teaching(output: &mut String, view: &TeachingView, fallback: &str) {
    output.push_str(&format!(
        "<details class=\"card teaching-blurb\"{}>\n<summary><h1>Teaching</h1></summary>\n",
        if view.blurb_expanded { " open" } else { "" }
    ));
    if let Some(ref blurb) = view.blurb {
        output.push_str(&format!("<p>{}</p>\n", escape_html(blurb)));
    }
    output.push_str("</details>\n");

    if !view.courses.is_empty() {
        output.push_str("<div class=\"courses\">\n<h2>Instructor Experience</h2>\n");
        for course in &view.courses {
            write_course(output, course, fallback);
        }
        output.push_str("</div>\n");
    }

    if !view.ta_lines.is_empty() {
        output.push_str("<div class=\"ta\">\n<h2>TA Experience</h2>\n<ul>\n");
        for line in &view.ta_lines {
            output.push_str(&format!(
                "<li>[{}]<b> {}</b></li>\n",
                escape_html(&line.terms),
                escape_html(&line.class)
            ));
        }
        output.push_str("</ul>\n</div>\n");
    }
}

fn write_course(output: &mut String, course: &CourseView, fallback: &str) {
    output.push_str("<div class=\"course\">\n");
    output.push_str(&format!(
        "<h3>{}</h3>\n",
        segments_to_html(std::slice::from_ref(&course.title), fallback)
    ));
    if !course.terms.is_empty() {
        output.push_str(&format!("<h4>{}</h4>\n", segments_to_html(&course.terms, fallback)));
    }
    output.push_str(&format!("<p>{}</p>\n", escape_html(&course.description)));
    output.push_str("</div>\n");
}

fn write_service(output: &mut String, cards: &[ServiceCard]) {
    output.push_str("<h1>Academic Service</h1>\n<div class=\"carousel\">\n");
    for card in cards {
        output.push_str(&format!(
            "<div class=\"service-card\">\n<h3>{}</h3>\n<ul>\n",
            escape_html(&card.conference)
        ));
        for role in &card.roles {
            output.push_str(&format!("<li>{}</li>\n", escape_html(role)));
        }
        output.push_str("</ul>\n</div>\n");
    }
    output.push_str("</div>\n");
}

fn write_publications(output: &mut String, entries: &[TimelineEntry], fallback: &str) {
    output.push_str("<h1>Publications</h1>\n<div class=\"timeline\">\n");
    for entry in entries {
        let side = match entry.side {
            TimelineSide::Left => "left",
            TimelineSide::Right => "right",
        };
        output.push_str(&format!(
            "<div class=\"timeline-entry {}\">\n<h3 class=\"timeline-year\">{}</h3>\n<div class=\"card\">\n<h5>{}</h5>\n",
            side,
            escape_html(&entry.year),
            escape_html(&entry.conference)
        ));

        for publication in &entry.publications {
            output.push_str(&format!(
                "<details class=\"publication\" id=\"publication-{}\"{}>\n<summary>{}</summary>\n",
                publication.key,
                if publication.expanded { " open" } else { "" },
                escape_html(&publication.name)
            ));
            if let Some(ref link) = publication.link {
                output.push_str(&format!(
                    "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Visit publication &#8599;</a></p>\n",
                    escape_html(safe_url(link, fallback))
                ));
            }
            output.push_str(&format!(
                "<p class=\"muted\">{}</p>\n</details>\n",
                escape_html(&publication.description)
            ));
        }

        output.push_str("</div>\n</div>\n");
    }
    output.push_str("</div>\n");
}

/// Convert text segments to an HTML string
///
/// Link targets that fail [`is_safe_url`] are replaced by `fallback`.
fn segments_to_html(segments: &[TextSegment], fallback: &str) -> String {
    let mut result = String::new();

    for segment in segments {
        match segment {
            TextSegment::PlainText { content } => result.push_str(&escape_html(content)),
            TextSegment::LinkText { label, url } => {
                let url = safe_url(url, fallback);
                if url.starts_with('#') {
                    result.push_str(&format!(
                        "<a href=\"{}\">{}</a>",
                        escape_html(url),
                        escape_html(label)
                    ));
                } else {
                    result.push_str(&format!(
                        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                        escape_html(url),
                        escape_html(label)
                    ));
                }
            }
        }
    }

    result
}

/// `url` when it is safe to emit as an href, otherwise `fallback` (or `#`)
fn safe_url<'a>(url: &'a str, fallback: &'a str) -> &'a str {
    if is_safe_url(url) {
        url
    } else {
        log::warn!("Replacing link target '{}' with '{}'", url, fallback);
        if is_safe_url(fallback) {
            fallback
        } else {
            "#"
        }
    }
}

/// Relative URLs, fragments and http(s)/mailto links are allowed
///
/// Whitespace and control characters are ignored when reading the scheme, as
/// browsers do.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];
    if scheme.contains(|c| matches!(c, '/' | '?' | '#')) {
        return true;
    }
    matches!(
        scheme.to_ascii_lowercase().as_str(),
        "http" | "https" | "mailto"
    )
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Base styles; compact drawer layout
const CSS_STYLES: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

:root {
    --background: #f7f5fa;
    --primary: #4e2c62;
    --secondary: #e6ddeb;
    --highlight1: #c0659a;
    --highlight2: #6b8fd6;
    --muted: #666;
}

body {
    font-family: 'Open Sans', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    line-height: 1.5;
    color: #222;
    background-color: var(--background);
}

h1, h2, h3, h4, h5 {
    font-family: 'Montserrat', sans-serif;
    color: var(--primary);
}

h1 { font-size: 2.25rem; padding-bottom: 0.5rem; }
h2 { font-size: 1.5rem; padding: 1rem 0 0.5rem; }
h3 { font-size: 1.25rem; }
h4 { font-size: 1rem; padding: 0.5rem 0; font-weight: 600; }

a {
    color: inherit;
    text-decoration: underline;
}

.layout {
    display: flex;
    width: 100%;
}

.nav-toggle {
    display: none;
}

.sidebar {
    position: fixed;
    top: 0;
    left: 0;
    height: 100vh;
    width: 4rem;
    padding: 3rem 1rem 1rem;
    display: flex;
    flex-direction: column;
    gap: 2.5rem;
    text-align: center;
    background: radial-gradient(circle, #613f75, #5c3a70, #57356b, #533167, #4e2c62);
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
    transition: width 0.2s ease;
    z-index: 10;
}

.nav-toggle:checked + .sidebar {
    width: 9rem;
    text-align: left;
}

.menu-button {
    color: white;
    font-size: 2rem;
    cursor: pointer;
}

.headshot {
    display: none;
}

.nav-link {
    color: white;
    font-weight: 700;
    text-decoration: none;
    opacity: 0.7;
}

.nav-link:hover,
.nav-link.active {
    opacity: 1;
    text-decoration: underline;
}

.nav-label {
    display: none;
}

.nav-toggle:checked + .sidebar .nav-label {
    display: inline;
}

.content {
    display: flex;
    flex-direction: column;
    width: 100%;
    height: 100vh;
    padding-left: 4rem;
    overflow-y: auto;
    scroll-behavior: smooth;
}

.content.snap-y {
    scroll-snap-type: y mandatory;
}

.snap-always .snap-start {
    scroll-snap-stop: always;
}

.snap-start {
    scroll-snap-align: start;
}

.page-section {
    padding: 3rem 2rem;
    max-width: 56rem;
}

.card {
    background: white;
    border-radius: 1rem;
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
    padding: 1.5rem;
}

.teaching-blurb summary {
    cursor: pointer;
    list-style: none;
}

.header-line {
    font-size: 1.125rem;
    padding-bottom: 0.5rem;
}

.course {
    padding: 0.5rem 0;
}

.carousel {
    display: flex;
    gap: 0.5rem;
    overflow-x: auto;
    padding: 0.5rem 0;
}

.service-card {
    min-width: 15rem;
    border-radius: 0.5rem;
    background: var(--secondary);
    padding: 1rem;
}

.service-card ul,
.ta ul {
    list-style: none;
}

.timeline {
    position: relative;
    border-left: 4px solid var(--highlight1);
    padding-left: 1.5rem;
}

.timeline-entry {
    margin-bottom: 2rem;
}

.publication {
    margin-top: 0.5rem;
}

.publication summary {
    font-weight: 700;
    cursor: pointer;
}

.muted {
    color: var(--muted);
    padding-top: 0.25rem;
    overflow-wrap: break-word;
}

.snap-toggle {
    position: fixed;
    right: 1.5rem;
    bottom: 1.5rem;
    width: 3rem;
    height: 3rem;
    border: none;
    border-radius: 50%;
    color: white;
    font-size: 1.5rem;
    background: var(--primary);
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.3);
    opacity: 0.6;
    cursor: pointer;
    z-index: 20;
}

.snap-toggle[data-snap-mode="normal"] {
    opacity: 0.85;
}

.snap-toggle[data-snap-mode="always"] {
    opacity: 1;
    background: var(--highlight1);
}

.js .reveal {
    opacity: 0;
    transform: translateY(1.5rem);
    transition: opacity 0.6s ease, transform 0.6s ease;
}

.js .reveal.revealed {
    opacity: 1;
    transform: none;
}
"#;

/// Client-side behaviour: scroll-spy, drawer dismissal, snap cycling and
/// entrance reveals. Mirrors the state machine in [`crate::session`].
const PAGE_SCRIPT: &str = r#"
(function () {
    document.documentElement.classList.add('js');

    var main = document.getElementById('scroll-container');
    var toggle = document.getElementById('nav-toggle');
    var nav = document.querySelector('.sidebar');
    var links = document.querySelectorAll('.nav-link');
    var snapButton = document.getElementById('snap-toggle');
    var breakpoint = parseInt(document.body.dataset.breakpoint, 10);
    var threshold = parseFloat(main.dataset.revealThreshold);

    var modes = ['none', 'normal', 'always'];
    var snapClasses = {
        none: [],
        normal: ['snap-y', 'snap-normal'],
        always: ['snap-y', 'snap-always']
    };

    snapButton.addEventListener('click', function () {
        var current = modes.indexOf(main.dataset.snapMode);
        var next = modes[(current + 1) % modes.length];
        main.classList.remove('snap-y', 'snap-normal', 'snap-always');
        snapClasses[next].forEach(function (name) {
            main.classList.add(name);
        });
        main.dataset.snapMode = next;
        snapButton.dataset.snapMode = next;
        snapButton.title = 'Scroll snapping: ' + next;
    });

    function activate(id) {
        links.forEach(function (link) {
            var active = link.dataset.section === id;
            link.classList.toggle('active', active);
            if (active) {
                link.setAttribute('aria-current', 'true');
            } else {
                link.removeAttribute('aria-current');
            }
        });
    }

    links.forEach(function (link) {
        link.addEventListener('click', function () {
            activate(link.dataset.section);
            toggle.checked = false;
        });
    });

    document.addEventListener('pointerdown', function (event) {
        if (!nav.contains(event.target) && event.target !== toggle) {
            toggle.checked = false;
        }
    });

    window.addEventListener('resize', function () {
        if (window.innerWidth >= breakpoint) {
            toggle.checked = false;
        }
    });

    var ratios = {};
    var observer = new IntersectionObserver(function (entries) {
        entries.forEach(function (entry) {
            ratios[entry.target.id] = entry.intersectionRatio;
            if (entry.intersectionRatio >= threshold) {
                entry.target.classList.add('revealed');
            }
        });
        var best = null;
        Object.keys(ratios).forEach(function (id) {
            if (best === null || ratios[id] > ratios[best]) {
                best = id;
            }
        });
        if (best !== null && ratios[best] > 0) {
            activate(best);
        }
    }, { root: main, threshold: [0, threshold, 0.5, 1] });

    document.querySelectorAll('.page-section').forEach(function (section) {
        observer.observe(section);
    });
})();
"#;

/// Full sidebar layout, emitted inside the wide-breakpoint media query
const WIDE_CSS_STYLES: &str = r#"
    .sidebar,
    .nav-toggle:checked + .sidebar {
        width: 16rem;
        align-items: center;
        text-align: center;
    }

    .menu-button {
        display: none;
    }

    .headshot {
        display: flex;
        width: 10rem;
        height: 10rem;
        border-radius: 50%;
        overflow: hidden;
        background: var(--secondary);
    }

    .headshot img {
        width: 100%;
        height: 100%;
        object-fit: cover;
    }

    .nav-label {
        display: inline;
    }

    .content {
        padding-left: 16rem;
    }

    .page-section {
        padding: 6rem 3rem;
    }

    .teaching-blurb summary {
        pointer-events: none;
    }

    .timeline {
        border-left: none;
        padding-left: 0;
    }

    .timeline-entry.left {
        margin-right: 50%;
        padding-right: 2rem;
        border-right: 4px solid var(--highlight1);
    }

    .timeline-entry.right {
        margin-left: 50%;
        padding-left: 2rem;
        border-left: 4px solid var(--highlight1);
        text-align: right;
    }
"#;
