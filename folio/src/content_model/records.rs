//! Records stored in the JSON content files
//!
//! Keys are PascalCase, matching the files authored for the site.

use super::year::YearLabel;
use serde::{Deserialize, Serialize};

/// First record of about.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AboutRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub email: Option<String>,

    /// Biography text with `[[label]]` link placeholders
    pub about: String,

    /// URLs for the placeholders, in order
    #[serde(default)]
    pub links: Vec<String>,
}

/// One entry of education.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EducationRecord {
    pub school: String,
    pub place: String,
    pub year: YearLabel,
    #[serde(default)]
    pub notes: Option<String>,
}

/// First record of teaching_blurb.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TeachingBlurb {
    pub blurb: String,
}

/// Someone a course was taught with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Coteacher {
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// One offering of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Term {
    pub semester: String,
    pub year: YearLabel,
    #[serde(default)]
    pub coteachers: Vec<Coteacher>,
}

/// One entry of teaching.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CourseRecord {
    pub class: String,
    #[serde(rename = "Year")]
    pub terms: Vec<Term>,
    #[serde(default)]
    pub link: Option<String>,
    pub description: String,
}

/// One entry of ta.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaRecord {
    pub class: String,
    #[serde(rename = "Year")]
    pub terms: Vec<Term>,
}

/// A role held at a venue, possibly over several years
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRole {
    pub role: String,
    #[serde(rename = "Year")]
    pub years: Vec<YearLabel>,
}

/// One entry of service.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRecord {
    pub conference: String,
    #[serde(rename = "Role")]
    pub roles: Vec<ServiceRole>,
}

/// A single paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Publication {
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    pub description: String,
}

/// One entry of publications.json: a venue and its papers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConferenceEntry {
    pub year: YearLabel,
    pub conference: String,
    pub publications: Vec<Publication>,
}
