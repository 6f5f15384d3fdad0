//! Content model for the loading stage
//!
//! This module defines the records read from the JSON content files during
//! Stage 1. Only the files used by the configured sections are read.

use crate::site_config::SectionKind;
use serde::de::DeserializeOwned;
use std::path::Path;

// Submodules
mod error;
mod records;
mod year;

// Re-export public types
pub use error::ContentError;
pub use records::{
    AboutRecord, ConferenceEntry, Coteacher, CourseRecord, EducationRecord, Publication,
    ServiceRecord, ServiceRole, TaRecord, TeachingBlurb, Term,
};
pub use year::YearLabel;

pub const ABOUT_FILE: &str = "about.json";
pub const EDUCATION_FILE: &str = "education.json";
pub const TEACHING_BLURB_FILE: &str = "teaching_blurb.json";
pub const TEACHING_FILE: &str = "teaching.json";
pub const TA_FILE: &str = "ta.json";
pub const SERVICE_FILE: &str = "service.json";
pub const PUBLICATIONS_FILE: &str = "publications.json";

/// All content records needed to render the configured sections
#[derive(Debug, Default)]
pub struct ContentModel {
    /// First record of about.json, when the about section is configured
    pub about: Option<AboutRecord>,
    pub education: Vec<EducationRecord>,

    pub teaching_blurb: Option<TeachingBlurb>,
    pub teaching: Vec<CourseRecord>,
    pub ta: Vec<TaRecord>,

    pub service: Vec<ServiceRecord>,

    pub publications: Vec<ConferenceEntry>,
}

impl ContentModel {
    /// Load the files needed by `kinds` from `data_dir`
    ///
    /// about.json, teaching.json, service.json and publications.json are
    /// required by their sections; education.json, teaching_blurb.json and
    /// ta.json may be absent.
    pub fn load(data_dir: &Path, kinds: &[SectionKind]) -> Result<Self, ContentError> {
        let mut model = ContentModel::default();

        for kind in kinds {
            match kind {
                SectionKind::About => {
                    let about: Vec<AboutRecord> = load_records(data_dir, ABOUT_FILE, true)?;
                    model.about = Some(first_record(about, data_dir, ABOUT_FILE)?);
                    model.education = load_records(data_dir, EDUCATION_FILE, false)?;
                }
                SectionKind::Teaching => {
                    let blurb: Vec<TeachingBlurb> =
                        load_records(data_dir, TEACHING_BLURB_FILE, false)?;
                    model.teaching_blurb = blurb.into_iter().next();
                    model.teaching = load_records(data_dir, TEACHING_FILE, true)?;
                    model.ta = load_records(data_dir, TA_FILE, false)?;
                }
                SectionKind::Service => {
                    model.service = load_records(data_dir, SERVICE_FILE, true)?;
                }
                SectionKind::Publications => {
                    model.publications = load_records(data_dir, PUBLICATIONS_FILE, true)?;
                }
            }
        }

        Ok(model)
    }

    /// Total number of papers across all venues
    pub fn publication_count(&self) -> usize {
        self.publications.iter().map(|e| e.publications.len()).sum()
    }
}

/// Read a JSON array of records
///
/// Missing optional files yield an empty list.
fn load_records<T: DeserializeOwned>(
    data_dir: &Path,
    file_name: &str,
    required: bool,
) -> Result<Vec<T>, ContentError> {
    let path = data_dir.join(file_name);
    if !path.exists() {
        if required {
            return Err(ContentError::MissingFile(path));
        }
        log::info!("Optional content file {} not found, skipping", path.display());
        return Ok(Vec::new());
    }

    let content =
        std::fs::read_to_string(&path).map_err(|e| ContentError::IoError(path.clone(), e))?;
    let records: Vec<T> =
        serde_json::from_str(&content).map_err(|e| ContentError::JsonError(path.clone(), e))?;
    log::debug!("Loaded {} records from {}", records.len(), path.display());

    Ok(records)
}

fn first_record<T>(records: Vec<T>, data_dir: &Path, file_name: &str) -> Result<T, ContentError> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| ContentError::MissingRecord(data_dir.join(file_name)))
}
